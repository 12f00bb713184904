use crate::error::{GitError, GitResult, OutputKind};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static CONFIG_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^=]+)=(?P<value>.*)$").unwrap());
static BRANCH_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\([^)]*\)|\S+)\s+(?:-> )?(?P<hash>\S+)(?:\s+(?P<message>.*))?$").unwrap()
});
static STATUS_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?P<code>\S+\s?)\s+(?P<path>.+)$").unwrap());
static LOG_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<hash>[[:xdigit:]]{4,})(?:\s+(?P<message>.*))?$").unwrap()
});

/// `git config --list`: variable name to value
pub type ConfigMap = BTreeMap<String, String>;
/// `git branch -v`: branch name to branch entry
pub type BranchMap = BTreeMap<String, BranchEntry>;
/// `git status --porcelain`: path to two-column status code
pub type StatusMap = BTreeMap<String, String>;
/// `git log --oneline`: commit hash to subject line
pub type LogMap = BTreeMap<String, String>;

/// Represents a branch from git branch -v
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    pub name: String,
    pub hash: String,
    pub message: String,
    pub is_current: bool,
}

fn parse_error(kind: OutputKind, line: &str, output: &str) -> GitError {
    GitError::Parse {
        kind,
        line: line.to_string(),
        output: output.to_string(),
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Match every non-blank line of `output` against `pattern`
///
/// A line that does not match aborts the whole parse; nothing is skipped.
fn for_each_line<'t, F>(
    output: &'t str,
    kind: OutputKind,
    pattern: &Regex,
    mut each: F,
) -> GitResult<()>
where
    F: FnMut(&'t str, Captures<'t>) -> GitResult<()>,
{
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    for line in trimmed.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let caps = pattern
            .captures(line)
            .ok_or_else(|| parse_error(kind, line, output))?;
        each(line, caps)?;
    }

    Ok(())
}

/// Parse `name=value` lines; the value may itself contain `=`
pub fn parse_config(output: &str) -> GitResult<ConfigMap> {
    let mut config = ConfigMap::new();

    for_each_line(output, OutputKind::Config, &CONFIG_LINE_REGEX, |_, caps| {
        config.insert(group(&caps, "name").to_string(), group(&caps, "value").to_string());
        Ok(())
    })?;

    Ok(config)
}

/// Parse git branch -v output
///
/// Format: `* main abc123 Commit message` or `  remotes/origin/HEAD -> origin/main`.
/// A later line for the same branch name replaces the earlier one.
pub fn parse_branch_list(output: &str) -> GitResult<BranchMap> {
    let mut branches = BranchMap::new();
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(branches);
    }

    for line in trimmed.lines() {
        let is_current = line.trim_start().starts_with('*');
        // `+` marks a branch checked out in another worktree
        let stripped = line.trim_start_matches(['*', '+', ' ', '\n']);
        if stripped.trim().is_empty() {
            continue;
        }

        let caps = BRANCH_LINE_REGEX
            .captures(stripped)
            .ok_or_else(|| parse_error(OutputKind::Branch, line, output))?;

        let name = group(&caps, "name").to_string();
        branches.insert(
            name.clone(),
            BranchEntry {
                name,
                hash: group(&caps, "hash").to_string(),
                message: group(&caps, "message").to_string(),
                is_current,
            },
        );
    }

    Ok(branches)
}

/// Parse git status --porcelain output
///
/// Quoted paths are unescaped before they become keys.
pub fn parse_status(output: &str) -> GitResult<StatusMap> {
    let mut statuses = StatusMap::new();

    for_each_line(output, OutputKind::Status, &STATUS_LINE_REGEX, |line, caps| {
        let raw_path = group(&caps, "path");
        let path =
            unquote_path(raw_path).ok_or_else(|| parse_error(OutputKind::Status, line, output))?;
        statuses.insert(path, group(&caps, "code").to_string());
        Ok(())
    })?;

    Ok(statuses)
}

/// Parse git log --oneline output
///
/// Each line is `<hash> <subject>`. The hash must be a run of at least four
/// hex digits, so a line starting with any other token (a decoration, a graph
/// glyph, a branch name) is rejected rather than taken as a hash.
pub fn parse_log(output: &str) -> GitResult<LogMap> {
    let mut commits = LogMap::new();

    for_each_line(output, OutputKind::Log, &LOG_LINE_REGEX, |_, caps| {
        commits.insert(group(&caps, "hash").to_string(), group(&caps, "message").to_string());
        Ok(())
    })?;

    Ok(commits)
}

/// Undo git's path quoting
///
/// Paths wrapped in double quotes use C-style escapes: `\"`, `\\`, the
/// single-letter controls `\a \b \t \n \v \f \r`, and three-digit octal for
/// every byte outside printable ASCII. The decoded bytes must be UTF-8.
/// Unquoted paths are returned as-is; `None` means the quoted form was
/// malformed.
pub fn unquote_path(path: &str) -> Option<String> {
    let is_quoted = path.len() >= 2 && path.starts_with('"') && path.ends_with('"');
    if !is_quoted {
        return Some(path.to_string());
    }

    let inner = &path.as_bytes()[1..path.len() - 1];
    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.iter().copied();

    while let Some(byte) = iter.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        let decoded = match iter.next()? {
            b'"' => b'"',
            b'\\' => b'\\',
            b'a' => 0x07,
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'v' => 0x0b,
            b'f' => 0x0c,
            b'r' => b'\r',
            first @ b'0'..=b'3' => {
                let mut value = first - b'0';
                for _ in 0..2 {
                    match iter.next()? {
                        digit @ b'0'..=b'7' => value = value * 8 + (digit - b'0'),
                        _ => return None,
                    }
                }
                value
            }
            _ => return None,
        };
        bytes.push(decoded);
    }

    String::from_utf8(bytes).ok()
}
