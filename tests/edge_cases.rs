use gitfacade::git::parser::*;
use gitfacade::git::{OptionOverlay, assemble};
use gitfacade::{DefaultOptions, GitError, Operation, OutputKind};

/// Test parsing completely empty git output
#[test]
fn test_parse_empty_outputs() {
    assert!(parse_config("").unwrap().is_empty());
    assert!(parse_branch_list("").unwrap().is_empty());
    assert!(parse_status("").unwrap().is_empty());
    assert!(parse_log(" \n\t\n").unwrap().is_empty());
}

/// Every parser rejects a line it cannot place instead of skipping it
#[test]
fn test_unmatched_line_is_reported() {
    let cases: [(OutputKind, GitResultOf); 4] = [
        (OutputKind::Config, |s| parse_config(s).map(|_| ())),
        (OutputKind::Branch, |s| parse_branch_list(s).map(|_| ())),
        (OutputKind::Status, |s| parse_status(s).map(|_| ())),
        (OutputKind::Log, |s| parse_log(s).map(|_| ())),
    ];

    for (expected_kind, parse) in cases {
        let err = parse("lonely").unwrap_err();
        match err {
            GitError::Parse { kind, line, output } => {
                assert_eq!(kind, expected_kind);
                assert_eq!(line, "lonely");
                assert_eq!(output, "lonely");
            }
            other => panic!("unexpected error for {expected_kind}: {other:?}"),
        }
    }
}

type GitResultOf = fn(&str) -> gitfacade::GitResult<()>;

/// The error names the parser and the offending line
#[test]
fn test_parse_error_message() {
    let err = parse_config("a=1\nbroken").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse git config output: unexpected line 'broken'"
    );
}

/// A single-token line is a valid log entry but not a valid branch entry
#[test]
fn test_log_hash_only_vs_branch_name_only() {
    assert_eq!(parse_log("abc123").unwrap()["abc123"], "");
    assert!(parse_branch_list("abc123").is_err());
}

/// Test parsing file paths with spaces and octal-escaped UTF-8
#[test]
fn test_parse_paths_with_spaces() {
    let output = "?? my file with spaces.txt\nA  \"quoted name.txt\"\n?? \"caf\\303\\251.txt\"";
    let statuses = parse_status(output).unwrap();

    assert_eq!(statuses["my file with spaces.txt"], "??");
    assert_eq!(statuses["quoted name.txt"], "A ");
    assert_eq!(statuses["café.txt"], "??");
}

/// Test parsing very long file paths
#[test]
fn test_parse_very_long_paths() {
    let long_path = "a/".repeat(100) + "file.txt";
    let output = format!("M  {}", long_path);
    let statuses = parse_status(&output).unwrap();

    assert_eq!(statuses[&long_path], "M ");
}

/// Test parsing commits with very long messages
#[test]
fn test_parse_commits_long_messages() {
    let long_msg = "A".repeat(10000);
    let output = format!("abc123 {}", long_msg);
    let commits = parse_log(&output).unwrap();

    assert_eq!(commits["abc123"].len(), 10000);
}

/// Windows line endings are handled like plain newlines
#[test]
fn test_crlf_line_endings() {
    let commits = parse_log("abc123 first\r\ndef456 second\r\n").unwrap();
    assert_eq!(commits["abc123"], "first");
    assert_eq!(commits["def456"], "second");

    let config = parse_config("user.name=A\r\nuser.email=b@c\r\n").unwrap();
    assert_eq!(config["user.name"], "A");
}

/// Config values may hold any number of `=` and be empty
#[test]
fn test_config_equals_in_value() {
    let config = parse_config("a.b==\nc.d=x=y=z\ne.f=").unwrap();
    assert_eq!(config["a.b"], "=");
    assert_eq!(config["c.d"], "x=y=z");
    assert_eq!(config["e.f"], "");
}

/// A line starting with `=` has no variable name
#[test]
fn test_config_missing_name() {
    assert!(parse_config("=value").is_err());
}

/// Test parsing branches with special characters
#[test]
fn test_parse_branches_special_chars() {
    let output =
        "* feature/add-login abc123 wip: login [skip ci]\n  bugfix-123 def456 fix -> arrow";
    let branches = parse_branch_list(output).unwrap();

    assert_eq!(branches["feature/add-login"].message, "wip: login [skip ci]");
    assert_eq!(branches["bugfix-123"].hash, "def456");
    assert_eq!(branches["bugfix-123"].message, "fix -> arrow");
}

/// Branch lines from another worktree carry a `+` marker
#[test]
fn test_parse_branch_other_worktree() {
    let branches = parse_branch_list("+ hotfix abc123 Patch").unwrap();
    assert_eq!(branches["hotfix"].hash, "abc123");
    assert!(!branches["hotfix"].is_current);
}

/// Caller options still follow defaults when both name the same flag
#[test]
fn test_caller_option_wins_last() {
    let mut overlay = OptionOverlay::new();
    overlay.set(
        Operation::Log,
        DefaultOptions::new().with("count", "--max-count=10").omit("graph"),
    );

    let args = assemble(&overlay, Operation::Log, &["--max-count=2"], &[] as &[&str]);
    assert_eq!(args, vec!["log", "--max-count=10", "--max-count=2"]);
}

/// Setting an empty default set clears every default
#[test]
fn test_set_empty_defaults() {
    let mut overlay = OptionOverlay::new();
    overlay.set(Operation::Push, DefaultOptions::new().with("tags", "--tags"));
    overlay.set(Operation::Push, DefaultOptions::new());

    let args = assemble(&overlay, Operation::Push, &[] as &[&str], &["origin"]);
    assert_eq!(args, vec!["push", "origin"]);
}
