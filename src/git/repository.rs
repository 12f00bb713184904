use crate::audit::AuditLogger;
use crate::config::Config;
use crate::error::{AppResult, GitError, GitResult};
use crate::git::command;
use crate::git::executor::{CommandOutput, Executor, GitExecutor};
use crate::git::history::{History, Invocation};
use crate::git::operation::Operation;
use crate::git::options::{DefaultOptions, OptionOverlay};
use crate::git::parser::{self, BranchMap, ConfigMap, LogMap, StatusMap};
use crate::git::version::GitVersion;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marker directory that makes a working tree a repository
const GIT_DIR: &str = ".git";

/// stderr fragments git emits when `log` runs before the first commit
const NO_COMMITS_MARKERS: [&str; 2] = ["does not have any commits yet", "bad default revision"];

/// A git working directory together with its default options and the
/// history of everything issued against it
///
/// Mutating operations return `&mut Self` so calls can be chained with `?`;
/// their raw output stays available through [`Repository::last_output`].
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: Box<dyn Executor>,
    overlay: OptionOverlay,
    history: History,
    audit: Option<AuditLogger>,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            if Self::is_repository(&current) {
                return Ok(Self::new(current));
            }

            // Move up to parent directory
            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Whether `path` already holds repository metadata
    pub fn is_repository<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().join(GIT_DIR).exists()
    }

    /// Create a Repository for a working directory, running `git` from PATH
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_executor(path, GitExecutor::new())
    }

    /// Create a Repository that runs commands through `executor`
    pub fn with_executor<P, E>(path: P, executor: E) -> Self
    where
        P: AsRef<Path>,
        E: Executor + 'static,
    {
        Self {
            path: path.as_ref().to_path_buf(),
            executor: Box::new(executor),
            overlay: OptionOverlay::new(),
            history: History::new(),
            audit: None,
        }
    }

    /// Create a Repository with the binary, audit log and default options
    /// declared in `config`
    pub fn from_config<P: AsRef<Path>>(path: P, config: &Config) -> AppResult<Self> {
        let mut repo = Self::with_executor(path, GitExecutor::with_binary(&config.git.binary));
        repo.overlay = config.overlay()?;
        if config.audit.enabled {
            let logger = match &config.audit.path {
                Some(log_path) => AuditLogger::with_path(log_path)?,
                None => AuditLogger::new()?,
            };
            repo.audit = Some(logger);
        }
        Ok(repo)
    }

    /// Write every executed command to `logger`
    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Output of the most recent successful invocation
    pub fn last_output(&self) -> Option<&str> {
        self.history.last_output()
    }

    /// Default options currently applied to `operation`
    pub fn defaults(&self, operation: Operation) -> DefaultOptions {
        self.overlay.get(operation)
    }

    /// Replace the default options applied to `operation`
    pub fn set_defaults(&mut self, operation: Operation, options: DefaultOptions) -> &mut Self {
        self.overlay.set(operation, options);
        self
    }

    /// Execute an arbitrary argument vector, bypassing default options
    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> GitResult<String> {
        let args = args.iter().map(|a| a.as_ref().to_string()).collect();
        self.invoke(Invocation::Args(args))
    }

    /// Execute a single literal command token such as `--version`
    pub fn run_command(&mut self, command: &str) -> GitResult<String> {
        self.invoke(Invocation::Raw(command.to_string()))
    }

    fn execute(
        &mut self,
        operation: Operation,
        options: &[&str],
        positional: &[&str],
    ) -> GitResult<String> {
        let args = command::assemble(&self.overlay, operation, options, positional);
        self.invoke(Invocation::Args(args))
    }

    fn invoke(&mut self, invocation: Invocation) -> GitResult<String> {
        let args = match &invocation {
            Invocation::Args(args) => args.clone(),
            Invocation::Raw(command) => vec![command.clone()],
        };

        let result = self.executor.execute(&args, &self.path);
        self.write_audit(&args, &result);
        let output = result?;

        let stdout = self.history.record(invocation, output.stdout).to_string();
        debug!(entries = self.history.len(), "recorded git invocation");
        Ok(stdout)
    }

    fn write_audit(&self, args: &[String], result: &GitResult<CommandOutput>) {
        let Some(logger) = &self.audit else {
            return;
        };

        let exit_code = match result {
            Ok(output) => output.exit_code,
            Err(GitError::CommandFailed { exit_code, .. }) => *exit_code,
            Err(_) => -1,
        };
        let command = format!("git {}", args.join(" "));
        if let Err(e) = logger.log_command(&command, &self.path, exit_code) {
            warn!(error = %e, "failed to write audit log");
        }
    }

    /// Initialize the repository; does nothing if one already exists
    pub fn init(&mut self, options: &[&str]) -> GitResult<&mut Self> {
        if Self::is_repository(&self.path) {
            debug!(path = %self.path.display(), "repository already initialized");
            return Ok(self);
        }
        self.execute(Operation::Init, options, &[])?;
        Ok(self)
    }

    pub fn add(&mut self, paths: &[&str], options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Add, options, paths)?;
        Ok(self)
    }

    pub fn remove(&mut self, paths: &[&str], options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Remove, options, paths)?;
        Ok(self)
    }

    pub fn mv(&mut self, from: &str, to: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Move, options, &[from, to])?;
        Ok(self)
    }

    pub fn commit(&mut self, message: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Commit, options, &["-m", message])?;
        Ok(self)
    }

    pub fn branch_add(&mut self, name: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::BranchAdd, options, &[name])?;
        Ok(self)
    }

    pub fn branch_delete(&mut self, name: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::BranchDelete, options, &[name])?;
        Ok(self)
    }

    pub fn branch_list(&mut self, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::BranchList, options, &[])
    }

    pub fn checkout(&mut self, target: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Checkout, options, &[target])?;
        Ok(self)
    }

    pub fn status(&mut self, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::Status, options, &[])
    }

    pub fn merge(&mut self, branch: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Merge, options, &[branch])?;
        Ok(self)
    }

    pub fn log(&mut self, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::Log, options, &[])
    }

    pub fn diff(&mut self, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::Diff, options, &[])
    }

    /// `targets` is the optional remote followed by refspecs
    pub fn pull(&mut self, targets: &[&str], options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Pull, options, targets)?;
        Ok(self)
    }

    pub fn push(&mut self, targets: &[&str], options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Push, options, targets)?;
        Ok(self)
    }

    pub fn fetch(&mut self, targets: &[&str], options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::Fetch, options, targets)?;
        Ok(self)
    }

    pub fn show(&mut self, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::Show, options, &[])
    }

    /// Raw `git config`; `args` is e.g. `["user.name", "A B"]` or `["--get", "user.name"]`
    pub fn config(&mut self, args: &[&str], options: &[&str]) -> GitResult<String> {
        self.execute(Operation::Config, options, args)
    }

    pub fn remote_add(&mut self, name: &str, url: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::RemoteAdd, options, &[name, url])?;
        Ok(self)
    }

    pub fn remote_rename(
        &mut self,
        old: &str,
        new: &str,
        options: &[&str],
    ) -> GitResult<&mut Self> {
        self.execute(Operation::RemoteRename, options, &[old, new])?;
        Ok(self)
    }

    pub fn remote_remove(&mut self, name: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::RemoteRemove, options, &[name])?;
        Ok(self)
    }

    /// `options` carries the mode: a branch name, `--auto` or `--delete`
    pub fn remote_set_head(&mut self, name: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::RemoteSetHead, options, &[name])?;
        Ok(self)
    }

    pub fn remote_set_branches(
        &mut self,
        name: &str,
        branches: &[&str],
        options: &[&str],
    ) -> GitResult<&mut Self> {
        let mut positional = vec![name];
        positional.extend_from_slice(branches);
        self.execute(Operation::RemoteSetBranches, options, &positional)?;
        Ok(self)
    }

    pub fn remote_get_url(&mut self, name: &str, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::RemoteGetUrl, options, &[name])
    }

    pub fn remote_set_url(
        &mut self,
        name: &str,
        url: &str,
        options: &[&str],
    ) -> GitResult<&mut Self> {
        self.execute(Operation::RemoteSetUrl, options, &[name, url])?;
        Ok(self)
    }

    pub fn remote_show(&mut self, name: &str, options: &[&str]) -> GitResult<String> {
        self.execute(Operation::RemoteShow, options, &[name])
    }

    pub fn remote_prune(&mut self, name: &str, options: &[&str]) -> GitResult<&mut Self> {
        self.execute(Operation::RemotePrune, options, &[name])?;
        Ok(self)
    }

    /// All configuration variables visible from this repository
    pub fn configs(&mut self) -> GitResult<ConfigMap> {
        let output = self.config(&[], &["--list"])?;
        parser::parse_config(&output)
    }

    pub fn branches(&mut self) -> GitResult<BranchMap> {
        let output = self.branch_list(&["--verbose"])?;
        parser::parse_branch_list(&output)
    }

    pub fn statuses(&mut self) -> GitResult<StatusMap> {
        let output = self.status(&["--porcelain"])?;
        parser::parse_status(&output)
    }

    /// Commit subjects keyed by abbreviated hash; empty before the first commit
    pub fn logs(&mut self) -> GitResult<LogMap> {
        match self.log(&["--oneline", "--no-decorate"]) {
            Ok(output) => parser::parse_log(&output),
            Err(e) if is_empty_repository(&e) => {
                debug!(path = %self.path.display(), "no commits yet, returning empty log");
                Ok(LogMap::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Version of the git binary behind this repository
    pub fn version(&mut self) -> GitResult<GitVersion> {
        let output = self.run_command("--version")?;
        GitVersion::parse(&output)
    }
}

fn is_empty_repository(err: &GitError) -> bool {
    err.stderr()
        .is_some_and(|stderr| NO_COMMITS_MARKERS.iter().any(|m| stderr.contains(m)))
}
