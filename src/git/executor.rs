use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Locale overrides so git's messages stay untranslated whatever the caller's
/// environment; stderr is matched against English text downstream
const LOCALE_ENV: [(&str, &str); 2] = [("LC_ALL", "C"), ("LANGUAGE", "")];

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Runs an argument vector against a working directory
///
/// Implementations block until the command finishes and impose no timeout.
/// A non-zero exit must come back as [`GitError::CommandFailed`] carrying the
/// captured stderr.
pub trait Executor: std::fmt::Debug {
    fn execute(&self, args: &[String], working_dir: &Path) -> GitResult<CommandOutput>;
}

/// Executes git commands as child processes
#[derive(Debug, Clone)]
pub struct GitExecutor {
    binary: PathBuf,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Create a GitExecutor that runs `git` from PATH
    pub fn new() -> Self {
        Self::with_binary("git")
    }

    /// Create a GitExecutor for a specific git binary
    pub fn with_binary<P: AsRef<Path>>(binary: P) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }

    /// Get the git binary this executor runs
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Process command output into CommandOutput struct
    fn process_output(&self, output: Output, args: &[String]) -> GitResult<CommandOutput> {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();

        debug!(exit_code, success, "git command finished");

        // Return error for failed commands
        if !success {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                exit_code,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
            success,
        })
    }
}

impl Executor for GitExecutor {
    fn execute(&self, args: &[String], working_dir: &Path) -> GitResult<CommandOutput> {
        debug!(?args, dir = %working_dir.display(), "running git");

        // Arguments go straight to the process, no shell in between
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(working_dir)
            .envs(LOCALE_ENV)
            .output()
            .map_err(GitError::SpawnFailed)?;

        self.process_output(output, args)
    }
}
