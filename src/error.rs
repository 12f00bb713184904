use std::fmt;
use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;

/// Which parser rejected a line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Config,
    Branch,
    Status,
    Log,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::Config => "config",
            OutputKind::Branch => "branch",
            OutputKind::Status => "status",
            OutputKind::Log => "log",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Command '{command}' failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Failed to execute git: {0}")]
    SpawnFailed(#[source] io::Error),

    #[error("Failed to parse git {kind} output: unexpected line '{line}'")]
    Parse {
        kind: OutputKind,
        line: String,
        output: String,
    },

    #[error("Git version {0} is too old. Minimum required: 2.20")]
    GitVersionTooOld(String),

    #[error("Failed to detect git version: {0}")]
    GitVersionDetectionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl GitError {
    /// The external process ran (or could not be started) and did not succeed
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, GitError::CommandFailed { .. } | GitError::SpawnFailed(_))
    }

    /// Output was produced but did not have the shape its parser expects
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, GitError::Parse { .. })
    }

    /// Captured standard error of a failed command, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Top-level application error that wraps all module-specific errors
///
/// Module errors convert into AppError through `From`, so application code can
/// use `?` across git and configuration calls.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
