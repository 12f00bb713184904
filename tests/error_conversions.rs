use gitfacade::config::ConfigError;
use gitfacade::error::{AppError, AppResult, GitError, OutputKind};
use std::error::Error;

/// Test that GitError converts to AppError::Git
#[test]
fn test_git_error_converts_to_app_error() {
    let git_err = GitError::NotARepository;
    let app_err: AppError = git_err.into();
    assert!(matches!(app_err, AppError::Git(_)));
}

/// Test that ConfigError converts to AppError::Config
#[test]
fn test_config_error_converts_to_app_error() {
    let config_err = ConfigError::DirectoryNotFound;
    let app_err: AppError = config_err.into();
    assert!(matches!(app_err, AppError::Config(_)));
}

/// Test that std::io::Error converts to AppError::Io
#[test]
fn test_io_error_converts_to_app_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
    let app_err: AppError = io_err.into();
    assert!(matches!(app_err, AppError::Io(_)));
}

/// Test the ? operator across error types
#[test]
fn test_question_mark_operator() {
    fn returns_git_error() -> Result<(), GitError> {
        Err(GitError::NotARepository)
    }

    fn uses_question_mark() -> AppResult<()> {
        returns_git_error()?;
        Ok(())
    }

    let result = uses_question_mark();
    assert!(matches!(result, Err(AppError::Git(GitError::NotARepository))));
}

/// Execution and parse failures are told apart
#[test]
fn test_failure_kinds() {
    let failed = GitError::CommandFailed {
        command: "git checkout nope".to_string(),
        exit_code: 1,
        stderr: "error: pathspec 'nope' did not match".to_string(),
    };
    assert!(failed.is_execution_failure());
    assert!(!failed.is_parse_failure());
    assert_eq!(failed.stderr(), Some("error: pathspec 'nope' did not match"));

    let spawn = GitError::SpawnFailed(std::io::Error::new(std::io::ErrorKind::NotFound, "git"));
    assert!(spawn.is_execution_failure());
    assert!(spawn.source().is_some());

    let parse = GitError::Parse {
        kind: OutputKind::Status,
        line: "??".to_string(),
        output: "??".to_string(),
    };
    assert!(parse.is_parse_failure());
    assert!(!parse.is_execution_failure());
    assert_eq!(parse.stderr(), None);
}

/// Error messages carry the command and its stderr
#[test]
fn test_error_display() {
    let err = GitError::CommandFailed {
        command: "git log".to_string(),
        exit_code: 128,
        stderr: "fatal: bad revision".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Command 'git log' failed with exit code 128: fatal: bad revision"
    );

    let app_err: AppError = err.into();
    assert!(app_err.to_string().starts_with("Git error: Command 'git log'"));
    assert!(app_err.source().is_some());
}
