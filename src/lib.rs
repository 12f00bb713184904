pub mod audit;
pub mod config;
pub mod error;
pub mod git;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult, GitError, GitResult, OutputKind};
pub use git::{DefaultOptions, GitVersion, Operation, OptionValue, Repository};
