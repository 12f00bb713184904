pub mod command;
pub mod executor;
pub mod history;
pub mod operation;
pub mod options;
pub mod parser;
pub mod repository;
pub mod version;

// Re-export commonly used types
pub use command::assemble;
pub use executor::{CommandOutput, Executor, GitExecutor};
pub use history::{History, HistoryEntry, Invocation};
pub use operation::Operation;
pub use options::{DefaultOptions, OptionOverlay, OptionValue};
pub use parser::{
    BranchEntry, BranchMap, ConfigMap, LogMap, StatusMap, parse_branch_list, parse_config,
    parse_log, parse_status, unquote_path,
};
pub use repository::Repository;
pub use version::GitVersion;
