use serde::{Deserialize, Serialize};
use std::fmt;

/// A semantic git operation
///
/// Several operations share one git sub-command (all branch operations run
/// `git branch`), so the identifier is kept apart from the tokens it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Init,
    Add,
    Remove,
    Move,
    Commit,
    BranchAdd,
    BranchDelete,
    BranchList,
    Checkout,
    Status,
    Merge,
    Log,
    Diff,
    Pull,
    Push,
    Fetch,
    Show,
    Config,
    RemoteAdd,
    RemoteRename,
    RemoteRemove,
    RemoteSetHead,
    RemoteSetBranches,
    RemoteGetUrl,
    RemoteSetUrl,
    RemoteShow,
    RemotePrune,
}

impl Operation {
    pub const ALL: [Operation; 27] = [
        Operation::Init,
        Operation::Add,
        Operation::Remove,
        Operation::Move,
        Operation::Commit,
        Operation::BranchAdd,
        Operation::BranchDelete,
        Operation::BranchList,
        Operation::Checkout,
        Operation::Status,
        Operation::Merge,
        Operation::Log,
        Operation::Diff,
        Operation::Pull,
        Operation::Push,
        Operation::Fetch,
        Operation::Show,
        Operation::Config,
        Operation::RemoteAdd,
        Operation::RemoteRename,
        Operation::RemoteRemove,
        Operation::RemoteSetHead,
        Operation::RemoteSetBranches,
        Operation::RemoteGetUrl,
        Operation::RemoteSetUrl,
        Operation::RemoteShow,
        Operation::RemotePrune,
    ];

    /// Literal git tokens this operation starts with
    ///
    /// The first token is always the git sub-command itself; remote and
    /// branch-delete operations carry their mode word along with it.
    pub fn subcommand(self) -> &'static [&'static str] {
        match self {
            Operation::Init => &["init"],
            Operation::Add => &["add"],
            Operation::Remove => &["rm"],
            Operation::Move => &["mv"],
            Operation::Commit => &["commit"],
            Operation::BranchAdd => &["branch"],
            Operation::BranchDelete => &["branch", "--delete"],
            Operation::BranchList => &["branch"],
            Operation::Checkout => &["checkout"],
            Operation::Status => &["status"],
            Operation::Merge => &["merge"],
            Operation::Log => &["log"],
            Operation::Diff => &["diff"],
            Operation::Pull => &["pull"],
            Operation::Push => &["push"],
            Operation::Fetch => &["fetch"],
            Operation::Show => &["show"],
            Operation::Config => &["config"],
            Operation::RemoteAdd => &["remote", "add"],
            Operation::RemoteRename => &["remote", "rename"],
            Operation::RemoteRemove => &["remote", "remove"],
            Operation::RemoteSetHead => &["remote", "set-head"],
            Operation::RemoteSetBranches => &["remote", "set-branches"],
            Operation::RemoteGetUrl => &["remote", "get-url"],
            Operation::RemoteSetUrl => &["remote", "set-url"],
            Operation::RemoteShow => &["remote", "show"],
            Operation::RemotePrune => &["remote", "prune"],
        }
    }

    /// Look up an operation by its configuration name
    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Name used for this operation in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::Move => "move",
            Operation::Commit => "commit",
            Operation::BranchAdd => "branch_add",
            Operation::BranchDelete => "branch_delete",
            Operation::BranchList => "branch_list",
            Operation::Checkout => "checkout",
            Operation::Status => "status",
            Operation::Merge => "merge",
            Operation::Log => "log",
            Operation::Diff => "diff",
            Operation::Pull => "pull",
            Operation::Push => "push",
            Operation::Fetch => "fetch",
            Operation::Show => "show",
            Operation::Config => "config",
            Operation::RemoteAdd => "remote_add",
            Operation::RemoteRename => "remote_rename",
            Operation::RemoteRemove => "remote_remove",
            Operation::RemoteSetHead => "remote_set_head",
            Operation::RemoteSetBranches => "remote_set_branches",
            Operation::RemoteGetUrl => "remote_get_url",
            Operation::RemoteSetUrl => "remote_set_url",
            Operation::RemoteShow => "remote_show",
            Operation::RemotePrune => "remote_prune",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_operation_has_a_subcommand() {
        for op in Operation::ALL {
            assert!(!op.subcommand().is_empty(), "{op} has no sub-command");
        }
    }

    #[test]
    fn test_branch_operations_share_subcommand() {
        assert_eq!(Operation::BranchAdd.subcommand()[0], "branch");
        assert_eq!(Operation::BranchDelete.subcommand()[0], "branch");
        assert_eq!(Operation::BranchList.subcommand()[0], "branch");
    }

    #[test]
    fn test_remote_operations_carry_mode() {
        assert_eq!(Operation::RemoteAdd.subcommand(), &["remote", "add"]);
        assert_eq!(Operation::RemoteSetHead.subcommand(), &["remote", "set-head"]);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn test_from_name_round_trips() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("rebase"), None);
    }

    #[test]
    fn test_name_matches_serde() {
        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.name()));
        }
    }
}
