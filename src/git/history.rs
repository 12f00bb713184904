/// What was issued for a recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// An assembled argument vector
    Args(Vec<String>),
    /// A single literal command token
    Raw(String),
}

/// One successful invocation and the output it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    invocation: Invocation,
    output: String,
}

impl HistoryEntry {
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// The invocation rendered as a `git ...` command line
    pub fn command_line(&self) -> String {
        match &self.invocation {
            Invocation::Args(args) => format!("git {}", args.join(" ")),
            Invocation::Raw(command) => format!("git {command}"),
        }
    }
}

/// Append-only log of invocations issued through one façade
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and hand the output back to the caller
    pub fn record(&mut self, invocation: Invocation, output: String) -> &str {
        self.entries.push(HistoryEntry { invocation, output });
        let last = self.entries.len() - 1;
        &self.entries[last].output
    }

    pub fn last_output(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.output.as_str())
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Invocation {
        Invocation::Args(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.last_output(), None);
        assert!(history.all().is_empty());
    }

    #[test]
    fn test_record_returns_output() {
        let mut history = History::new();
        let output = history.record(args(&["status"]), "M  a.txt".to_string());
        assert_eq!(output, "M  a.txt");
    }

    #[test]
    fn test_entries_keep_order() {
        let mut history = History::new();
        history.record(args(&["add", "a.txt"]), String::new());
        history.record(args(&["commit", "-m", "first"]), "[main abc] first".to_string());
        history.record(Invocation::Raw("--version".to_string()), "git version 2.43.0".to_string());

        assert_eq!(history.len(), 3);
        assert_eq!(history.last_output(), Some("git version 2.43.0"));

        let lines: Vec<String> = history.iter().map(HistoryEntry::command_line).collect();
        assert_eq!(
            lines,
            vec!["git add a.txt", "git commit -m first", "git --version"]
        );
        assert_eq!(history.all()[1].output(), "[main abc] first");
        assert_eq!(history.all()[0].invocation(), &args(&["add", "a.txt"]));
    }
}
