use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Appends one line per executed git command to a file on disk
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an AuditLogger writing to ~/.config/gitfacade/audit.log
    pub fn new() -> io::Result<Self> {
        Self::with_path(Self::default_log_path()?)
    }

    /// Create an AuditLogger with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        // Ensure directory exists
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    fn default_log_path() -> io::Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set")
        })?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("gitfacade")
            .join("audit.log"))
    }

    /// Log a command execution
    ///
    /// `exit_code` is -1 when the process could not be started.
    pub fn log_command(&self, command: &str, repo_path: &Path, exit_code: i32) -> io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());

        // Keep one entry per line even for multi-line commit messages
        let command = command.replace('\n', "\\n");
        let log_entry = format!(
            "[{}] [{}] [{}] [exit:{}] {}\n",
            timestamp,
            user,
            repo_path.display(),
            exit_code,
            command
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(log_entry.as_bytes())?;
        file.flush()
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        if fs::metadata(&self.log_path)?.len() > MAX_LOG_SIZE {
            // audit.log -> audit.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
