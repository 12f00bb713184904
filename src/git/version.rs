use crate::error::{GitError, GitResult};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

/// Minimum required git version
const MIN_GIT_VERSION: (u32, u32) = (2, 20);

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git version (?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<patch>\d+))?").unwrap()
});

/// Represents a git version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GitVersion {
    /// Detect the version of the git binary at `binary`
    pub fn detect<P: AsRef<Path>>(binary: P) -> GitResult<Self> {
        let output = Command::new(binary.as_ref())
            .arg("--version")
            .output()
            .map_err(|e| {
                GitError::GitVersionDetectionFailed(format!("Failed to execute git: {}", e))
            })?;

        if !output.status.success() {
            return Err(GitError::GitVersionDetectionFailed(
                "git --version command failed".to_string(),
            ));
        }

        Self::parse(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse git version from output like "git version 2.39.2.windows.1"
    pub fn parse(version_str: &str) -> GitResult<Self> {
        let trimmed = version_str.trim();
        let caps = VERSION_REGEX
            .captures(trimmed)
            .ok_or_else(|| {
                GitError::GitVersionDetectionFailed(format!(
                    "Unexpected git version format: {}",
                    trimmed
                ))
            })?;

        // Each group is a bounded run of digits; only overflow can fail here
        let number = |name: &str| -> GitResult<u32> {
            caps.name(name).map_or(Ok(0), |m| {
                m.as_str().parse::<u32>().map_err(|_| {
                    let detail = format!("Invalid {} version: {}", name, m.as_str());
                    GitError::GitVersionDetectionFailed(detail)
                })
            })
        };

        Ok(GitVersion {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
        })
    }

    /// Check if this version meets minimum requirements
    pub fn is_supported(&self) -> bool {
        (self.major, self.minor) >= MIN_GIT_VERSION
    }

    /// Detect the version at `binary` and reject anything too old
    pub fn validate<P: AsRef<Path>>(binary: P) -> GitResult<Self> {
        let version = Self::detect(binary)?;

        if !version.is_supported() {
            return Err(GitError::GitVersionTooOld(version.to_string()));
        }

        Ok(version)
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
