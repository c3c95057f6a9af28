//! Commit identifier lookup for tagging archived reports.

use crate::error::VcsError;
use colored::Colorize;
use std::{
    fmt,
    io::ErrorKind,
    path::Path,
    process::Command,
};
use tracing::{
    debug,
    warn,
};

/// Identifier used when the commit cannot be resolved.
pub const UNKNOWN_COMMIT: &str = "unknown";

/// Short commit identifier, or [`UNKNOWN_COMMIT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_COMMIT.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_COMMIT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the short hash of the checked-out commit.
pub trait CommitResolver {
    fn short_head(&self, repo_dir: &Path) -> Result<String, VcsError>;
}

/// Resolves the commit by shelling out to `git rev-parse --short HEAD`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCli {
    /// Uses `program` instead of `git` found on `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommitResolver for GitCli {
    fn short_head(&self, repo_dir: &Path) -> Result<String, VcsError> {
        debug!(program = %self.program, dir = %repo_dir.display(), "resolving short HEAD");

        let output = Command::new(&self.program)
            .args(["rev-parse", "--short", "HEAD"])
            .current_dir(repo_dir)
            .output()
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    VcsError::ToolNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    VcsError::Io {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if hash.is_empty() {
            return Err(VcsError::EmptyOutput {
                program: self.program.clone(),
            });
        }

        Ok(hash)
    }
}

/// Resolves the commit of `repo_dir`, falling back to [`UNKNOWN_COMMIT`].
///
/// Never fails: resolver errors are reported on stderr and replaced by the
/// fallback identifier.
pub fn resolve_commit_or_unknown(resolver: &dyn CommitResolver, repo_dir: &Path) -> CommitId {
    match resolver.short_head(repo_dir) {
        Ok(hash) => CommitId::new(hash),
        Err(err) => {
            warn!(error = %err, "could not resolve commit hash, using `{UNKNOWN_COMMIT}`");
            eprintln!("{} Could not get git commit hash: {err}", "Error:".red().bold());
            CommitId::unknown()
        }
    }
}
