//! Archiving of generated reports under a commit-tagged file name.
//!
//! The report at `<root>/report.md` is copied to
//! `<root>/reports/report_<commit>.md` and a provenance footer naming the
//! commit is appended. Archiving the same commit twice overwrites the same
//! destination with identical bytes.

use crate::{
    error::ArchiveError,
    vcs::{
        CommitId,
        CommitResolver,
        resolve_commit_or_unknown,
    },
};
use clap::{
    Parser,
    ValueHint,
};
use colored::Colorize;
use lab_common::{
    args::CliArgs,
    success_json,
};
use serde_json::json;
use std::{
    fs::{
        self,
        OpenOptions,
    },
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};
use tracing::{
    debug,
    info,
};

/// Report file name, relative to the project root.
pub const DEFAULT_REPORT: &str = "report.md";

/// Archive directory name, relative to the project root.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Footer appended to every archived report.
pub fn footer(commit: &CommitId) -> String {
    format!("\n\n---\n**Report generated for commit:** `{commit}`\n")
}

/// File name of the archived copy for `commit`.
pub fn destination_file_name(commit: &CommitId) -> String {
    format!("report_{commit}.md")
}

/// Where to read the report from and where to archive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePlan {
    pub source: PathBuf,
    pub reports_dir: PathBuf,
    /// Directory the commit is resolved in.
    pub repo_dir: PathBuf,
}

impl ArchivePlan {
    /// Default layout below a project root.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            source: root.join(DEFAULT_REPORT),
            reports_dir: root.join(DEFAULT_REPORTS_DIR),
            repo_dir: root.to_path_buf(),
        }
    }
}

/// Result of an archive run that did not hit an I/O error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Archived {
        destination: PathBuf,
        commit: CommitId,
    },
    /// The source report does not exist; nothing was written.
    MissingSource { source: PathBuf },
}

/// Copies the report into the archive and appends the commit footer.
///
/// A missing source report is not an error: it is reported through
/// [`ArchiveOutcome::MissingSource`] and leaves the filesystem untouched.
pub fn archive_report(
    plan: &ArchivePlan,
    resolver: &dyn CommitResolver,
) -> Result<ArchiveOutcome, ArchiveError> {
    if !plan.source.exists() {
        debug!(source = %plan.source.display(), "report source missing");
        return Ok(ArchiveOutcome::MissingSource {
            source: plan.source.clone(),
        });
    }

    fs::create_dir_all(&plan.reports_dir).map_err(|source| {
        ArchiveError::CreateDir {
            path: plan.reports_dir.clone(),
            source,
        }
    })?;

    let commit = resolve_commit_or_unknown(resolver, &plan.repo_dir);
    let destination = plan.reports_dir.join(destination_file_name(&commit));

    fs::copy(&plan.source, &destination).map_err(|source| {
        ArchiveError::Copy {
            from: plan.source.clone(),
            to: destination.clone(),
            source,
        }
    })?;

    let append_err = |source| {
        ArchiveError::AppendFooter {
            path: destination.clone(),
            source,
        }
    };
    let mut file = OpenOptions::new()
        .append(true)
        .open(&destination)
        .map_err(append_err)?;
    file.write_all(footer(&commit).as_bytes())
        .map_err(append_err)?;

    info!(%commit, destination = %destination.display(), "report archived");
    Ok(ArchiveOutcome::Archived {
        destination,
        commit,
    })
}

/// Command-line arguments for archiving the current report.
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "archive",
    about = "Copy the report into reports/ tagged with the current commit hash"
)]
pub struct ArchiveArgs {
    /// Project root holding the report and the archive directory
    #[clap(
        long,
        env = "LAB_PROJECT_ROOT",
        value_hint = ValueHint::DirPath,
        default_value = "."
    )]
    pub root: PathBuf,

    /// Report to archive, relative to the project root
    #[clap(long, value_hint = ValueHint::FilePath, default_value = DEFAULT_REPORT)]
    pub report: PathBuf,

    /// Archive directory, relative to the project root
    #[clap(long, value_hint = ValueHint::DirPath, default_value = DEFAULT_REPORTS_DIR)]
    pub reports_dir: PathBuf,
}

impl ArchiveArgs {
    pub fn plan(&self) -> ArchivePlan {
        ArchivePlan {
            source: self.root.join(&self.report),
            reports_dir: self.root.join(&self.reports_dir),
            repo_dir: self.root.clone(),
        }
    }

    /// Runs the archiver and prints its outcome.
    pub fn run(
        &self,
        cli_args: &CliArgs,
        resolver: &dyn CommitResolver,
    ) -> Result<ArchiveOutcome, ArchiveError> {
        let outcome = archive_report(&self.plan(), resolver)?;
        Self::display_outcome(&outcome, cli_args.json_output());
        Ok(outcome)
    }

    fn display_outcome(outcome: &ArchiveOutcome, json_output: bool) {
        match (outcome, json_output) {
            (
                ArchiveOutcome::Archived {
                    destination,
                    commit,
                },
                true,
            ) => {
                println!(
                    "{}",
                    success_json(json!({
                        "destination": destination,
                        "commit": commit.as_str(),
                    }))
                );
            }
            (ArchiveOutcome::Archived { destination, .. }, false) => {
                println!(
                    "Report archived successfully at: {}",
                    destination.display().to_string().green()
                );
            }
            (ArchiveOutcome::MissingSource { source }, true) => {
                println!(
                    "{}",
                    json!({
                        "status": "skipped",
                        "error": { "message": format!("{} not found.", source.display()) },
                    })
                );
            }
            (ArchiveOutcome::MissingSource { source }, false) => {
                eprintln!("{} {} not found.", "Error:".red().bold(), source.display());
            }
        }
    }
}
