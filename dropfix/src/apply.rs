//! Orchestration for `dropfix apply`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::plan::{PatchOutcome, PatchReport, apply_patch};
use crate::io::config::load_config;
use crate::io::report::write_report;
use crate::io::target::{backup_target, read_target, write_target};

/// Name of the optional config file at the project root.
pub const CONFIG_FILE: &str = "dropfix.toml";

/// CLI-level options overriding `dropfix.toml`.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Override the configured target path.
    pub target: Option<PathBuf>,
    /// Skip the backup copy even if the config enables it.
    pub no_backup: bool,
    /// Write a JSON patch report to this path.
    pub report: Option<PathBuf>,
}

/// Structured apply outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Patch applied and written back.
    Applied {
        target: PathBuf,
        backup: Option<PathBuf>,
        report: PatchReport,
    },
    /// Rewrite marker already present; nothing written.
    AlreadyPatched { target: PathBuf },
    /// Expected upload block not found; nothing written.
    Missing { target: PathBuf },
}

/// Apply the patch to the target under `root`.
///
/// The backup, target, and report are only written once the in-memory patch
/// has fully succeeded, so a rejected run leaves the tree untouched.
pub fn apply_from_root(root: &Path, options: &ApplyOptions) -> Result<ApplyOutcome> {
    let cfg = load_config(&root.join(CONFIG_FILE))?;
    let target = root.join(options.target.as_ref().unwrap_or(&cfg.target));
    debug!(target = %target.display(), "loading target");
    let text = read_target(&target)?;

    let (patched, report) = match apply_patch(&text) {
        PatchOutcome::Applied { text, report } => (text, report),
        PatchOutcome::AlreadyPatched => return Ok(ApplyOutcome::AlreadyPatched { target }),
        PatchOutcome::Missing => return Ok(ApplyOutcome::Missing { target }),
    };

    let backup = if cfg.backup && !options.no_backup {
        Some(backup_target(&target)?)
    } else {
        None
    };
    write_target(&target, &patched)?;
    if let Some(report_path) = &options.report {
        write_report(&root.join(report_path), &report).context("write patch report")?;
    }

    info!(
        target = %target.display(),
        prefix_replacements = report.prefix_replacements,
        signature_threaded = report.signature_threaded,
        "patch applied"
    );
    Ok(ApplyOutcome::Applied {
        target,
        backup,
        report,
    })
}
