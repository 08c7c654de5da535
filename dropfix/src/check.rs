//! Orchestration for `dropfix check` (dry run).

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::apply::CONFIG_FILE;
use crate::core::plan::{PatchOutcome, PatchReport, apply_patch};
use crate::io::config::load_config;
use crate::io::target::read_target;

/// Structured check outcome. Nothing on disk changes either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Target matches expectations; `report` describes what apply would do.
    Ready { target: PathBuf, report: PatchReport },
    /// Rewrite marker already present.
    AlreadyPatched { target: PathBuf },
    /// Expected upload block not found.
    Missing { target: PathBuf },
}

/// Run the full patch in memory against the target under `root` and discard
/// the result.
pub fn check_from_root(root: &Path, target_override: Option<&Path>) -> Result<CheckOutcome> {
    let cfg = load_config(&root.join(CONFIG_FILE))?;
    let target = root.join(target_override.unwrap_or(cfg.target.as_path()));
    debug!(target = %target.display(), "checking target");
    let text = read_target(&target)?;

    let outcome = match apply_patch(&text) {
        PatchOutcome::Applied { report, .. } => CheckOutcome::Ready { target, report },
        PatchOutcome::AlreadyPatched => CheckOutcome::AlreadyPatched { target },
        PatchOutcome::Missing => CheckOutcome::Missing { target },
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{ApplyOptions, apply_from_root};
    use crate::test_support::{
        TargetFixture, legacy_service_source, service_source_without_upload_block,
    };

    #[test]
    fn check_reports_patchable_target_without_writing() {
        let source = legacy_service_source();
        let fixture = TargetFixture::with_source(&source).expect("fixture");

        let outcome = check_from_root(fixture.root(), None).expect("check");
        match outcome {
            CheckOutcome::Ready { report, .. } => {
                assert!(report.block_rewritten);
                assert!(report.prefix_replacements > 0);
            }
            other => panic!("expected ready outcome, got {other:?}"),
        }

        assert_eq!(fixture.read_target(), source);
        assert!(
            !fixture
                .target_path()
                .with_file_name("dropboxUploadService.backup.ts")
                .exists()
        );
    }

    #[test]
    fn check_reports_already_patched_target() {
        let fixture = TargetFixture::with_source(&legacy_service_source()).expect("fixture");
        apply_from_root(fixture.root(), &ApplyOptions::default()).expect("apply");

        let outcome = check_from_root(fixture.root(), None).expect("check");
        assert!(matches!(outcome, CheckOutcome::AlreadyPatched { .. }));
    }

    #[test]
    fn check_reports_missing_block() {
        let fixture =
            TargetFixture::with_source(&service_source_without_upload_block()).expect("fixture");

        let outcome = check_from_root(fixture.root(), None).expect("check");
        assert!(matches!(outcome, CheckOutcome::Missing { .. }));
    }

    #[test]
    fn check_errors_on_unreadable_target() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = check_from_root(temp.path(), None).expect_err("check should fail");
        assert!(err.to_string().contains("read target"));
    }
}
