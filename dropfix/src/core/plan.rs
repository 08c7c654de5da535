//! The compiled-in patch plan: prefix substitutions, block rewrite, helper
//! signature threading.

use serde::Serialize;

use crate::core::block::{BlockScan, scan_upload_block, splice_rewrite};
use crate::core::substitutions::{LOG_PREFIX_FIXES, SubstitutionHit, apply_substitutions};

/// Threads the optional `directToken` parameter into the direct-upload
/// helper so the rewritten block can pass the client token through.
const HELPER_SIGNATURE_FROM: &str = "const uploadToDropboxDirect = async (file: File): Promise<DropboxUploadResult> => {\n  const accessToken = import.meta.env.VITE_DROPBOX_ACCESS_TOKEN;";
const HELPER_SIGNATURE_TO: &str = "const uploadToDropboxDirect = async (file: File, directToken?: string): Promise<DropboxUploadResult> => {\n  const accessToken = directToken || import.meta.env.VITE_DROPBOX_ACCESS_TOKEN;";

/// Summary of what one plan application changed (or would change).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Per-prefix substitution hits, in table order.
    pub prefix_hits: Vec<SubstitutionHit>,
    /// Total occurrences rewritten by the prefix table.
    pub prefix_replacements: usize,
    /// The legacy upload block was replaced.
    pub block_rewritten: bool,
    /// The helper signature gained the `directToken` parameter.
    pub signature_threaded: bool,
}

/// Result of applying the plan to one target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// All edits applied; `text` is the full rewritten file.
    Applied { text: String, report: PatchReport },
    /// Rewrite marker already present; nothing to do.
    AlreadyPatched,
    /// Expected upload function block not found.
    Missing,
}

/// Apply the full plan to `text`.
///
/// Pure; the caller decides whether `Applied` text is written back. The
/// prefix substitutions run first so the block scan sees normalized text,
/// preserving the original edit order. `AlreadyPatched` and `Missing` are
/// returned before any output text exists, so a rejected run can never leak
/// a partial edit.
pub fn apply_patch(text: &str) -> PatchOutcome {
    let (substituted, prefix_hits) = apply_substitutions(text, LOG_PREFIX_FIXES);

    let range = match scan_upload_block(&substituted) {
        BlockScan::Legacy(range) => range,
        BlockScan::Rewritten => return PatchOutcome::AlreadyPatched,
        BlockScan::Missing => return PatchOutcome::Missing,
    };

    let rewritten = splice_rewrite(&substituted, range);

    let signature_hits = rewritten.matches(HELPER_SIGNATURE_FROM).count();
    let threaded = if signature_hits > 0 {
        rewritten.replace(HELPER_SIGNATURE_FROM, HELPER_SIGNATURE_TO)
    } else {
        rewritten
    };

    let prefix_replacements = prefix_hits.iter().map(|hit| hit.count).sum();
    PatchOutcome::Applied {
        text: threaded,
        report: PatchReport {
            prefix_hits,
            prefix_replacements,
            block_rewritten: true,
            signature_threaded: signature_hits > 0,
        },
    }
}
