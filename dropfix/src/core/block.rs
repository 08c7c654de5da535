//! Legacy upload-function location and wholesale block rewrite.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Replacement body for `uploadFileToDropbox`, with the direct-token fast
/// path ahead of the API-route candidates.
const UPLOAD_REWRITE: &str = include_str!("snippets/upload_fast_path.ts");

/// First line unique to the rewritten block; its presence means the target
/// has already been patched.
pub const REWRITE_MARKER: &str =
    "const directToken = import.meta.env.VITE_DROPBOX_ACCESS_TOKEN as string | undefined;";

/// Matches the legacy block from its exported signature through the closing
/// `throw` and brace. Non-greedy, so the match ends at the first closing
/// statement after the signature.
static LEGACY_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"export const uploadFileToDropbox = async \(file: File\): Promise<DropboxUploadResult> => \{[\s\S]*?throw lastErr \|\| new Error\('Dropbox upload failed via all methods'\);\n\};",
    )
    .expect("legacy block pattern should be valid")
});

/// Scan result for the upload function block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockScan {
    /// Legacy block found at this byte range.
    Legacy(Range<usize>),
    /// Rewrite marker already present; the target was patched before.
    Rewritten,
    /// Neither the legacy block nor the rewrite marker is present.
    Missing,
}

/// Locate the legacy upload block.
///
/// The rewrite marker is checked first: the rewritten block keeps the same
/// signature and closing statement, so the regex would match its own output
/// and a re-run would silently re-edit the file.
pub fn scan_upload_block(text: &str) -> BlockScan {
    if text.contains(REWRITE_MARKER) {
        return BlockScan::Rewritten;
    }
    match LEGACY_BLOCK_RE.find(text) {
        Some(found) => BlockScan::Legacy(found.range()),
        None => BlockScan::Missing,
    }
}

/// Replace `range` with the rewritten block, leaving the surrounding text
/// byte-for-byte intact.
pub fn splice_rewrite(text: &str, range: Range<usize>) -> String {
    let rewrite = UPLOAD_REWRITE.trim_end();
    let mut out = String::with_capacity(text.len() - range.len() + rewrite.len());
    out.push_str(&text[..range.start]);
    out.push_str(rewrite);
    out.push_str(&text[range.end..]);
    out
}
