//! Stable exit codes for dropfix CLI commands.

/// Patch applied, or `dropfix check` found the target patchable.
pub const OK: i32 = 0;
/// Command failed due to I/O, config, or other unexpected errors.
pub const INVALID: i32 = 1;
/// Expected upload function block not found; target left untouched.
pub const UNMATCHED: i32 = 2;
/// Rewrite marker already present; target left untouched.
pub const ALREADY_PATCHED: i32 = 3;
