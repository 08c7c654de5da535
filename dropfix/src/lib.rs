//! One-shot codemod for the Dropbox upload service source.
//!
//! Normalizes the legacy mis-encoded log prefixes to `[dropbox]`-prefixed
//! strings and rewrites `uploadFileToDropbox` to try a client-configured
//! access token before falling back to the API route. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic string edits (substitution table,
//!   block rewrite, patch plan). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, target file, report
//!   artifact). Isolated to keep the edit logic free of filesystem concerns.
//!
//! Orchestration modules ([`apply`], [`check`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod apply;
pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
