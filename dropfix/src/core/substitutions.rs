//! Ordered literal substitutions for legacy mis-encoded log prefixes.
//!
//! The legacy service logged with emoji prefixes that survived an encoding
//! round-trip as `?` runs. Each entry rewrites one mangled prefix to its
//! normalized `[dropbox]` form, in the order the prefixes appear in the
//! legacy file.

use serde::Serialize;

/// One literal find/replace pair.
#[derive(Debug, Clone, Copy)]
pub struct Substitution {
    pub from: &'static str,
    pub to: &'static str,
}

/// Legacy log prefixes, in the order the original file introduced them.
pub const LOG_PREFIX_FIXES: &[Substitution] = &[
    Substitution {
        from: "?? Starting Dropbox file upload:",
        to: "[dropbox] Starting Dropbox file upload:",
    },
    Substitution {
        from: "?? Attempting Dropbox upload via:",
        to: "[dropbox] Attempting Dropbox upload via:",
    },
    Substitution {
        from: "?? Dropbox upload successful:",
        to: "[dropbox] Dropbox upload successful:",
    },
    Substitution {
        from: "? Dropbox upload failed:",
        to: "[dropbox] upload failed:",
    },
    Substitution {
        from: "? Dropbox upload error:",
        to: "[dropbox] upload error:",
    },
    Substitution {
        from: "? Dropbox response missing URL:",
        to: "[dropbox] response missing URL:",
    },
    Substitution {
        from: "? Dropbox share link creation failed:",
        to: "[dropbox] share link creation failed:",
    },
    Substitution {
        from: "?? Shareable link created:",
        to: "[dropbox] shareable link created:",
    },
    Substitution {
        from: "?? Attempting client-side Dropbox upload...",
        to: "[dropbox] Attempting client-side Dropbox upload...",
    },
    Substitution {
        from: "?? File uploaded to Dropbox:",
        to: "[dropbox] File uploaded to Dropbox:",
    },
];

/// Occurrence count for one applied substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionHit {
    pub from: String,
    pub to: String,
    pub count: usize,
}

/// Apply `subs` in order, returning the rewritten text and per-entry hits.
///
/// Entries with zero occurrences still appear in the hit list with
/// `count == 0` so reports stay positionally stable. Literal replacement
/// rewrites every occurrence, so a second pass over the output is a no-op.
pub fn apply_substitutions(text: &str, subs: &[Substitution]) -> (String, Vec<SubstitutionHit>) {
    let mut out = text.to_string();
    let mut hits = Vec::with_capacity(subs.len());
    for sub in subs {
        let count = out.matches(sub.from).count();
        if count > 0 {
            out = out.replace(sub.from, sub.to);
        }
        hits.push(SubstitutionHit {
            from: sub.from.to_string(),
            to: sub.to.to_string(),
            count,
        });
    }
    (out, hits)
}
