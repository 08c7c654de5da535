//! One-shot codemod for the Dropbox upload service source.
//!
//! Normalizes the mangled log prefixes to `[dropbox]` strings and rewrites
//! `uploadFileToDropbox` with a direct-token fast path. Refuses to run
//! against a file that does not match expectations, and never writes on a
//! rejected run.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dropfix::apply::{ApplyOptions, ApplyOutcome, apply_from_root};
use dropfix::check::{CheckOutcome, check_from_root};
use dropfix::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "dropfix",
    version,
    about = "One-shot codemod for the Dropbox upload service source"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize log prefixes and add the direct-token fast path, in place.
    Apply {
        /// Target file, relative to the current directory.
        #[arg(long)]
        target: Option<PathBuf>,
        /// Skip the backup copy.
        #[arg(long)]
        no_backup: bool,
        /// Write a JSON patch report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Report what apply would do without writing anything.
    Check {
        /// Target file, relative to the current directory.
        #[arg(long)]
        target: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve current directory")?;
    match cli.command {
        Command::Apply {
            target,
            no_backup,
            report,
        } => {
            let options = ApplyOptions {
                target,
                no_backup,
                report,
            };
            let outcome = apply_from_root(&root, &options)?;
            Ok(report_apply(&outcome))
        }
        Command::Check { target } => {
            let outcome = check_from_root(&root, target.as_deref())?;
            Ok(report_check(&outcome))
        }
    }
}

fn report_apply(outcome: &ApplyOutcome) -> i32 {
    match outcome {
        ApplyOutcome::Applied {
            target,
            backup,
            report,
        } => {
            println!(
                "patched {} ({} log prefixes normalized, helper signature {})",
                target.display(),
                report.prefix_replacements,
                if report.signature_threaded {
                    "threaded"
                } else {
                    "unchanged"
                }
            );
            if let Some(backup) = backup {
                println!("backup written to {}", backup.display());
            }
            exit_codes::OK
        }
        ApplyOutcome::AlreadyPatched { target } => {
            eprintln!(
                "{}: rewrite marker already present; refusing to patch twice",
                target.display()
            );
            exit_codes::ALREADY_PATCHED
        }
        ApplyOutcome::Missing { target } => {
            eprintln!(
                "{}: uploadFileToDropbox block not found; file left untouched",
                target.display()
            );
            exit_codes::UNMATCHED
        }
    }
}

fn report_check(outcome: &CheckOutcome) -> i32 {
    match outcome {
        CheckOutcome::Ready { target, report } => {
            println!(
                "{} is patchable ({} log prefixes to normalize)",
                target.display(),
                report.prefix_replacements
            );
            exit_codes::OK
        }
        CheckOutcome::AlreadyPatched { target } => {
            eprintln!("{}: rewrite marker already present", target.display());
            exit_codes::ALREADY_PATCHED
        }
        CheckOutcome::Missing { target } => {
            eprintln!(
                "{}: uploadFileToDropbox block not found",
                target.display()
            );
            exit_codes::UNMATCHED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_apply() {
        let cli = Cli::parse_from(["dropfix", "apply"]);
        assert!(matches!(
            cli.command,
            Command::Apply {
                target: None,
                no_backup: false,
                report: None
            }
        ));
    }

    #[test]
    fn parse_apply_with_flags() {
        let cli = Cli::parse_from([
            "dropfix",
            "apply",
            "--target",
            "lib/upload.ts",
            "--no-backup",
            "--report",
            "report.json",
        ]);
        match cli.command {
            Command::Apply {
                target,
                no_backup,
                report,
            } => {
                assert_eq!(target, Some(PathBuf::from("lib/upload.ts")));
                assert!(no_backup);
                assert_eq!(report, Some(PathBuf::from("report.json")));
            }
            Command::Check { .. } => panic!("expected apply"),
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["dropfix", "check"]);
        assert!(matches!(cli.command, Command::Check { target: None }));
    }
}
