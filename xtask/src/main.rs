//! Build automation tasks for the mediasort workspace.
//!
//! Run with: `cargo run -p xtask -- <command>`
//!
//! # Available Commands
//!
//! - `check`: Run all checks (fmt --check, clippy, test)
//! - `fmt`: Format code with rustfmt
//! - `lint`: Run clippy with all targets
//! - `test`: Run all tests
//! - `build`: Build release binary
//! - `clean`: Clean build artifacts
//! - `doc`: Generate documentation

// xtask is a build tool - printing to stderr is expected
#![allow(clippy::print_stderr)]

use std::process::Command;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

/// Build automation for mediasort
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for mediasort")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks (fmt --check, clippy, test)
    Check,
    /// Format code with rustfmt
    Fmt {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy lints
    Lint {
        /// Automatically fix lint warnings
        #[arg(long)]
        fix: bool,
    },
    /// Run all tests
    Test {
        /// Run tests with release optimizations
        #[arg(long)]
        release: bool,
    },
    /// Build release binary
    Build {
        /// Build in debug mode
        #[arg(long)]
        debug: bool,
    },
    /// Clean build artifacts
    Clean,
    /// Generate documentation
    Doc {
        /// Open in browser after building
        #[arg(long)]
        open: bool,
    },
}

/// Runs `cargo` with the given arguments, failing on a non-zero exit.
fn cargo(args: &[&str]) -> Result<()> {
    eprintln!("> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {} failed with {status}", args.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo(&["fmt", "--all", "--", "--check"])?;
            cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
            cargo(&["test", "--workspace"])?;
        }
        Commands::Fmt { check } => {
            if check {
                cargo(&["fmt", "--all", "--", "--check"])?;
            } else {
                cargo(&["fmt", "--all"])?;
            }
        }
        Commands::Lint { fix } => {
            if fix {
                cargo(&["clippy", "--workspace", "--all-targets", "--fix", "--allow-dirty"])?;
            } else {
                cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
            }
        }
        Commands::Test { release } => {
            if release {
                cargo(&["test", "--workspace", "--release"])?;
            } else {
                cargo(&["test", "--workspace"])?;
            }
        }
        Commands::Build { debug } => {
            if debug {
                cargo(&["build", "-p", "ms-cli"])?;
            } else {
                cargo(&["build", "-p", "ms-cli", "--release"])?;
            }
        }
        Commands::Clean => {
            cargo(&["clean"])?;
        }
        Commands::Doc { open } => {
            if open {
                cargo(&["doc", "--workspace", "--no-deps", "--open"])?;
            } else {
                cargo(&["doc", "--workspace", "--no-deps"])?;
            }
        }
    }

    Ok(())
}
