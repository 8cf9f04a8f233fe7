#![forbid(unsafe_code)]
//! expand-availability command line interface

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use availability::commands::{execute_expand, ExpandOptions};

/// Expand availability macros.
///
/// Run from the package root. Rewrites `/*System X.Y.Z*/` annotations in
/// `Sources/` and `Tests/` in place.
#[derive(Parser)]
#[command(name = "expand-availability")]
#[command(version)]
struct Cli {
    /// Add @available attributes
    #[arg(long)]
    attributes: bool,

    /// Package root directory
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Print the changes as diffs without writing files
    #[arg(long)]
    dry_run: bool,

    /// Output the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ExpandOptions {
        directory: cli.directory,
        attributes: cli.attributes,
        dry_run: cli.dry_run,
        json: cli.json,
        verbose: cli.verbose,
    };

    if let Err(err) = execute_expand(options) {
        eprintln!("{} {:#}", style("✗").red(), err);
        std::process::exit(1);
    }
}
