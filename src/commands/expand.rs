//! @acp:module "Expand Command"
//! @acp:summary "Expand or compact availability annotations across the package"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::Config;
use crate::expand::ExpansionMode;
use crate::rewrite::{RewriteSummary, Rewriter};

/// Options for the expand command
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Package root containing the source directories
    pub directory: PathBuf,
    /// Emit real attributes instead of comment expansions
    pub attributes: bool,
    /// Show diffs instead of writing files
    pub dry_run: bool,
    /// Print the summary as JSON
    pub json: bool,
    /// Verbose output
    pub verbose: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            attributes: false,
            dry_run: false,
            json: false,
            verbose: false,
        }
    }
}

impl ExpandOptions {
    pub fn to_config(&self) -> Config {
        Config::for_root(&self.directory)
            .with_mode(ExpansionMode::from_attributes_flag(self.attributes))
            .with_dry_run(self.dry_run)
    }
}

/// Execute the expand command
pub fn execute_expand(options: ExpandOptions) -> Result<RewriteSummary> {
    let config = options.to_config();
    let rewriter = Rewriter::new(config).context("Failed to build annotation patterns")?;
    let summary = rewriter.run()?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(summary);
    }

    if options.dry_run {
        for change in &summary.changes {
            if let Some(diff) = &change.diff {
                print!("{}", diff);
            }
        }
    }

    if options.verbose {
        for change in &summary.changes {
            eprintln!(
                "  {} ({} lines)",
                change.path.display(),
                change.changed_lines.len()
            );
        }
    }

    let verb = if options.dry_run { "Would update" } else { "Updated" };
    eprintln!(
        "{} {} {} annotations in {} of {} files ({} mode)",
        style("✓").green(),
        verb,
        summary.lines_changed(),
        summary.files_changed(),
        summary.files_scanned,
        style(summary.mode).cyan()
    );

    Ok(summary)
}
