//! @acp:module "Rewrite Driver"
//! @acp:summary "Applies the expander to every discovered source file in place"
//! @acp:domain cli
//! @acp:layer service
//!
//! Files are processed one at a time. Each file is transformed fully in
//! memory and only written back once every line succeeded, so a file that
//! hits an unknown version is left untouched. Files committed before the
//! failure stay rewritten; there is no rollback across files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use similar::TextDiff;

use crate::config::Config;
use crate::error::{AvailabilityError, Result};
use crate::expand::{ExpansionMode, Expander, TextRewrite};
use crate::scan::discover_sources;
use crate::versions::VersionTable;

/// @acp:summary "Outcome for one file whose content changed"
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub annotations: usize,
    pub changed_lines: Vec<usize>,
    /// Unified diff, only produced for dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// @acp:summary "Totals for a whole run"
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteSummary {
    pub mode: ExpansionMode,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub annotations: usize,
    pub changes: Vec<FileChange>,
}

impl RewriteSummary {
    pub fn files_changed(&self) -> usize {
        self.changes.len()
    }

    pub fn lines_changed(&self) -> usize {
        self.changes.iter().map(|c| c.changed_lines.len()).sum()
    }
}

/// @acp:summary "Sequential in-place rewriter over the package sources"
#[derive(Debug)]
pub struct Rewriter {
    config: Config,
    expander: Expander,
}

impl Rewriter {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_table(config, VersionTable::builtin())
    }

    pub fn with_table(config: Config, table: VersionTable) -> Result<Self> {
        let expander = Expander::new(&config, table)?;
        Ok(Self { config, expander })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rewrite every source under the configured roots
    pub fn run(&self) -> Result<RewriteSummary> {
        let files = discover_sources(&self.config);
        tracing::debug!("Found {} source files", files.len());
        self.run_files(&files)
    }

    /// Rewrite an explicit list of files, in order, stopping at the first error
    pub fn run_files(&self, files: &[PathBuf]) -> Result<RewriteSummary> {
        let mut summary = RewriteSummary {
            mode: self.config.mode,
            dry_run: self.config.dry_run,
            ..RewriteSummary::default()
        };

        for path in files {
            let (rewrite, change) = self.rewrite_file(path)?;
            summary.files_scanned += 1;
            summary.annotations += rewrite.annotations;
            if let Some(change) = change {
                summary.changes.push(change);
            }
        }

        tracing::info!(
            "{} annotations in {} files; {} files changed",
            summary.annotations,
            summary.files_scanned,
            summary.files_changed()
        );
        Ok(summary)
    }

    /// Transform one file and commit it unless this is a dry run.
    ///
    /// Unchanged files are never rewritten.
    pub fn rewrite_file(&self, path: &Path) -> Result<(TextRewrite, Option<FileChange>)> {
        let original = fs::read_to_string(path).map_err(|e| AvailabilityError::io(path, e))?;
        let rewrite = self.expander.rewrite_text(&original, path)?;

        if !rewrite.is_changed() {
            return Ok((rewrite, None));
        }

        let diff = if self.config.dry_run {
            Some(unified_diff(path, &original, &rewrite.content))
        } else {
            fs::write(path, &rewrite.content).map_err(|e| AvailabilityError::io(path, e))?;
            tracing::debug!("Updated {}", path.display());
            None
        };

        let change = FileChange {
            path: path.to_path_buf(),
            annotations: rewrite.annotations,
            changed_lines: rewrite.changed_lines.clone(),
            diff,
        };
        Ok((rewrite, Some(change)))
    }
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}
