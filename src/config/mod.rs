//! @acp:module "Configuration"
//! @acp:summary "Run configuration and defaults"
//! @acp:domain cli
//! @acp:layer config
//!
//! There is no configuration file: a [`Config`] is assembled from CLI flags
//! on top of defaults that reproduce the tool's historical behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::expand::ExpansionMode;

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_source_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("Sources"), PathBuf::from("Tests")]
}

fn default_extension() -> String {
    "swift".to_string()
}

fn default_attribute() -> String {
    "@available".to_string()
}

/// Minimum platform that every supported deployment target satisfies,
/// so an attribute carrying only this has no effect.
fn default_placeholder_platform() -> String {
    "iOS 8".to_string()
}

/// @acp:summary "Settings for a single rewrite run"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Package root the source directories are resolved against
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directories (relative to `root`) scanned for sources, in order
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<PathBuf>,

    /// File extension of candidate sources, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Attribute keyword emitted and recognized
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Platform used by inert attributes in comment mode
    #[serde(default = "default_placeholder_platform")]
    pub placeholder_platform: String,

    /// Comment or attribute output, fixed for the whole run
    #[serde(default)]
    pub mode: ExpansionMode,

    /// Compute changes without writing them
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            source_dirs: default_source_dirs(),
            extension: default_extension(),
            attribute: default_attribute(),
            placeholder_platform: default_placeholder_platform(),
            mode: ExpansionMode::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Defaults rooted at `root`
    pub fn for_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Absolute-or-relative paths of the directories to scan
    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.source_dirs.iter().map(|d| self.root.join(d)).collect()
    }
}
