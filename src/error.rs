//! @acp:module "Errors"
//! @acp:summary "Error types for availability rewriting"
//! @acp:domain cli
//! @acp:layer utility

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, AvailabilityError>;

/// @acp:summary "Errors raised while rewriting availability annotations"
#[derive(Debug, Error)]
pub enum AvailabilityError {
    /// An annotation names a version that is not in the version table
    #[error("{}:{}: error: Unknown {} version '{}'", .path.display(), .line, .package, .token)]
    UnknownVersion {
        path: PathBuf,
        line: usize,
        package: String,
        token: String,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid annotation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl AvailabilityError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the unknown-version diagnostic rather than an environment failure
    pub fn is_unknown_version(&self) -> bool {
        matches!(self, Self::UnknownVersion { .. })
    }
}
