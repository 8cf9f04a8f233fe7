//! @acp:module "Version Table"
//! @acp:summary "Symbolic package versions mapped to platform availability lists"
//! @acp:domain cli
//! @acp:layer model
//!
//! Each ABI-relevant release of the package is referred to in source by a
//! symbolic token such as `System 0.0.2`. The table maps those tokens to the
//! OS releases that first shipped the corresponding ABI.

use std::collections::BTreeMap;

/// Package prefix of every built-in token
pub const DEFAULT_PACKAGE: &str = "System";

const BUILTIN_VERSIONS: &[(&str, &str)] = &[
    ("System 0.0.1", "macOS 11.0, iOS 14.0, watchOS 7.0, tvOS 14.0"),
    ("System 0.0.2", "macOS 12.0, iOS 15.0, watchOS 8.0, tvOS 15.0"),
    ("System 1.1.0", "macOS 12.3, iOS 15.4, watchOS 8.5, tvOS 15.4"),
    ("System 1.2.0", "macOS 9999, iOS 9999, watchOS 9999, tvOS 9999"),
];

/// @acp:summary "Immutable token -> platform list lookup"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    package: String,
    entries: BTreeMap<String, String>,
}

impl VersionTable {
    /// The versions shipped with this tool
    pub fn builtin() -> Self {
        Self::from_entries(DEFAULT_PACKAGE, BUILTIN_VERSIONS.iter().copied())
    }

    /// Build a table for an arbitrary package prefix.
    ///
    /// Tokens are stored verbatim; callers are expected to include the package
    /// prefix (`"Foo 1.0"`), since that is the form annotations carry.
    pub fn from_entries<I, K, V>(package: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            package: package.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Package prefix that annotations must start with
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Platform list for `token`, if the version is known
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Known tokens in sorted order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
