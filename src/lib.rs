#![forbid(unsafe_code)]

//! @acp:module "Availability Library"
//! @acp:summary "Expand or compact symbolic availability annotations in Swift sources"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # expand-availability
//!
//! ABI-relevant declarations are tagged with a symbolic version comment:
//!
//! ```text
//! /*System 0.0.2*/
//! public func greeting() -> String {
//! ```
//!
//! Comment mode keeps the platform list inside the comment, attribute mode
//! turns it into a real `@available` attribute. Both forms are recognized on
//! every run, so switching modes toggles the tree back and forth.
//!
//! ## Example
//!
//! ```rust,no_run
//! use availability::{Config, ExpansionMode, Rewriter};
//!
//! fn main() -> availability::Result<()> {
//!     let config = Config::for_root(".").with_mode(ExpansionMode::Attributes);
//!     let summary = Rewriter::new(config)?.run()?;
//!     println!("{} files changed", summary.files_changed());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod expand;
pub mod parse;
pub mod rewrite;
pub mod scan;
pub mod versions;

// Re-exports
pub use config::Config;
pub use error::{AvailabilityError, Result};
pub use expand::{ExpansionMode, Expander, TextRewrite};
pub use parse::{AnnotationMatch, AnnotationStyle, Recognizer, Recognizers};
pub use rewrite::{FileChange, RewriteSummary, Rewriter};
pub use scan::{discover_sources, sources_in};
pub use versions::VersionTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
