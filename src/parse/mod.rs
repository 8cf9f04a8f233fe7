//! @acp:module "Parser"
//! @acp:summary "Recognition of symbolic availability annotations in source lines"
//! @acp:domain cli
//! @acp:layer service
//!
//! Two annotation dialects coexist in the tree:
//!
//! ```text
//! new:  @available(/*System 0.0.2: macOS 12.0, ...*/iOS 8, *)
//!       @available(/*System 0.0.2*/macOS 12.0, ..., *)
//! old:  /*System 0.0.2*/
//!       /*System 0.0.2, @available(macOS 12.0, ..., *)*/
//!       /*System 0.0.2*/@available(macOS 12.0, ..., *)
//! ```
//!
//! Each dialect has a [`Recognizer`]; [`Recognizers`] tries them in priority
//! order and yields a normalized [`AnnotationMatch`].

use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;

/// Which dialect an annotation was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStyle {
    /// Marker comment inside the attribute's argument list
    New,
    /// Bare marker comment, optionally followed by an attribute
    Old,
}

/// @acp:summary "A recognized annotation within one line"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationMatch {
    pub style: AnnotationStyle,
    /// Symbolic version, e.g. `System 0.0.2`
    pub token: String,
    /// Byte range of the whole annotation within the line
    pub span: Range<usize>,
    /// Platform list already present in the annotation, if any.
    /// Informational only; rewrites always regenerate it from the table.
    pub existing: Option<String>,
}

/// A single annotation dialect
pub trait Recognizer {
    fn style(&self) -> AnnotationStyle;

    /// First annotation of this dialect in `line`
    fn recognize(&self, line: &str) -> Option<AnnotationMatch>;
}

/// `@available(/*TOKEN[junk]*/ARGS*)`
#[derive(Debug, Clone)]
pub struct NewStyleRecognizer {
    pattern: Regex,
}

impl NewStyleRecognizer {
    pub fn new(attribute: &str, package: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"{attr}\(/\*({pkg} [^ *:]+)[^*/)]*\*/([^)]*)\*\)",
            attr = regex::escape(attribute),
            pkg = regex::escape(package),
        ))?;
        Ok(Self { pattern })
    }
}

impl Recognizer for NewStyleRecognizer {
    fn style(&self) -> AnnotationStyle {
        AnnotationStyle::New
    }

    fn recognize(&self, line: &str) -> Option<AnnotationMatch> {
        let caps = self.pattern.captures(line)?;
        let whole = caps.get(0)?;
        let existing = caps
            .get(2)
            .map(|m| m.as_str().trim().trim_end_matches(',').trim_end().to_string())
            .filter(|s| !s.is_empty());
        Some(AnnotationMatch {
            style: AnnotationStyle::New,
            token: caps[1].to_string(),
            span: whole.range(),
            existing,
        })
    }
}

/// `/*TOKEN*/`, `/*TOKEN, @available(...)*/`, `/*TOKEN*/@available(...)`
#[derive(Debug, Clone)]
pub struct OldStyleRecognizer {
    pattern: Regex,
}

impl OldStyleRecognizer {
    pub fn new(attribute: &str, package: &str) -> Result<Self> {
        let attr = regex::escape(attribute);
        let pattern = Regex::new(&format!(
            r"/\*({pkg} [^ *]+)(, {attr}\([^)]*\))?\*/({attr}\([^)]*\))?",
            pkg = regex::escape(package),
        ))?;
        Ok(Self { pattern })
    }
}

impl Recognizer for OldStyleRecognizer {
    fn style(&self) -> AnnotationStyle {
        AnnotationStyle::Old
    }

    fn recognize(&self, line: &str) -> Option<AnnotationMatch> {
        let caps = self.pattern.captures(line)?;
        let whole = caps.get(0)?;
        // Either the expansion baked into the comment or the trailing attribute
        let existing = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string());
        Some(AnnotationMatch {
            style: AnnotationStyle::Old,
            token: caps[1].to_string(),
            span: whole.range(),
            existing,
        })
    }
}

type BoxedRecognizer = Box<dyn Recognizer + Send + Sync>;

/// @acp:summary "Ordered recognizer list; first dialect to match wins"
pub struct Recognizers {
    ordered: Vec<BoxedRecognizer>,
}

impl Recognizers {
    /// New style first, falling back to old style
    pub fn new(attribute: &str, package: &str) -> Result<Self> {
        Ok(Self {
            ordered: vec![
                Box::new(NewStyleRecognizer::new(attribute, package)?) as BoxedRecognizer,
                Box::new(OldStyleRecognizer::new(attribute, package)?),
            ],
        })
    }

    pub fn from_config(config: &Config, package: &str) -> Result<Self> {
        Self::new(&config.attribute, package)
    }

    pub fn recognize(&self, line: &str) -> Option<AnnotationMatch> {
        self.ordered.iter().find_map(|r| r.recognize(line))
    }

    pub fn styles(&self) -> Vec<AnnotationStyle> {
        self.ordered.iter().map(|r| r.style()).collect()
    }
}

impl std::fmt::Debug for Recognizers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizers")
            .field("ordered", &self.styles())
            .finish()
    }
}
