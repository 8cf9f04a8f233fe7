//! @acp:module "Expander"
//! @acp:summary "Builds expanded or compacted availability annotations"
//! @acp:domain cli
//! @acp:layer service
//!
//! Given a recognized annotation, looks its token up in the [`VersionTable`]
//! and regenerates the annotation in the dialect it was written in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AvailabilityError, Result};
use crate::parse::{AnnotationMatch, AnnotationStyle, Recognizers};
use crate::versions::VersionTable;

/// Output form, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Platform list kept inside the comment; attribute is inert
    #[default]
    Comments,
    /// Real, compiler-effective availability attributes
    Attributes,
}

impl ExpansionMode {
    pub fn from_attributes_flag(attributes: bool) -> Self {
        if attributes {
            Self::Attributes
        } else {
            Self::Comments
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::Attributes => "attributes",
        }
    }
}

impl std::fmt::Display for ExpansionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of rewriting one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRewrite {
    pub content: String,
    /// Annotations regenerated, whether or not their text changed
    pub annotations: usize,
    /// 1-based numbers of lines whose bytes changed
    pub changed_lines: Vec<usize>,
}

impl TextRewrite {
    pub fn is_changed(&self) -> bool {
        !self.changed_lines.is_empty()
    }
}

/// @acp:summary "Shared replacement builder for every annotation dialect"
#[derive(Debug)]
pub struct Expander {
    table: VersionTable,
    recognizers: Recognizers,
    mode: ExpansionMode,
    attribute: String,
    placeholder_platform: String,
}

impl Expander {
    pub fn new(config: &Config, table: VersionTable) -> Result<Self> {
        let recognizers = Recognizers::from_config(config, table.package())?;
        Ok(Self {
            table,
            recognizers,
            mode: config.mode,
            attribute: config.attribute.clone(),
            placeholder_platform: config.placeholder_platform.clone(),
        })
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    pub fn table(&self) -> &VersionTable {
        &self.table
    }

    /// Text that replaces `m`'s span, given the looked-up platform list
    pub fn replacement(&self, m: &AnnotationMatch, platforms: &str) -> String {
        let attr = &self.attribute;
        let token = &m.token;
        match (m.style, self.mode) {
            (AnnotationStyle::New, ExpansionMode::Attributes) => {
                format!("{attr}(/*{token}*/{platforms}, *)")
            }
            (AnnotationStyle::New, ExpansionMode::Comments) => format!(
                "{attr}(/*{token}: {platforms}*/{}, *)",
                self.placeholder_platform
            ),
            (AnnotationStyle::Old, ExpansionMode::Attributes) => {
                format!("/*{token}*/{attr}({platforms}, *)")
            }
            (AnnotationStyle::Old, ExpansionMode::Comments) => {
                format!("/*{token}, {attr}({platforms}, *)*/")
            }
        }
    }

    /// Rewrite a single line body (no terminator).
    ///
    /// Returns `Ok(None)` when the line carries no annotation. `path` and
    /// `line_no` only feed the unknown-version diagnostic.
    pub fn rewrite_line(&self, line: &str, path: &Path, line_no: usize) -> Result<Option<String>> {
        let Some(m) = self.recognizers.recognize(line) else {
            return Ok(None);
        };
        let platforms =
            self.table
                .lookup(&m.token)
                .ok_or_else(|| AvailabilityError::UnknownVersion {
                    path: path.to_path_buf(),
                    line: line_no,
                    package: self.table.package().to_string(),
                    token: m.token.clone(),
                })?;

        let replacement = self.replacement(&m, platforms);
        let mut out = String::with_capacity(line.len() + replacement.len());
        out.push_str(&line[..m.span.start]);
        out.push_str(&replacement);
        out.push_str(&line[m.span.end..]);
        Ok(Some(out))
    }

    /// Rewrite a whole buffer line by line.
    ///
    /// Line terminators (`\n` or `\r\n`) and a missing final newline are
    /// preserved exactly. Fails on the first unknown version without
    /// producing partial output.
    pub fn rewrite_text(&self, text: &str, path: &Path) -> Result<TextRewrite> {
        let mut content = String::with_capacity(text.len());
        let mut annotations = 0;
        let mut changed_lines = Vec::new();

        for (idx, raw) in text.split_inclusive('\n').enumerate() {
            let (body, terminator) = split_terminator(raw);
            match self.rewrite_line(body, path, idx + 1)? {
                Some(rewritten) => {
                    annotations += 1;
                    if rewritten != body {
                        tracing::debug!("{}:{}: {}", path.display(), idx + 1, rewritten.trim());
                        changed_lines.push(idx + 1);
                    }
                    content.push_str(&rewritten);
                    content.push_str(terminator);
                }
                None => content.push_str(raw),
            }
        }

        Ok(TextRewrite {
            content,
            annotations,
            changed_lines,
        })
    }
}

fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GREETING: &str = "/*System 0.0.2*/public func greeting() -> String {";

    fn expander(mode: ExpansionMode) -> Expander {
        Expander::new(&Config::default().with_mode(mode), VersionTable::builtin()).unwrap()
    }

    fn line(mode: ExpansionMode, input: &str) -> String {
        expander(mode)
            .rewrite_line(input, Path::new("Sources/Greeting.swift"), 1)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_old_style_comment_mode() {
        assert_eq!(
            line(ExpansionMode::Comments, GREETING),
            "/*System 0.0.2, @available(macOS 12.0, iOS 15.0, watchOS 8.0, tvOS 15.0, *)*/public func greeting() -> String {"
        );
    }

    #[test]
    fn test_old_style_attribute_mode() {
        assert_eq!(
            line(ExpansionMode::Attributes, GREETING),
            "/*System 0.0.2*/@available(macOS 12.0, iOS 15.0, watchOS 8.0, tvOS 15.0, *)public func greeting() -> String {"
        );
    }

    #[test]
    fn test_new_style_attribute_mode() {
        assert_eq!(
            line(ExpansionMode::Attributes, "@available(/*System 0.0.2*/macOS 10, *)"),
            "@available(/*System 0.0.2*/macOS 12.0, iOS 15.0, watchOS 8.0, tvOS 15.0, *)"
        );
    }

    #[test]
    fn test_new_style_comment_mode() {
        assert_eq!(
            line(ExpansionMode::Comments, "  @available(/*System 0.0.1*/macOS 10, *)  "),
            "  @available(/*System 0.0.1: macOS 11.0, iOS 14.0, watchOS 7.0, tvOS 14.0*/iOS 8, *)  "
        );
    }

    #[test]
    fn test_old_style_forms_converge() {
        let forms = [
            "/*System 0.0.2*/",
            "/*System 0.0.2, @available(macOS 10, *)*/",
            "/*System 0.0.2*/@available(macOS 10, *)",
        ];
        for mode in [ExpansionMode::Comments, ExpansionMode::Attributes] {
            let outputs: Vec<_> = forms.iter().map(|f| line(mode, f)).collect();
            assert_eq!(outputs[0], outputs[1]);
            assert_eq!(outputs[1], outputs[2]);
        }
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let out = line(ExpansionMode::Attributes, "\t  /*System 1.2.0*/ // trailing ");
        assert_eq!(
            out,
            "\t  /*System 1.2.0*/@available(macOS 9999, iOS 9999, watchOS 9999, tvOS 9999, *) // trailing "
        );
    }

    #[test]
    fn test_no_annotation_returns_none() {
        let result = expander(ExpansionMode::Comments)
            .rewrite_line("let x = 1", Path::new("a.swift"), 3)
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_unknown_version_is_fatal() {
        let err = expander(ExpansionMode::Comments)
            .rewrite_line("/*System 9.9.9*/", Path::new("Sources/A.swift"), 12)
            .unwrap_err();
        assert!(err.is_unknown_version());
        assert_eq!(
            err.to_string(),
            "Sources/A.swift:12: error: Unknown System version 'System 9.9.9'"
        );
    }

    #[test]
    fn test_rewrite_text_preserves_terminators() {
        let input = "import Foo  \r\n/*System 0.0.2*/\r\nfunc f() {}\n  \nlast";
        let out = expander(ExpansionMode::Attributes)
            .rewrite_text(input, Path::new("a.swift"))
            .unwrap();
        assert_eq!(
            out.content,
            "import Foo  \r\n/*System 0.0.2*/@available(macOS 12.0, iOS 15.0, watchOS 8.0, tvOS 15.0, *)\r\nfunc f() {}\n  \nlast"
        );
        assert_eq!(out.annotations, 1);
        assert_eq!(out.changed_lines, vec![2]);
    }

    #[test]
    fn test_rewrite_text_reports_line_number() {
        let input = "a\n/*System 0.0.1*/\nb\n/*System 9.9.9*/\n";
        let err = expander(ExpansionMode::Comments)
            .rewrite_text(input, Path::new("Tests/T.swift"))
            .unwrap_err();
        match err {
            AvailabilityError::UnknownVersion { line, token, .. } => {
                assert_eq!(line, 4);
                assert_eq!(token, "System 9.9.9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rewrite_text_idempotent() {
        let input = "/*System 0.0.2*/\n@available(/*System 1.1.0*/macOS 10, *)\nfunc g() {}\n";
        for mode in [ExpansionMode::Comments, ExpansionMode::Attributes] {
            let e = expander(mode);
            let once = e.rewrite_text(input, Path::new("a.swift")).unwrap();
            let twice = e.rewrite_text(&once.content, Path::new("a.swift")).unwrap();
            assert_eq!(once.content, twice.content);
            assert!(!twice.is_changed());
            assert_eq!(twice.annotations, 2);
        }
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(ExpansionMode::from_attributes_flag(true), ExpansionMode::Attributes);
        assert_eq!(ExpansionMode::from_attributes_flag(false), ExpansionMode::Comments);
        assert_eq!(ExpansionMode::Attributes.to_string(), "attributes");
    }
}
