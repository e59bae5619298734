//! Filter rules: user-defined regex substitutions over the report text.
//!
//! Rules live in YAML documents shaped like:
//!
//! ```yaml
//! Filters:
//!   - Pattern: "\\d+ warnings? generated\\.\\n?"
//!     Replacement: ""
//!   - Pattern: "^warning:"
//!     Replacement: "note:"
//!     Multiline: true
//! ```
//!
//! Patterns compile when a document is loaded, not when the report is
//! rendered, so a broken pattern surfaces as a load-time error naming the
//! rule instead of a mid-run failure.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

/// A single substitution rule as written in a filter file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterRule {
    /// Regex matched against the report text.
    #[serde(alias = "pattern")]
    pub pattern: String,
    /// Replacement text; capture-group references (`$1`) are honored.
    /// Omitted means the match is deleted.
    #[serde(default, alias = "replacement")]
    pub replacement: String,
    /// When set, `^` and `$` anchor at line boundaries instead of text
    /// boundaries. Substitution spans the whole text either way.
    #[serde(default, alias = "multiline")]
    pub multiline: bool,
}

/// Root document of a filter file. A document without a `Filters` key
/// holds no rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterFile {
    #[serde(default, alias = "filters")]
    pub filters: Vec<FilterRule>,
}

impl FilterFile {
    /// Parse one YAML filter document.
    pub fn parse(text: &str) -> Result<FilterFile, FilterError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Why a filter document or one of its rules was rejected.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid filter document: {0}")]
    Document(#[from] serde_yaml::Error),
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A rule whose pattern has been compiled and is ready to apply.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    pub regex: Regex,
    pub replacement: String,
}

impl CompiledFilter {
    /// Compile one rule, folding its multiline flag into the regex.
    pub fn compile(rule: &FilterRule) -> Result<CompiledFilter, FilterError> {
        let regex = RegexBuilder::new(&rule.pattern)
            .multi_line(rule.multiline)
            .build()
            .map_err(|source| FilterError::Pattern {
                pattern: rule.pattern.clone(),
                source,
            })?;
        Ok(CompiledFilter {
            regex,
            replacement: rule.replacement.clone(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
