//! Structured diagnostic records extracted from analyzer reports.

use std::path::PathBuf;

/// One finding reported by the analyzer.
///
/// Positions are zero-based: the analyzer emits 1-based line/column pairs
/// and [`parse_report`](crate::parse_report) normalizes them so editor
/// consumers can index buffers directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path to the offending file, separators normalized per
    /// [`PathStyle`](crate::PathStyle).
    pub file: PathBuf,
    /// Zero-based line.
    pub line: u32,
    /// Zero-based column.
    pub column: u32,
    /// Classification as emitted by the tool (`warning`, `error`, ...).
    /// Free-form: unknown classifications pass through untouched.
    pub severity: String,
    /// Human-readable description of the finding.
    pub message: String,
    /// Identifier of the check that fired (the bracketed suffix).
    pub check_name: String,
    /// The source line echoed by the tool beneath the header line.
    pub code_line: String,
    /// Identifier-like token at `column` in `code_line`, used for span
    /// highlighting. Empty when the column points at punctuation or past
    /// the end of the line.
    pub highlight_token: String,
}

impl Diagnostic {
    /// True when this finding lies within the zero-based, inclusive
    /// line range.
    pub fn overlaps_lines(&self, start_line: u32, end_line: u32) -> bool {
        self.line >= start_line && self.line <= end_line
    }
}

/// Longest leading run of `[A-Za-z0-9_]` characters in `code_line`
/// starting at `column` (a character offset, not a byte offset).
pub fn highlight_token_at(code_line: &str, column: u32) -> String {
    code_line
        .chars()
        .skip(column as usize)
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_token_at_identifier() {
        assert_eq!(highlight_token_at("  foo->bar();", 2), "foo");
    }

    #[test]
    fn test_highlight_token_at_punctuation() {
        assert_eq!(highlight_token_at("  foo->bar();", 5), "");
    }

    #[test]
    fn test_highlight_token_at_past_end() {
        assert_eq!(highlight_token_at("x", 40), "");
    }

    #[test]
    fn test_highlight_token_at_underscore_and_digits() {
        assert_eq!(highlight_token_at("my_var2 = 0;", 0), "my_var2");
    }

    #[test]
    fn test_highlight_token_counts_characters_not_bytes() {
        // "é" is two bytes but one character; the token starts right after.
        assert_eq!(highlight_token_at("é foo", 2), "foo");
    }

    #[test]
    fn test_overlaps_lines_inclusive_bounds() {
        let diag = Diagnostic {
            file: PathBuf::from("a.cpp"),
            line: 5,
            column: 0,
            severity: "warning".into(),
            message: "m".into(),
            check_name: "c".into(),
            code_line: String::new(),
            highlight_token: String::new(),
        };
        assert!(diag.overlaps_lines(5, 5));
        assert!(diag.overlaps_lines(0, 5));
        assert!(diag.overlaps_lines(5, 100));
        assert!(!diag.overlaps_lines(6, 100));
        assert!(!diag.overlaps_lines(0, 4));
    }
}
