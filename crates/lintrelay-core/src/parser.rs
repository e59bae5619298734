//! Parsing of raw analyzer output into [`Diagnostic`] records.
//!
//! clang-tidy reports each finding as two physical lines:
//!
//! ```text
//! <path>:<line>:<column>: <severity>: <message> [<check-name>]
//! <the source line echoed from the analyzed file>
//! ```
//!
//! The parser extracts every well-formed block from the captured blob and
//! skips everything else (summary lines, suppression notes, stderr noise).
//! An input with no matching blocks parses to an empty record set.

use crate::diagnostic::{Diagnostic, highlight_token_at};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

/// How to normalize path separators in reported file names.
///
/// Cosmetic only: it keeps reported paths consistent with how the host
/// editor displays them, and never changes which file a record names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// Convert to the host platform's separator.
    #[default]
    Native,
    /// Forward slashes everywhere.
    Forward,
    /// Backslashes everywhere.
    Backward,
}

impl PathStyle {
    fn apply(self, raw: &str) -> String {
        match self {
            PathStyle::Native => {
                if std::path::MAIN_SEPARATOR == '/' {
                    raw.replace('\\', "/")
                } else {
                    raw.replace('/', "\\")
                }
            }
            PathStyle::Forward => raw.replace('\\', "/"),
            PathStyle::Backward => raw.replace('/', "\\"),
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Separator normalization applied to reported file paths.
    pub path_style: PathStyle,
}

/// One diagnostic header plus the echoed code line on the next row.
/// `.` does not match `\n`, so each capture stays on its own physical line.
static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.*):(\d+):(\d+): (.*): (.*) \[(.*)\]\n(.*)").expect("report grammar is valid")
});

/// Parse a captured report into structured records.
///
/// Tolerant by construction: text that does not match the grammar is
/// skipped, positional values that fail to parse normalize to zero, and
/// an empty input yields an empty set. Line endings may be CRLF or LF.
pub fn parse_report(raw: &str, options: &ParseOptions) -> Vec<Diagnostic> {
    let text = raw.replace("\r\n", "\n");

    let mut records = Vec::new();
    for captures in BLOCK.captures_iter(&text) {
        let (file, line, column, severity, message, check_name, code_line) = match (
            captures.get(1),
            captures.get(2),
            captures.get(3),
            captures.get(4),
            captures.get(5),
            captures.get(6),
            captures.get(7),
        ) {
            (Some(f), Some(l), Some(c), Some(s), Some(m), Some(n), Some(e)) => {
                (f, l, c, s, m, n, e)
            }
            _ => continue,
        };

        // 1-based in the report, zero-based in the record. A malformed
        // number reads as zero and stays at zero after the shift.
        let line = parse_position(line.as_str());
        let column = parse_position(column.as_str());
        let code_line = code_line.as_str().to_string();
        let highlight_token = highlight_token_at(&code_line, column);

        records.push(Diagnostic {
            file: PathBuf::from(options.path_style.apply(file.as_str())),
            line,
            column,
            severity: severity.as_str().to_string(),
            message: message.as_str().to_string(),
            check_name: check_name.as_str().to_string(),
            code_line,
            highlight_token,
        });
    }

    records
}

fn parse_position(digits: &str) -> u32 {
    digits.parse::<u32>().unwrap_or(0).saturating_sub(1)
}

// ============================================================================
// Tests
// ============================================================================
