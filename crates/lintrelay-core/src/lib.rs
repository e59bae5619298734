//! lintrelay-core - Core library for analyzer report interpretation
//!
//! This crate provides the building blocks, free of I/O and async, for:
//! - Parsing an analyzer's textual report into structured [`Diagnostic`]
//!   records with zero-based positions
//! - Loading and compiling regex filter rules ([`FilterFile`],
//!   [`CompiledFilter`])
//! - Rendering the human-readable report through a filter chain
//!   ([`apply_filters`])
//!
//! # Parsing a Report
//!
//! clang-tidy emits each finding as a header line plus the echoed source
//! line. [`parse_report`] extracts every such block and skips the noise
//! around them:
//!
//! ```
//! use lintrelay_core::{ParseOptions, PathStyle, parse_report};
//!
//! let report = concat!(
//!     "src/widget.cpp:12:9: warning: use nullptr [modernize-use-nullptr]\n",
//!     "        ptr = 0;\n",
//!     "1 warning generated.\n",
//! );
//!
//! let options = ParseOptions { path_style: PathStyle::Forward };
//! let records = parse_report(report, &options);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].line, 11);
//! assert_eq!(records[0].column, 8);
//! assert_eq!(records[0].check_name, "modernize-use-nullptr");
//! assert_eq!(records[0].highlight_token, "ptr");
//! ```
//!
//! # Filtering the Rendered Report
//!
//! Filter rules rewrite the text shown in the output pane without touching
//! the structured records:
//!
//! ```
//! use lintrelay_core::{CompiledFilter, FilterFile, apply_filters};
//!
//! let file = FilterFile::parse(
//!     "Filters:\n  - Pattern: \"\\\\d+ warnings? generated\\\\.\\\\n?\"\n",
//! )
//! .unwrap();
//! let chain: Vec<CompiledFilter> = file
//!     .filters
//!     .iter()
//!     .map(|rule| CompiledFilter::compile(rule).unwrap())
//!     .collect();
//!
//! let rendered = apply_filters("body\n2 warnings generated.\n", &chain);
//! assert_eq!(rendered, "body\n");
//! ```

mod diagnostic;
mod filter;
mod format;
mod parser;

pub use diagnostic::{Diagnostic, highlight_token_at};
pub use filter::{CompiledFilter, FilterError, FilterFile, FilterRule};
pub use format::apply_filters;
pub use parser::{ParseOptions, PathStyle, parse_report};
