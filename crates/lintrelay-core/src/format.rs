//! Rendering the raw report through a filter chain.

use crate::filter::CompiledFilter;
use std::borrow::Cow;

/// Apply the chain in order. Each rule substitutes globally over the
/// cumulative output of the previous rule, so later rules see earlier
/// rules' replacements. An empty chain returns the input unchanged.
pub fn apply_filters(report: &str, chain: &[CompiledFilter]) -> String {
    let mut text = report.to_string();
    for filter in chain {
        if let Cow::Owned(next) = filter.regex.replace_all(&text, filter.replacement.as_str()) {
            text = next;
        }
    }
    text
}

// ============================================================================
// Tests
// ============================================================================
