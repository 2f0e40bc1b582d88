#![forbid(unsafe_code)]

//! Line classification for output coloring
//!
//! Rules are checked in order and the first match wins:
//! 1. Leading `[` (progress markers)
//! 2. `Resolving`
//! 3. `Connecting`
//! 4. `HTTP request sent`
//! 5. `Not Modified`
//! 6. Anything else

use crate::types::Category;

/// Substring rules checked after the leading-bracket rule
const SUBSTRING_RULES: &[(&str, Category)] = &[
    ("Resolving", Category::Resolving),
    ("Connecting", Category::Connecting),
    ("HTTP request sent", Category::HttpStatus),
    ("Not Modified", Category::NotModified),
];

/// Classify a single output line
///
/// Total over any input: unmatched lines fall into [`Category::Default`].
/// Leading whitespace is ignored for the bracket check.
pub fn classify(line: &str) -> Category {
    if line.trim_start().starts_with('[') {
        return Category::Progress;
    }

    SUBSTRING_RULES
        .iter()
        .find(|(needle, _)| line.contains(needle))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Default)
}
