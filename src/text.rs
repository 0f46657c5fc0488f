//! # Text Normalization Module
//!
//! ## Purpose
//! Canonical string form used for every comparison in the search pipeline.
//! Corpus filenames, department names, aliases, and user input all pass
//! through the same normalization before being compared; asymmetric
//! normalization is the primary source of missed matches.

/// Normalize a string for comparison.
///
/// Lower-cases, replaces `_` and `-` with single spaces, and trims leading
/// and trailing whitespace. Pure and total: never fails, and idempotent.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .replace(['_', '-'], " ")
        .trim()
        .to_string()
}
