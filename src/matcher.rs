//! # Subject Matching Module
//!
//! ## Purpose
//! Approximate string matching of a free-text subject query against the
//! corpus filenames. The concrete algorithm sits behind the narrow
//! `SubjectMatcher` trait so it stays swappable and independently testable
//! with a deterministic fake.
//!
//! ## Input/Output Specification
//! - **Input**: Normalized subject query, full corpus
//! - **Output**: Corpus indices in ranked order (advisory only; the result
//!   assembler re-sorts deterministically)
//! - **Tolerance**: distance on a 0-to-1 scale, lower = stricter; default
//!   threshold 0.3 admits close-but-inexact matches
//!
//! ## Key Features
//! - Levenshtein-based distance over both the normalized and the original
//!   filename fields (`strsim`)
//! - Best-window scoring so a short query can match inside a longer
//!   filename, not only against the whole string

use crate::corpus::CorpusEntry;
use crate::text::normalize;

/// Narrow interface over the approximate string-matching capability.
pub trait SubjectMatcher: Send + Sync {
    /// Indices of corpus entries matching `query`, in ranked order.
    ///
    /// Callers pass an already-normalized, non-blank query; blank-query
    /// handling (return the whole corpus) lives in the engine.
    fn search(&self, query: &str, corpus: &[CorpusEntry]) -> Vec<usize>;
}

/// Levenshtein-based fuzzy matcher over corpus filenames.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Maximum admissible distance on a 0-to-1 scale
    threshold: f64,
}

impl FuzzyMatcher {
    /// Create a matcher with the given distance threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Best distance of `query` against one entry, over both filename fields.
    fn entry_distance(&self, query: &str, entry: &CorpusEntry) -> f64 {
        let normalized = best_window_distance(query, &normalize(&entry.normalized_filename));
        let original = best_window_distance(query, &normalize(&entry.original_filename));
        normalized.min(original)
    }
}

impl SubjectMatcher for FuzzyMatcher {
    fn search(&self, query: &str, corpus: &[CorpusEntry]) -> Vec<usize> {
        let mut scored: Vec<(usize, f64)> = corpus
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let distance = self.entry_distance(query, entry);
                (distance <= self.threshold).then_some((i, distance))
            })
            .collect();

        // Rank by distance; ties keep corpus order.
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(i, _)| i).collect()
    }
}

/// Minimum normalized Levenshtein distance between `query` and any
/// query-length window of `text`, on a 0-to-1 scale.
///
/// Sliding a query-sized window keeps short queries comparable against long
/// filenames: "algo" sits at distance 0 inside "algorithms".
fn best_window_distance(query: &str, text: &str) -> f64 {
    let query_len = query.chars().count();
    if query_len == 0 {
        return 0.0;
    }
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if chars.is_empty() {
        return 1.0;
    }
    if chars.len() <= query_len {
        let distance = strsim::levenshtein(query, text);
        return (distance as f64 / query_len as f64).min(1.0);
    }

    let mut best = usize::MAX;
    for start in 0..=(chars.len() - query_len) {
        let begin = chars[start].0;
        let end = chars
            .get(start + query_len)
            .map_or(text.len(), |&(offset, _)| offset);
        let distance = strsim::levenshtein(query, &text[begin..end]);
        if distance < best {
            best = distance;
            if best == 0 {
                break;
            }
        }
    }
    (best as f64 / query_len as f64).min(1.0)
}
