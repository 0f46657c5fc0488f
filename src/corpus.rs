//! # Corpus Module
//!
//! ## Purpose
//! Loading of the exam-paper corpus resource and decomposition of a corpus
//! entry's URL into its structured path fields.
//!
//! ## Input/Output Specification
//! - **Input**: Corpus JSON resource (array of records), corpus entry URLs
//! - **Output**: Immutable `CorpusEntry` list, per-entry `ParsedPath` values
//! - **Path convention**: `prefix` + `year/semester/department/filename`
//!
//! ## Key Features
//! - One-time corpus load at engine construction; read-only afterwards
//! - Parallel raw and percent-decoded path segments for pattern matching
//! - Malformed URLs (<4 segments) yield `None` and are filtered, not errors

use crate::errors::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// A single indexable exam paper record.
///
/// Loaded once at startup and owned by the search engine for the process
/// lifetime; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Full URL of the paper, beginning with the archive's base prefix
    pub url: String,
    /// Filename as published in the archive
    pub original_filename: String,
    /// Pre-normalized filename used for fuzzy subject matching
    pub normalized_filename: String,
}

/// Path fields extracted from a corpus entry's URL.
///
/// Derived on demand per entry during a search and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Academic year segment (decoded)
    pub year: String,
    /// Semester segment (decoded)
    pub semester: String,
    /// Department segment, percent-decoded for display and matching
    pub department_decoded: String,
    /// Department segment exactly as it appears in the URL
    pub department_raw: String,
    /// Filename segment, percent-decoded
    pub filename_decoded: String,
}

/// Percent-decode a path segment, passing it through unchanged when the
/// escape sequence is not valid UTF-8.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .unwrap_or(Cow::Borrowed(segment))
        .into_owned()
}

/// Decompose a corpus URL into its structured path fields.
///
/// Strips `prefix`, splits the remainder on `/`, and drops empty segments.
/// Returns `None` when the URL does not carry the prefix or has fewer than
/// four remaining segments; callers skip such entries rather than failing.
/// Segments beyond the fourth are tolerated and ignored.
pub fn decompose(url: &str, prefix: &str) -> Option<ParsedPath> {
    let relative = url.strip_prefix(prefix)?;

    let raw: Vec<&str> = relative.split('/').filter(|p| !p.is_empty()).collect();
    if raw.len() < 4 {
        return None;
    }

    Some(ParsedPath {
        year: decode_segment(raw[0]),
        semester: decode_segment(raw[1]),
        department_decoded: decode_segment(raw[2]),
        department_raw: raw[2].to_string(),
        filename_decoded: decode_segment(raw[3]),
    })
}

/// Load the corpus resource from a JSON file.
pub async fn load_corpus(path: &Path) -> Result<Vec<CorpusEntry>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        SearchError::ResourceUnavailable {
            resource: path.to_string_lossy().to_string(),
            details: e.to_string(),
        }
    })?;

    let corpus: Vec<CorpusEntry> =
        serde_json::from_str(&content).map_err(|e| SearchError::DataParsing {
            resource: path.to_string_lossy().to_string(),
            details: e.to_string(),
        })?;

    tracing::info!("Loaded corpus with {} entries from {:?}", corpus.len(), path);
    Ok(corpus)
}
