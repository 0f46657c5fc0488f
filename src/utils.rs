//! # Utilities Module
//!
//! ## Purpose
//! Small helpers shared across the search engine: download filename
//! sanitization and a timing helper for instrumented operations.

use std::time::Instant;

/// Performance timer for measuring operation duration
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    /// Start a new timer with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Stop timer and log duration
    pub fn stop(self) -> u64 {
        let elapsed = self.elapsed_ms();
        tracing::debug!("Timer '{}' completed in {}ms", self.name, elapsed);
        elapsed
    }
}

/// Characters that are illegal in filenames on common filesystems.
const ILLEGAL_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Sanitize a download filename for safe file operations.
///
/// Replaces each filesystem-illegal character (`<>:"/\|?*`) with `_` and
/// appends `.pdf` when the name does not already end with it
/// (case-insensitively).
pub fn sanitize_download_filename(filename: &str) -> String {
    let mut sanitized: String = filename
        .chars()
        .map(|c| if ILLEGAL_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if !sanitized.to_lowercase().ends_with(".pdf") {
        sanitized.push_str(".pdf");
    }
    sanitized
}

/// Remove exactly one trailing `.pdf` extension, case-insensitively.
///
/// Used when presenting a filename as a subject title; repeated suffixes
/// are left alone (`a.pdf.pdf` keeps one `.pdf`).
pub fn strip_pdf_extension(filename: &str) -> &str {
    let stem_len = match filename.len().checked_sub(4) {
        Some(len) => len,
        None => return filename,
    };
    match filename.get(stem_len..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(".pdf") => &filename[..stem_len],
        _ => filename,
    }
}
