//! # Search Engine Module
//!
//! ## Purpose
//! The result assembler: combines fuzzy subject matching with department
//! filtering, decorates surviving entries with display metadata, and
//! produces the final deterministically ordered result list.
//!
//! ## Input/Output Specification
//! - **Input**: Free-text subject and department query
//! - **Output**: Ordered `MatchResult` list, ready for rendering
//! - **Ordering**: ascending by year, semester, department display name,
//!   original filename; independent of corpus order and matcher ranking
//!
//! ## Key Features
//! - Immutable `SearchIndex` built once at initialization; searches are
//!   synchronous and reentrant over shared read-only data
//! - Entries whose URLs fail to decompose are silently skipped
//! - Injectable `SubjectMatcher` for deterministic testing

use crate::config::Config;
use crate::corpus::{self, CorpusEntry};
use crate::department::DepartmentIndex;
use crate::errors::Result;
use crate::matcher::{FuzzyMatcher, SubjectMatcher};
use crate::text::normalize;
use crate::utils::{sanitize_download_filename, Timer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's search input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text subject query; blank means "all subjects"
    pub subject: String,
    /// Free-text department query; blank means "all departments"
    pub department: String,
}

/// A corpus entry enriched with display metadata for one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// The underlying corpus entry
    pub entry: CorpusEntry,
    /// Academic year from the URL path
    pub year: String,
    /// Semester from the URL path
    pub semester: String,
    /// Percent-decoded department segment
    pub department_decoded: String,
    /// Department name shown to the user: the canonical name when the query
    /// resolved to one, otherwise derived from the entry's own segment
    pub department_display: String,
}

impl MatchResult {
    /// Filename to save this result under:
    /// `{department_display}_{year}_{semester}_{original_filename}`,
    /// sanitized for the filesystem with a `.pdf` suffix enforced.
    pub fn download_filename(&self) -> String {
        sanitize_download_filename(&format!(
            "{}_{}_{}_{}",
            self.department_display, self.year, self.semester, self.entry.original_filename
        ))
    }
}

/// User-visible search lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Resources are still being loaded
    Loading,
    /// Resources loaded; searches can run
    Ready,
    /// A search completed with zero results (not an error)
    NoMatches,
    /// A required resource failed to load; search is disabled
    LoadFailed,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            SearchStatus::Loading => "Loading data...",
            SearchStatus::Ready => "Ready to search",
            SearchStatus::NoMatches => "No papers found matching your criteria",
            SearchStatus::LoadFailed => "Failed to load search data",
        };
        write!(f, "{}", message)
    }
}

/// Search engine over an immutable corpus and department index.
pub struct SearchEngine {
    corpus: Vec<CorpusEntry>,
    departments: DepartmentIndex,
    matcher: Box<dyn SubjectMatcher>,
    base_url_prefix: String,
}

impl SearchEngine {
    /// Load all resources named by `config` and build the engine.
    ///
    /// Any resource failure disables search entirely; there is no partial
    /// operation and no automatic retry.
    pub async fn new(config: &Config) -> Result<Self> {
        let corpus = corpus::load_corpus(&config.data.corpus_path).await?;
        let departments = DepartmentIndex::load(&config.data.department_map_path).await?;
        let matcher = Box::new(FuzzyMatcher::new(config.search.fuzzy_threshold));

        Ok(Self::from_parts(
            corpus,
            departments,
            matcher,
            config.data.base_url_prefix.clone(),
        ))
    }

    /// Build an engine from already-loaded parts with an injected matcher.
    pub fn from_parts(
        corpus: Vec<CorpusEntry>,
        departments: DepartmentIndex,
        matcher: Box<dyn SubjectMatcher>,
        base_url_prefix: String,
    ) -> Self {
        tracing::info!(
            "Search engine ready: {} corpus entries, {} departments",
            corpus.len(),
            departments.len()
        );
        Self {
            corpus,
            departments,
            matcher,
            base_url_prefix,
        }
    }

    /// Number of entries in the loaded corpus.
    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    /// Run one search and return the final ordered result list.
    ///
    /// Matching and sorting are synchronous and take no locks; concurrent
    /// searches over the same engine are safe.
    pub fn search(&self, query: &SearchQuery) -> Vec<MatchResult> {
        let timer = Timer::new("search");

        let subject = normalize(&query.subject);
        let candidates: Vec<&CorpusEntry> = if subject.is_empty() {
            self.corpus.iter().collect()
        } else {
            self.matcher
                .search(&subject, &self.corpus)
                .into_iter()
                .map(|i| &self.corpus[i])
                .collect()
        };

        let filter = self.departments.resolve(&query.department);
        let mut results = Vec::new();

        for entry in candidates {
            // Entries that do not fit year/semester/department/filename are
            // expected sparse malformed data, skipped without error.
            let Some(path) = corpus::decompose(&entry.url, &self.base_url_prefix) else {
                continue;
            };
            if !filter.matches(&path) {
                continue;
            }

            // A resolved canonical name labels every passing entry, even
            // when it expanded to zero patterns. Unresolved department
            // input labels entries with their decoded segment; with no
            // department input at all, each entry's own segment is
            // alias-resolved independently.
            let department_display = if let Some(name) = &filter.canonical {
                name.clone()
            } else if filter.is_active() {
                path.department_decoded.clone()
            } else {
                self.departments.display_for_segment(&path.department_decoded)
            };

            results.push(MatchResult {
                entry: entry.clone(),
                year: path.year,
                semester: path.semester,
                department_decoded: path.department_decoded,
                department_display,
            });
        }

        sort_results(&mut results);

        tracing::debug!(
            "Search subject={:?} department={:?} yielded {} results",
            query.subject,
            query.department,
            results.len()
        );
        timer.stop();
        results
    }
}

/// Stable multi-key sort: year, semester, department display, original
/// filename, each ascending and lexicographic. The final order depends only
/// on result contents, never on corpus order or matcher ranking.
fn sort_results(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        a.year
            .cmp(&b.year)
            .then_with(|| a.semester.cmp(&b.semester))
            .then_with(|| a.department_display.cmp(&b.department_display))
            .then_with(|| a.entry.original_filename.cmp(&b.entry.original_filename))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::department::{DepartmentEntity, DepartmentMapping};
    use std::collections::HashMap;

    const PREFIX: &str = "http://archive.example.edu/papers/";

    /// Deterministic matcher: plain substring containment over the
    /// normalized filename, corpus order preserved.
    struct ContainsMatcher;

    impl SubjectMatcher for ContainsMatcher {
        fn search(&self, query: &str, corpus: &[CorpusEntry]) -> Vec<usize> {
            corpus
                .iter()
                .enumerate()
                .filter(|(_, e)| e.normalized_filename.contains(query))
                .map(|(i, _)| i)
                .collect()
        }
    }

    fn entry(year: &str, semester: &str, dept: &str, filename: &str) -> CorpusEntry {
        CorpusEntry {
            url: format!("{}{}/{}/{}/{}", PREFIX, year, semester, dept, filename),
            original_filename: filename.to_string(),
            normalized_filename: crate::text::normalize(
                filename.trim_end_matches(".pdf"),
            ),
        }
    }

    fn departments() -> DepartmentIndex {
        let cs = DepartmentEntity {
            display_name: "Computer Science".to_string(),
            codes: vec!["CS".to_string()],
            search_aliases: vec!["computer science".to_string(), "comp sci".to_string()],
        };
        let math = DepartmentEntity {
            display_name: "Mathematics".to_string(),
            codes: vec!["MA".to_string()],
            search_aliases: vec!["mathematics".to_string(), "maths".to_string()],
        };
        let mut aliases = HashMap::new();
        aliases.insert("cs".to_string(), "Computer Science".to_string());
        aliases.insert("computer science".to_string(), "Computer Science".to_string());
        aliases.insert("maths".to_string(), "Mathematics".to_string());
        DepartmentIndex::from_mapping(DepartmentMapping {
            canonical_departments: vec![cs, math],
            alias_to_canonical_map: aliases,
        })
    }

    fn engine(corpus: Vec<CorpusEntry>) -> SearchEngine {
        SearchEngine::from_parts(
            corpus,
            departments(),
            Box::new(ContainsMatcher),
            PREFIX.to_string(),
        )
    }

    fn query(subject: &str, department: &str) -> SearchQuery {
        SearchQuery {
            subject: subject.to_string(),
            department: department.to_string(),
        }
    }

    #[test]
    fn test_department_alias_query_end_to_end() {
        let engine = engine(vec![entry("2023", "Fall", "Computer_Science", "Algorithms.pdf")]);
        let results = engine.search(&query("", "cs"));
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.department_display, "Computer Science");
        assert_eq!(result.year, "2023");
        assert_eq!(result.semester, "Fall");
    }

    #[test]
    fn test_subject_only_query_uses_entry_own_department() {
        let engine = engine(vec![entry("2023", "Fall", "Computer_Science", "Algorithms.pdf")]);
        let results = engine.search(&query("algo", ""));
        assert_eq!(results.len(), 1);
        // No department filter drove resolution; the decoded segment is
        // alias-resolved on its own ("computer science" is registered).
        assert_eq!(results[0].department_display, "Computer Science");
        assert_eq!(results[0].department_decoded, "Computer_Science");
    }

    #[test]
    fn test_unregistered_segment_falls_back_to_decoded_form() {
        let engine = engine(vec![entry("2022", "Spring", "Fine%20Arts", "Sculpture.pdf")]);
        let results = engine.search(&query("", ""));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].department_display, "Fine Arts");
    }

    #[test]
    fn test_empty_subject_returns_whole_corpus() {
        let corpus = vec![
            entry("2023", "Fall", "Computer_Science", "Algorithms.pdf"),
            entry("2022", "Spring", "Mathematics", "Calculus.pdf"),
            entry("2021", "Winter", "Mathematics", "Linear_Algebra.pdf"),
        ];
        let engine = engine(corpus);
        assert_eq!(engine.search(&query("", "")).len(), 3);
    }

    #[test]
    fn test_department_filter_excludes_other_departments() {
        let corpus = vec![
            entry("2023", "Fall", "Computer_Science", "Algorithms.pdf"),
            entry("2022", "Spring", "Mathematics", "Calculus.pdf"),
        ];
        let engine = engine(corpus);
        let results = engine.search(&query("", "maths"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.original_filename, "Calculus.pdf");
        assert_eq!(results[0].department_display, "Mathematics");
    }

    #[test]
    fn test_unresolved_department_matches_raw_segment() {
        let corpus = vec![
            entry("2023", "Fall", "Naval_Architecture", "Hull_Design.pdf"),
            entry("2023", "Fall", "Computer_Science", "Algorithms.pdf"),
        ];
        let engine = engine(corpus);
        let results = engine.search(&query("", "naval architecture"));
        assert_eq!(results.len(), 1);
        // Unresolved input labels results with the decoded segment.
        assert_eq!(results[0].department_display, "Naval_Architecture");
    }

    #[test]
    fn test_resolved_alias_with_no_patterns_still_labels_canonical_name() {
        // A department with neither codes nor search aliases resolves via
        // the alias index but expands to an empty pattern set, so nothing
        // is filtered out; results must still carry the canonical name,
        // not the entry's own segment.
        let naval = DepartmentEntity {
            display_name: "Naval Architecture".to_string(),
            codes: Vec::new(),
            search_aliases: Vec::new(),
        };
        let mut aliases = HashMap::new();
        aliases.insert("na".to_string(), "Naval Architecture".to_string());
        let departments = DepartmentIndex::from_mapping(DepartmentMapping {
            canonical_departments: vec![naval],
            alias_to_canonical_map: aliases,
        });
        let engine = SearchEngine::from_parts(
            vec![entry("2023", "Fall", "Shipbuilding", "Hull_Design.pdf")],
            departments,
            Box::new(ContainsMatcher),
            PREFIX.to_string(),
        );
        let results = engine.search(&query("", "na"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].department_display, "Naval Architecture");
    }

    #[test]
    fn test_malformed_urls_are_silently_skipped() {
        let mut corpus = vec![entry("2023", "Fall", "Computer_Science", "Algorithms.pdf")];
        corpus.push(CorpusEntry {
            url: format!("{}2023/Fall", PREFIX),
            original_filename: "Orphan.pdf".to_string(),
            normalized_filename: "orphan".to_string(),
        });
        let engine = engine(corpus);
        let results = engine.search(&query("", ""));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.original_filename, "Algorithms.pdf");
    }

    #[test]
    fn test_order_is_independent_of_corpus_order() {
        let a = entry("2021", "Fall", "Computer_Science", "Networks.pdf");
        let b = entry("2021", "Fall", "Computer_Science", "Algorithms.pdf");
        let c = entry("2021", "Spring", "Mathematics", "Calculus.pdf");
        let d = entry("2020", "Winter", "Mathematics", "Statistics.pdf");

        let forward = engine(vec![a.clone(), b.clone(), c.clone(), d.clone()]);
        let shuffled = engine(vec![c, a, d, b]);

        let expected: Vec<String> = forward
            .search(&query("", ""))
            .iter()
            .map(|r| r.entry.original_filename.clone())
            .collect();
        let actual: Vec<String> = shuffled
            .search(&query("", ""))
            .iter()
            .map(|r| r.entry.original_filename.clone())
            .collect();

        assert_eq!(expected, actual);
        // 2020 first, then the 2021 Fall pair by filename, then 2021 Spring.
        assert_eq!(
            expected,
            vec![
                "Statistics.pdf".to_string(),
                "Algorithms.pdf".to_string(),
                "Networks.pdf".to_string(),
                "Calculus.pdf".to_string(),
            ]
        );
    }

    #[test]
    fn test_sort_precedence_year_semester_department_filename() {
        let corpus = vec![
            entry("2023", "Spring", "Mathematics", "Calculus.pdf"),
            entry("2023", "Fall", "Mathematics", "Calculus.pdf"),
            entry("2023", "Fall", "Computer_Science", "Zebra.pdf"),
            entry("2023", "Fall", "Computer_Science", "Algorithms.pdf"),
        ];
        let engine = engine(corpus);
        let names: Vec<(String, String)> = engine
            .search(&query("", ""))
            .iter()
            .map(|r| (r.semester.clone(), r.entry.original_filename.clone()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Fall".to_string(), "Algorithms.pdf".to_string()),
                ("Fall".to_string(), "Zebra.pdf".to_string()),
                ("Fall".to_string(), "Calculus.pdf".to_string()),
                ("Spring".to_string(), "Calculus.pdf".to_string()),
            ]
        );
    }

    #[test]
    fn test_download_filename_derivation() {
        let engine = engine(vec![entry("2023", "Fall", "Computer_Science", "Algorithms.pdf")]);
        let results = engine.search(&query("", "cs"));
        assert_eq!(
            results[0].download_filename(),
            "Computer Science_2023_Fall_Algorithms.pdf"
        );
    }

    #[test]
    fn test_subject_and_department_filters_combine() {
        // "History" keeps clear of the "cs" code pattern; a segment like
        // "Mathematics" would substring-match it ("...ics") and pass.
        let corpus = vec![
            entry("2023", "Fall", "Computer_Science", "Algorithms.pdf"),
            entry("2023", "Fall", "History", "Algorithms_In_Algebra.pdf"),
            entry("2023", "Fall", "Computer_Science", "Databases.pdf"),
        ];
        let engine = engine(corpus);
        let results = engine.search(&query("algo", "cs"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.original_filename, "Algorithms.pdf");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(SearchStatus::Loading.to_string(), "Loading data...");
        assert_eq!(
            SearchStatus::NoMatches.to_string(),
            "No papers found matching your criteria"
        );
    }
}
