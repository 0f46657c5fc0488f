//! # Exam Paper Search Engine
//!
//! ## Overview
//! This library resolves a user's free-text subject and department query
//! against a fixed corpus of exam-paper records, each addressed by a
//! structured URL path (`year/semester/department/filename`).
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `text`: string normalization applied to every compared value
//! - `corpus`: corpus loading and URL path decomposition
//! - `department`: canonical department resolution and pattern matching
//! - `matcher`: fuzzy subject matching behind a narrow trait
//! - `engine`: result assembly, decoration, and deterministic ordering
//! - `storage`: last-search persistence between sessions
//! - `config`: configuration management and settings
//! - `errors`: centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Subject and department query text, bundled JSON resources
//! - **Output**: Ordered match results with display metadata and derived
//!   download filenames
//! - **Determinism**: result order is independent of corpus order and of
//!   the fuzzy matcher's advisory ranking
//!
//! ## Usage
//! ```rust,no_run
//! use exam_paper_search::{Config, SearchEngine, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> exam_paper_search::Result<()> {
//!     let config = Config::from_file("config.toml")?;
//!     let engine = SearchEngine::new(&config).await?;
//!     let results = engine.search(&SearchQuery {
//!         subject: "algorithms".to_string(),
//!         department: "cs".to_string(),
//!     });
//!     println!("Found {} papers", results.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod corpus;
pub mod department;
pub mod engine;
pub mod errors;
pub mod matcher;
pub mod storage;
pub mod text;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use corpus::{CorpusEntry, ParsedPath};
pub use department::{DepartmentEntity, DepartmentFilter, DepartmentIndex};
pub use engine::{MatchResult, SearchEngine, SearchQuery, SearchStatus};
pub use errors::{Result, SearchError};
pub use matcher::{FuzzyMatcher, SubjectMatcher};
pub use storage::{LastSearch, LastSearchStore};
