//! # Department Resolution Module
//!
//! ## Purpose
//! Maps a user-typed department string to a canonical department entity and
//! derives the set of normalized patterns used to match corpus URL segments.
//!
//! ## Input/Output Specification
//! - **Input**: Department-mapping JSON resource, free-text department input
//! - **Output**: `DepartmentFilter` with an optional canonical name and a
//!   pattern set for substring matching against URL segments
//! - **Resolution order**: exact alias lookup, then best-fit substring scan
//!
//! ## Key Features
//! - Alias index built once from configuration; read-only afterwards
//! - Best-fit scoring for partial input (`input_len / canonical_len`),
//!   first-listed department wins ties
//! - Pattern expansion into `%20` and `_` encoded variants, because
//!   department segments in archive URLs are encoded inconsistently

use crate::corpus::ParsedPath;
use crate::errors::{Result, SearchError};
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Authoritative record for one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentEntity {
    /// Canonical display name, unique across the mapping
    pub display_name: String,
    /// Official department codes (matched case-insensitively)
    pub codes: Vec<String>,
    /// Additional names and abbreviations users are likely to type
    pub search_aliases: Vec<String>,
}

/// On-disk shape of the department-mapping resource.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentMapping {
    /// Canonical departments, in configuration order
    pub canonical_departments: Vec<DepartmentEntity>,
    /// Normalized alias -> canonical display name
    pub alias_to_canonical_map: HashMap<String, String>,
}

/// Immutable department lookup structures built once at initialization.
///
/// Configuration order of `canonical_departments` is preserved: the
/// substring-fallback scan iterates in that order, and the first-listed
/// department wins score ties.
#[derive(Debug, Clone)]
pub struct DepartmentIndex {
    departments: Vec<DepartmentEntity>,
    by_name: HashMap<String, usize>,
    alias_to_canonical: HashMap<String, String>,
}

/// Outcome of resolving a user's department input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentFilter {
    /// Canonical display name, when the input resolved to one department
    pub canonical: Option<String>,
    /// Normalized patterns matched against URL department segments.
    /// Empty means no department filter: every entry passes.
    pub patterns: Vec<String>,
}

/// The normalized term plus its `%20` and `_` space-substituted variants.
fn space_variants(term: &str) -> [String; 3] {
    [
        term.to_string(),
        term.replace(' ', "%20"),
        term.replace(' ', "_"),
    ]
}

/// Push `value` unless it is empty or already present (insertion order kept).
fn push_unique(values: &mut Vec<String>, value: String) {
    if !value.is_empty() && !values.contains(&value) {
        values.push(value);
    }
}

impl DepartmentIndex {
    /// Build the index from a loaded mapping resource.
    pub fn from_mapping(mapping: DepartmentMapping) -> Self {
        let by_name = mapping
            .canonical_departments
            .iter()
            .enumerate()
            .map(|(i, dept)| (dept.display_name.clone(), i))
            .collect();

        Self {
            departments: mapping.canonical_departments,
            by_name,
            alias_to_canonical: mapping.alias_to_canonical_map,
        }
    }

    /// Load the department-mapping resource from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SearchError::ResourceUnavailable {
                resource: path.to_string_lossy().to_string(),
                details: e.to_string(),
            }
        })?;

        let mapping: DepartmentMapping =
            serde_json::from_str(&content).map_err(|e| SearchError::DataParsing {
                resource: path.to_string_lossy().to_string(),
                details: e.to_string(),
            })?;

        tracing::info!(
            "Loaded department mapping with {} departments and {} aliases from {:?}",
            mapping.canonical_departments.len(),
            mapping.alias_to_canonical_map.len(),
            path
        );
        Ok(Self::from_mapping(mapping))
    }

    /// Number of canonical departments in the index.
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    /// Whether the index holds no departments.
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Canonical display name for an already-normalized alias, if registered.
    pub fn canonical_for_alias(&self, normalized_alias: &str) -> Option<&str> {
        self.alias_to_canonical.get(normalized_alias).map(String::as_str)
    }

    /// Display name for a decoded URL department segment: the alias-resolved
    /// canonical name when one is registered, otherwise the segment itself.
    pub fn display_for_segment(&self, department_decoded: &str) -> String {
        self.canonical_for_alias(&normalize(department_decoded))
            .map(str::to_string)
            .unwrap_or_else(|| department_decoded.to_string())
    }

    /// Resolve free-text department input into a filter.
    ///
    /// Empty (or separator-only) input yields an inactive filter. Otherwise
    /// an exact alias lookup is tried first; failing that, every canonical
    /// display name contained in the input is scored by
    /// `input_len / canonical_len` and the strictly-highest score wins, the
    /// first-listed department keeping ties. A resolved department expands
    /// its aliases and codes into encoded pattern variants; unresolved input
    /// falls back to the variants of the input itself.
    pub fn resolve(&self, user_dept: &str) -> DepartmentFilter {
        let needle = normalize(user_dept);
        if needle.is_empty() {
            return DepartmentFilter {
                canonical: None,
                patterns: Vec::new(),
            };
        }

        let mut canonical = self.alias_to_canonical.get(&needle).cloned();

        if canonical.is_none() {
            let mut best_score = f64::NEG_INFINITY;
            for dept in &self.departments {
                let name = normalize(&dept.display_name);
                if name.is_empty() || !needle.contains(&name) {
                    continue;
                }
                let score = needle.len() as f64 / name.len() as f64;
                if score > best_score {
                    best_score = score;
                    canonical = Some(dept.display_name.clone());
                }
            }
        }

        let mut patterns = Vec::new();
        match canonical
            .as_deref()
            .and_then(|name| self.by_name.get(name))
            .map(|&i| &self.departments[i])
        {
            Some(dept) => {
                // Union of search aliases and lower-cased codes, deduplicated
                // in first-occurrence order.
                let mut terms: Vec<String> = Vec::new();
                for term in dept
                    .search_aliases
                    .iter()
                    .cloned()
                    .chain(dept.codes.iter().map(|c| c.to_lowercase()))
                {
                    if !terms.contains(&term) {
                        terms.push(term);
                    }
                }
                for term in &terms {
                    for variant in space_variants(&normalize(term)) {
                        push_unique(&mut patterns, variant);
                    }
                }
            }
            None => {
                for variant in space_variants(&needle) {
                    push_unique(&mut patterns, variant);
                }
            }
        }

        DepartmentFilter { canonical, patterns }
    }
}

impl DepartmentFilter {
    /// Whether a department filter is in effect.
    pub fn is_active(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Whether the entry behind `path` passes this filter.
    ///
    /// A pattern matches when it is a substring of either the normalized raw
    /// or the normalized decoded department segment. An inactive filter
    /// passes everything.
    pub fn matches(&self, path: &ParsedPath) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let raw = normalize(&path.department_raw);
        let decoded = normalize(&path.department_decoded);
        self.patterns
            .iter()
            .any(|p| raw.contains(p) || decoded.contains(p))
    }
}
