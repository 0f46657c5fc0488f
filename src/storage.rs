//! # Last-Search Persistence Module
//!
//! ## Purpose
//! Persists the user's last subject and department inputs between sessions
//! in an embedded `sled` database, so a new session can start from the
//! previous search.
//!
//! ## Input/Output Specification
//! - **Input**: Subject and department strings of a successful search
//! - **Output**: The persisted `LastSearch` record, if any
//! - **Write policy**: saved after every search that yields at least one
//!   result; never written for empty result sets
//!
//! ## Key Features
//! - Embedded key-value store, no external service
//! - `bincode`-encoded record with a UTC timestamp

use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LAST_SEARCH_KEY: &[u8] = b"last_search";

/// The persisted inputs of the most recent successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSearch {
    /// Subject input as typed by the user
    pub subject: String,
    /// Department input as typed by the user
    pub department: String,
    /// When the search was run
    pub searched_at: DateTime<Utc>,
}

/// Store for the last-search record.
pub struct LastSearchStore {
    db: sled::Db,
}

impl LastSearchStore {
    /// Open (or create) the store at the given path.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Read the persisted last search, if one exists.
    pub fn load(&self) -> Result<Option<LastSearch>> {
        match self.db.get(LAST_SEARCH_KEY)? {
            Some(bytes) => {
                let last: LastSearch = bincode::deserialize(&bytes)?;
                Ok(Some(last))
            }
            None => Ok(None),
        }
    }

    /// Persist the inputs of a search that yielded results.
    pub fn save(&self, subject: &str, department: &str) -> Result<()> {
        let record = LastSearch {
            subject: subject.to_string(),
            department: department.to_string(),
            searched_at: Utc::now(),
        };
        let bytes = bincode::serialize(&record)?;
        self.db.insert(LAST_SEARCH_KEY, bytes)?;
        self.db.flush()?;
        tracing::debug!(
            "Saved last search: subject={:?} department={:?}",
            subject,
            department
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_on_fresh_store_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastSearchStore::open(&dir.path().join("state")).await.unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastSearchStore::open(&dir.path().join("state")).await.unwrap();

        store.save("algorithms", "cs").unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.subject, "algorithms");
        assert_eq!(loaded.department, "cs");
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = LastSearchStore::open(&dir.path().join("state")).await.unwrap();

        store.save("algorithms", "cs").unwrap();
        store.save("calculus", "maths").unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.subject, "calculus");
        assert_eq!(loaded.department, "maths");
    }
}
