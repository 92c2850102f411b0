//! Task storage module.
//!
//! Owns the `tasks` table: schema, raw CRUD primitives, and row mapping.
//! The SQLite backend opens a fresh connection per operation; no handle is
//! shared or held across calls.

mod sqlite;

pub use sqlite::SqliteTaskStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted to-do task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store at insertion, never reused after deletion.
    pub id: i64,
    pub text: String,
    pub completed: bool,
    /// Assigned by the store at insertion, never updated afterwards.
    pub created_at: DateTime<Utc>,
}

/// Partial update input. `None` means "leave the field as it is";
/// only `Some` values overwrite during a merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskUpdate {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Storage-layer failure. Fatal to the operation that hit it; never retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("task {0} missing after write")]
    MissingAfterWrite(i64),
}

/// Record store trait - raw CRUD against the tasks table.
///
/// Absence of a row is an `Option`/`bool`/count signal, never an error;
/// `StoreError` is reserved for storage faults.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Append a new row. The store assigns `id` and `created_at`; only the
    /// new id is returned, so callers needing the full row must re-fetch.
    async fn insert(&self, text: &str, completed: bool) -> Result<i64, StoreError>;

    /// Fetch a single task by id.
    async fn fetch_by_id(&self, id: i64) -> Result<Option<Task>, StoreError>;

    /// Fetch every task, newest first.
    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Overwrite both mutable columns for the given id, unconditionally.
    /// Returns the number of rows that matched (0 or 1).
    async fn apply_update(&self, id: i64, text: &str, completed: bool)
        -> Result<usize, StoreError>;

    /// Delete a single task. Returns whether a row was actually removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Delete every completed task. Returns the number removed.
    async fn delete_all_completed(&self) -> Result<usize, StoreError>;
}
