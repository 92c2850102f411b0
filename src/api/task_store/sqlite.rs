//! SQLite-backed task store.

use super::{StoreError, Task, TaskStore};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#;

pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Open (or create) the database file and ensure the tasks table exists.
    /// Idempotent across process restarts: existing rows are untouched.
    pub async fn new(db_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = db_path.into();
        let path = db_path.clone();

        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.execute_batch(SCHEMA)?;
            Ok::<_, StoreError>(())
        })
        .await??;

        tracing::info!("Task database ready at {}", db_path.display());
        Ok(Self { db_path })
    }

    /// Run `f` with a connection opened just for this call. The connection is
    /// dropped, and with it released, on every exit path.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }
}

fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get(2)?,
        created_at: row.get(3)?,
    })
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, text: &str, completed: bool) -> Result<i64, StoreError> {
        let text = text.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO tasks (text, completed) VALUES (?1, ?2)",
                params![text, completed],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Task>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, text, completed, created_at FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()
        })
        .await
    }

    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError> {
        self.with_conn(|conn| {
            // id as tiebreak keeps newest-first deterministic for rows created
            // within the timestamp granularity
            let mut stmt = conn.prepare(
                "SELECT id, text, completed, created_at FROM tasks
                 ORDER BY created_at DESC, id DESC",
            )?;
            let tasks = stmt
                .query_map([], row_to_task)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
        .await
    }

    async fn apply_update(
        &self,
        id: i64,
        text: &str,
        completed: bool,
    ) -> Result<usize, StoreError> {
        let text = text.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "UPDATE tasks SET text = ?1, completed = ?2 WHERE id = ?3",
                params![text, completed, id],
            )
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(rows > 0)
        })
        .await
    }

    async fn delete_all_completed(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| conn.execute("DELETE FROM tasks WHERE completed = 1", []))
            .await
    }
}
