//! Task service: id-based lookups and partial-update merge semantics on top
//! of the record store.

use std::sync::Arc;

use crate::api::task_store::{StoreError, Task, TaskStore, TaskUpdate};

/// Stateless logic layer between the HTTP handlers and the record store.
/// Every operation is a single request-response cycle against storage.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// All tasks, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.store.fetch_all().await
    }

    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        self.store.fetch_by_id(id).await
    }

    /// Insert a task, then re-fetch it by the assigned id. The insert does
    /// not return the generated `created_at`, so the second read is required
    /// to hand back a fully materialized task.
    pub async fn create_task(&self, text: &str, completed: bool) -> Result<Task, StoreError> {
        let id = self.store.insert(text, completed).await?;
        self.store
            .fetch_by_id(id)
            .await?
            .ok_or(StoreError::MissingAfterWrite(id))
    }

    /// Read-merge-write-reread. Fields absent from `update` keep their
    /// current values; the write happens even when the merge changes nothing,
    /// and the returned task reflects the post-write row. `None` means the id
    /// does not exist and nothing was written.
    pub async fn update_task(
        &self,
        id: i64,
        update: TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        let Some(current) = self.store.fetch_by_id(id).await? else {
            return Ok(None);
        };

        let text = update.text.unwrap_or(current.text);
        let completed = update.completed.unwrap_or(current.completed);
        self.store.apply_update(id, &text, completed).await?;

        self.store
            .fetch_by_id(id)
            .await?
            .ok_or(StoreError::MissingAfterWrite(id))
            .map(Some)
    }

    /// Returns whether a task was actually removed (`false` means not found).
    pub async fn delete_task(&self, id: i64) -> Result<bool, StoreError> {
        self.store.delete_by_id(id).await
    }

    /// Remove every completed task. Zero removals is a normal outcome.
    pub async fn clear_completed(&self) -> Result<usize, StoreError> {
        self.store.delete_all_completed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::task_store::SqliteTaskStore;
    use tempfile::TempDir;

    async fn service() -> (TempDir, TaskService) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SqliteTaskStore::new(dir.path().join("tasks.db"))
            .await
            .expect("Failed to open store");
        (dir, TaskService::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_create_returns_materialized_task() {
        let (_dir, service) = service().await;

        let task = service
            .create_task("Defeat the boss", false)
            .await
            .expect("Failed to create task");

        assert!(task.id > 0);
        assert_eq!(task.text, "Defeat the boss");
        assert!(!task.completed);

        // created_at comes from the store, and the fetched row matches
        let fetched = service
            .get_task(task.id)
            .await
            .expect("Failed to get task")
            .expect("Task not found");
        assert_eq!(fetched, task);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_dir, service) = service().await;

        let a = service
            .create_task("A", false)
            .await
            .expect("Failed to create task");
        let b = service
            .create_task("B", false)
            .await
            .expect("Failed to create task");

        let tasks = service.list_tasks().await.expect("Failed to list tasks");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, b.id, "B was created after A, so it lists first");
        assert_eq!(tasks[1].id, a.id);
    }

    #[tokio::test]
    async fn test_partial_update_completed_only_keeps_text() {
        let (_dir, service) = service().await;

        let task = service
            .create_task("Buy milk", false)
            .await
            .expect("Failed to create task");

        let updated = service
            .update_task(
                task.id,
                TaskUpdate {
                    text: None,
                    completed: Some(true),
                },
            )
            .await
            .expect("Failed to update task")
            .expect("Task not found");

        assert_eq!(updated.text, "Buy milk");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn test_partial_update_text_only_keeps_completed() {
        let (_dir, service) = service().await;

        let task = service
            .create_task("X", true)
            .await
            .expect("Failed to create task");

        let updated = service
            .update_task(
                task.id,
                TaskUpdate {
                    text: Some("Y".to_string()),
                    completed: None,
                },
            )
            .await
            .expect("Failed to update task")
            .expect("Task not found");

        assert_eq!(updated.text, "Y");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn test_empty_update_changes_nothing() {
        let (_dir, service) = service().await;

        let task = service
            .create_task("steady", true)
            .await
            .expect("Failed to create task");

        let updated = service
            .update_task(task.id, TaskUpdate::default())
            .await
            .expect("Failed to update task")
            .expect("Task not found");

        assert_eq!(updated.text, task.text);
        assert_eq!(updated.completed, task.completed);
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_writes_nothing() {
        let (_dir, service) = service().await;

        let result = service
            .update_task(
                7,
                TaskUpdate {
                    text: Some("ghost".to_string()),
                    completed: Some(true),
                },
            )
            .await
            .expect("Failed to update task");
        assert!(result.is_none());

        let tasks = service.list_tasks().await.expect("Failed to list tasks");
        assert!(tasks.is_empty(), "No row may be created by a missed update");
    }

    #[tokio::test]
    async fn test_delete_distinguishes_found_from_missing() {
        let (_dir, service) = service().await;

        assert!(!service.delete_task(1).await.expect("Failed to delete"));

        let task = service
            .create_task("gone soon", false)
            .await
            .expect("Failed to create task");
        assert!(service.delete_task(task.id).await.expect("Failed to delete"));
        assert!(service
            .get_task(task.id)
            .await
            .expect("Failed to get task")
            .is_none());
    }

    #[tokio::test]
    async fn test_clear_completed_is_exact_and_idempotent() {
        let (_dir, service) = service().await;

        service
            .create_task("keep me", false)
            .await
            .expect("Failed to create task");
        service
            .create_task("done 1", true)
            .await
            .expect("Failed to create task");
        service
            .create_task("done 2", true)
            .await
            .expect("Failed to create task");

        let removed = service
            .clear_completed()
            .await
            .expect("Failed to clear completed");
        assert_eq!(removed, 2);

        let remaining = service.list_tasks().await.expect("Failed to list tasks");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "keep me");

        let removed = service
            .clear_completed()
            .await
            .expect("Failed to clear completed");
        assert_eq!(removed, 0, "Second pass has nothing to remove");
    }
}
