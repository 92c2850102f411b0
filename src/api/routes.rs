//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::tasks::TaskService;

use super::task_store::{SqliteTaskStore, StoreError, Task, TaskUpdate};
use super::types::*;

/// Shared application state.
pub struct AppState {
    pub tasks: TaskService,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = SqliteTaskStore::new(config.database_path.clone()).await?;
    let tasks = TaskService::new(Arc::new(store));

    let state = Arc::new(AppState { tasks });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(create_task))
        // Static segment next to /tasks/:id; axum prefers the static match,
        // so a numeric id never shadows this route.
        .route("/tasks/clear/completed", delete(clear_completed))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

fn storage_error(e: StoreError) -> (StatusCode, String) {
    tracing::error!("Storage failure: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn not_found(id: i64) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Task {} not found", id))
}

/// Root banner.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "TaskFlow API - task list manager" }))
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "TaskFlow API running".to_string(),
    })
}

/// List all tasks, newest first.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let tasks = state.tasks.list_tasks().await.map_err(storage_error)?;
    Ok(Json(tasks))
}

/// Get a single task.
async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, (StatusCode, String)> {
    match state.tasks.get_task(id).await.map_err(storage_error)? {
        Some(task) => Ok(Json(task)),
        None => Err(not_found(id)),
    }
}

/// Create a new task.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Task>, (StatusCode, String)> {
    if req.text.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Task text must not be empty".to_string(),
        ));
    }

    let task = state
        .tasks
        .create_task(&req.text, req.completed)
        .await
        .map_err(storage_error)?;
    Ok(Json(task))
}

/// Partially update a task. Omitted fields keep their current values.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Task>, (StatusCode, String)> {
    if update.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Task text must not be empty".to_string(),
        ));
    }

    match state
        .tasks
        .update_task(id, update)
        .await
        .map_err(storage_error)?
    {
        Some(task) => Ok(Json(task)),
        None => Err(not_found(id)),
    }
}

/// Delete a task.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    if state.tasks.delete_task(id).await.map_err(storage_error)? {
        Ok(Json(MessageResponse {
            message: "Task deleted".to_string(),
        }))
    } else {
        Err(not_found(id))
    }
}

/// Remove all completed tasks.
async fn clear_completed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearCompletedResponse>, (StatusCode, String)> {
    let deleted_count = state.tasks.clear_completed().await.map_err(storage_error)?;
    Ok(Json(ClearCompletedResponse {
        message: format!("{} completed tasks removed", deleted_count),
        deleted_count,
    }))
}
