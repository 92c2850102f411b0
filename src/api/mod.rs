//! HTTP API for TaskFlow.
//!
//! ## Endpoints
//!
//! - `GET /tasks` - List all tasks, newest first
//! - `GET /tasks/{id}` - Get a single task
//! - `POST /tasks` - Create a task
//! - `PUT /tasks/{id}` - Partially update a task
//! - `DELETE /tasks/{id}` - Delete a task
//! - `DELETE /tasks/clear/completed` - Remove all completed tasks
//! - `GET /health` - Health check

mod routes;
pub mod task_store;
pub mod types;

pub use routes::serve;
pub use types::*;
