//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to create a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// The task text (must not be blank)
    pub text: String,

    /// Initial completion state (defaults to false)
    #[serde(default)]
    pub completed: bool,
}

/// Generic confirmation payload.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response after removing all completed tasks.
#[derive(Debug, Clone, Serialize)]
pub struct ClearCompletedResponse {
    pub message: String,

    /// How many tasks were removed (0 is a valid outcome)
    pub deleted_count: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}
