//! # TaskFlow
//!
//! Minimal task-list management API over a SQLite-backed record store.
//!
//! ## Request Flow
//! 1. HTTP request hits an axum handler
//! 2. Handler calls the task service
//! 3. Service runs raw CRUD against the record store
//! 4. Row(s) are mapped back to `Task` values and returned as JSON
//!
//! ## Modules
//! - `api`: HTTP routes, request/response types, and the task record store
//! - `tasks`: task service (partial-update merge and id-based lookups)
//! - `config`: environment-driven server configuration

pub mod api;
pub mod config;
pub mod tasks;

pub use config::Config;
pub use tasks::TaskService;
