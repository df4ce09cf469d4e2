use std::sync::Arc;

use docflow_events::EventBus;
use docflow_workflow::TransitionEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: docflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus the engine publishes committed transitions on.
    pub event_bus: Arc<EventBus>,
    /// Transition engine shared by all document-kind routes.
    pub engine: Arc<TransitionEngine>,
}
