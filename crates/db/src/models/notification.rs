//! Notification models written by the dispatcher task.

use docflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: String,
    pub kind: String,
    pub business_id: String,
    pub rec_id: DbId,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: String,
    pub kind: String,
    pub business_id: String,
    pub rec_id: DbId,
    pub message: String,
}
