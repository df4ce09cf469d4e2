//! Repository for the `notifications` table.

use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for notifications queries.
const COLUMNS: &str = "id, user_id, kind, business_id, rec_id, message, is_read, created_at";

/// Insert and read operations for user notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, business_id, rec_id, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.user_id)
            .bind(&input.kind)
            .bind(&input.business_id)
            .bind(input.rec_id)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark one of the user's notifications read.
    ///
    /// Scoped to the owner; a foreign or unknown id fails with
    /// `RowNotFound`.
    pub async fn mark_read(
        pool: &PgPool,
        id: i64,
        user_id: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET is_read = true
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
