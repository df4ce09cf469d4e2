pub mod documents;
pub mod health;
pub mod notifications;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (repeated under each of the five document-kind
/// segments):
///
/// ```text
/// /purchase-requests                 create_draft
/// /purchase-requests/{rec_id}        get_document
/// /purchase-requests/{rec_id}/history        get_history
/// /purchase-requests/{rec_id}/submit         submit
/// /purchase-requests/{rec_id}/approve        approve
/// /purchase-requests/{rec_id}/reject         reject
/// /purchase-requests/{rec_id}/recall         recall
/// /purchase-requests/{rec_id}/close          close
/// ```
///
/// plus the notification read surface:
///
/// ```text
/// /notifications               list_notifications
/// /notifications/{id}/read     mark_read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(documents::router())
        .merge(notifications::router())
}
