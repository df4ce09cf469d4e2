//! Route definitions for the document workflow.
//!
//! The same handler set is mounted once per document kind, with the kind
//! injected via an `Extension` layer on each group.

use axum::routing::{get, post};
use axum::{Extension, Router};

use docflow_core::document::ALL_KINDS;
use docflow_core::DocKind;

use crate::handlers::documents;
use crate::state::AppState;

/// All five document-kind route groups.
pub fn router() -> Router<AppState> {
    let mut router = Router::new();
    for kind in ALL_KINDS {
        router = router.nest(&format!("/{}", kind.path_segment()), kind_router(*kind));
    }
    router
}

/// One document kind's routes.
fn kind_router(kind: DocKind) -> Router<AppState> {
    Router::new()
        .route("/", post(documents::create_draft))
        .route("/{rec_id}", get(documents::get_document))
        .route("/{rec_id}/history", get(documents::get_history))
        .route("/{rec_id}/submit", post(documents::submit))
        .route("/{rec_id}/approve", post(documents::approve))
        .route("/{rec_id}/reject", post(documents::reject))
        .route("/{rec_id}/recall", post(documents::recall))
        .route("/{rec_id}/close", post(documents::close))
        .layer(Extension(kind))
}
