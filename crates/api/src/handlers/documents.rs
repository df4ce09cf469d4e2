//! Handlers for the document workflow endpoints.
//!
//! One handler set serves all five document kinds; the kind is injected
//! per route group via an [`Extension`] layer so `/purchase-requests/...`
//! and `/sales-invoices/...` share the same code path through the engine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use docflow_core::types::DbId;
use docflow_core::DocKind;
use docflow_db::models::document::{CreateDocument, DocumentHeader};
use docflow_db::repositories::{DocumentRepo, WfTransRepo};
use docflow_workflow::{TransitionOutcome, WorkflowError};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional request body for approve/reject.
#[derive(Debug, Default, Deserialize)]
pub struct NotesRequest {
    pub notes: Option<String>,
}

/// Response payload for a successful transition.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub header: DocumentHeader,
    pub fully_approved: bool,
}

impl From<TransitionOutcome> for TransitionResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        Self {
            header: outcome.header,
            fully_approved: outcome.fully_approved,
        }
    }
}

/// POST /api/v1/{kind}/
///
/// Create a draft document owned by the acting user. Field-level editing
/// of drafts belongs to the owning document services and is not exposed
/// here.
pub async fn create_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
) -> AppResult<impl IntoResponse> {
    let doc = DocumentRepo::create(
        &state.pool,
        kind,
        &CreateDocument {
            created_by: auth.user_id.clone(),
        },
    )
    .await?;

    tracing::info!(
        user = %auth.user_id,
        kind = %kind,
        business_id = %doc.business_id,
        "Draft created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: doc })))
}

/// GET /api/v1/{kind}/{rec_id}
///
/// Current header snapshot.
pub async fn get_document(
    _auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = DocumentRepo::find_by_id(&state.pool, kind, rec_id)
        .await?
        .ok_or(WorkflowError::NotFound { kind, rec_id })?;
    Ok(Json(DataResponse { data: doc }))
}

/// GET /api/v1/{kind}/{rec_id}/history
///
/// Ordered workflow audit trail for the document, oldest action first.
pub async fn get_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = DocumentRepo::find_by_id(&state.pool, kind, rec_id)
        .await?
        .ok_or(WorkflowError::NotFound { kind, rec_id })?;

    let history = WfTransRepo::history(&state.pool, &doc.business_id, kind.wf_form_id()).await?;
    Ok(Json(DataResponse { data: history }))
}

/// POST /api/v1/{kind}/{rec_id}/submit
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.engine.submit(kind, rec_id, &auth.user_id).await?;
    Ok(Json(DataResponse {
        data: TransitionResponse::from(outcome),
    }))
}

/// POST /api/v1/{kind}/{rec_id}/approve
///
/// Body is optional; absent notes are treated as empty.
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
    input: Option<Json<NotesRequest>>,
) -> AppResult<impl IntoResponse> {
    let notes = input.and_then(|Json(body)| body.notes);
    let outcome = state
        .engine
        .approve(kind, rec_id, &auth.user_id, notes.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: TransitionResponse::from(outcome),
    }))
}

/// POST /api/v1/{kind}/{rec_id}/reject
///
/// Body is optional; absent notes are treated as empty.
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
    input: Option<Json<NotesRequest>>,
) -> AppResult<impl IntoResponse> {
    let notes = input.and_then(|Json(body)| body.notes);
    let outcome = state
        .engine
        .reject(kind, rec_id, &auth.user_id, notes.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: TransitionResponse::from(outcome),
    }))
}

/// POST /api/v1/{kind}/{rec_id}/recall
pub async fn recall(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.engine.recall(kind, rec_id, &auth.user_id).await?;
    Ok(Json(DataResponse {
        data: TransitionResponse::from(outcome),
    }))
}

/// POST /api/v1/{kind}/{rec_id}/close
pub async fn close(
    auth: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<DocKind>,
    Path(rec_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.engine.close(kind, rec_id, &auth.user_id).await?;
    Ok(Json(DataResponse {
        data: TransitionResponse::from(outcome),
    }))
}
