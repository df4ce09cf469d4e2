//! Error taxonomy for orchestrated transitions.

use docflow_core::types::DbId;
use docflow_core::DocKind;
use docflow_db::repositories::transition_repo::SQLSTATE_INVALID_STATE;

/// Outcome classification for a failed transition.
///
/// `NotFound`, `Unauthorized` and `InvalidState` are expected outcomes,
/// recovered locally and surfaced to the caller with a specific message.
/// `Db` is an infrastructure failure: it propagates, the unit of work is
/// never committed, and no event is published.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{kind} with rec_id {rec_id} not found")]
    NotFound { kind: DocKind, rec_id: DbId },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Split the stored functions' WF400 signal out of a database error.
///
/// WF400 means the document was not in a state the requested transition is
/// legal in; the message is already user-facing. Everything else stays an
/// infrastructure error.
pub fn classify_db_error(err: sqlx::Error) -> WorkflowError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(SQLSTATE_INVALID_STATE) {
            return WorkflowError::InvalidState(db_err.message().to_string());
        }
    }
    WorkflowError::Db(err)
}
