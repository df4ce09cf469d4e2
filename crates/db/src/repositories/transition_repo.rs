//! Repository over the stored workflow transition functions.
//!
//! The actual state machine (next approver, chain length, status codes)
//! lives in the `wf_*` plpgsql functions; this repository only invokes
//! them and maps their results. Each call inserts exactly one `wf_trans`
//! audit row and returns the post-transition header.
//!
//! All methods take a `&mut PgConnection` so the caller decides the
//! transaction scope; the orchestration layer always runs them inside its
//! unit of work.

use docflow_core::types::DbId;
use docflow_core::TransitionKind;
use sqlx::PgConnection;

use crate::models::document::DocumentHeader;

/// SQLSTATE raised by the stored functions when a transition is requested
/// from a state it is not legal in.
pub const SQLSTATE_INVALID_STATE: &str = "WF400";

/// Invokes the stored transition functions.
pub struct TransitionRepo;

impl TransitionRepo {
    /// Submit a draft (or rejected) document into its approval chain.
    pub async fn submit_by_id(
        conn: &mut PgConnection,
        rec_id: DbId,
        modified_by: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        sqlx::query_as::<_, DocumentHeader>("SELECT * FROM wf_submit($1, $2)")
            .bind(rec_id)
            .bind(modified_by)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Approve at the current chain stage, advancing or completing the chain.
    pub async fn approve_by_id(
        conn: &mut PgConnection,
        rec_id: DbId,
        modified_by: &str,
        notes: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        sqlx::query_as::<_, DocumentHeader>("SELECT * FROM wf_approve($1, $2, $3)")
            .bind(rec_id)
            .bind(modified_by)
            .bind(notes)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Reject the document at the current chain stage.
    pub async fn reject_by_id(
        conn: &mut PgConnection,
        rec_id: DbId,
        modified_by: &str,
        notes: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        sqlx::query_as::<_, DocumentHeader>("SELECT * FROM wf_reject($1, $2, $3)")
            .bind(rec_id)
            .bind(modified_by)
            .bind(notes)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Pull a pending document back to draft before any approval completed.
    pub async fn recall_by_id(
        conn: &mut PgConnection,
        rec_id: DbId,
        modified_by: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        sqlx::query_as::<_, DocumentHeader>("SELECT * FROM wf_recall($1, $2)")
            .bind(rec_id)
            .bind(modified_by)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Close a fully approved document.
    pub async fn close_by_id(
        conn: &mut PgConnection,
        rec_id: DbId,
        modified_by: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        sqlx::query_as::<_, DocumentHeader>("SELECT * FROM wf_close($1, $2)")
            .bind(rec_id)
            .bind(modified_by)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Dispatch on the transition kind; notes are ignored by transitions
    /// that do not accept them.
    pub async fn apply(
        conn: &mut PgConnection,
        transition: TransitionKind,
        rec_id: DbId,
        modified_by: &str,
        notes: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        match transition {
            TransitionKind::Submit => Self::submit_by_id(conn, rec_id, modified_by).await,
            TransitionKind::Approve => {
                Self::approve_by_id(conn, rec_id, modified_by, notes).await
            }
            TransitionKind::Reject => Self::reject_by_id(conn, rec_id, modified_by, notes).await,
            TransitionKind::Recall => Self::recall_by_id(conn, rec_id, modified_by).await,
            TransitionKind::Close => Self::close_by_id(conn, rec_id, modified_by).await,
        }
    }
}

/// True when `err` is the stored functions' invalid-state signal.
pub fn is_invalid_state(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(SQLSTATE_INVALID_STATE)
        }
        _ => false,
    }
}
