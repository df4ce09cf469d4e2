//! Workflow transaction audit model.

use docflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `wf_trans` table.
///
/// One row is written per successful transition, by the stored transition
/// function, never by application code. Rows are immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WfTrans {
    pub wf_trans_id: DbId,
    pub wf_form_id: i32,
    pub ref_id: String,
    pub chain_index: i32,
    pub user_id: String,
    pub action: String,
    pub action_date: Timestamp,
    pub notes: String,
}
