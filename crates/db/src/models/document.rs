//! Document header model shared by all five document kinds.

use docflow_core::guard::WorkflowDocument;
use docflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `document_headers` table.
///
/// `rec_id` is the immutable physical identity; `business_id` is the
/// human-facing id assigned on first persist and never changed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentHeader {
    pub rec_id: DbId,
    pub business_id: String,
    pub kind: String,
    pub status_id: i16,
    pub revision: i32,
    pub current_approver: Option<String>,
    pub current_index: Option<i32>,
    pub wf_trans_id: Option<DbId>,
    pub created_by: String,
    pub modified_by: String,
    pub created_date: Timestamp,
    pub modified_date: Timestamp,
}

impl WorkflowDocument for DocumentHeader {
    fn created_by(&self) -> &str {
        &self.created_by
    }

    fn current_approver(&self) -> Option<&str> {
        self.current_approver.as_deref()
    }
}

/// DTO for inserting a new draft header.
///
/// Drafts are created by the owning document service; the workflow layer
/// only ever mutates existing headers through the transition functions.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub created_by: String,
}
