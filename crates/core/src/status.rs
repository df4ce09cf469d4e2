//! Workflow status constants shared by all document kinds.
//!
//! Stored in the `status_id` column of `document_headers` and mirrored by
//! the stored transition functions; the values must stay in sync with the
//! seed migration.

/// Document exists but has not entered the approval workflow.
pub const DRAFT: i16 = 0;

/// Document is pending approval at some stage of its chain.
pub const SUBMITTED: i16 = 1;

/// Every approver in the chain has approved.
pub const APPROVED: i16 = 2;

/// An approver rejected the document; it may be edited and resubmitted.
pub const REJECTED: i16 = 3;

/// Terminal state; closed by the creator after full approval.
pub const CLOSED: i16 = 4;

/// Human-readable label for a status id, for messages and notifications.
pub fn label(status_id: i16) -> &'static str {
    match status_id {
        DRAFT => "draft",
        SUBMITTED => "submitted",
        APPROVED => "approved",
        REJECTED => "rejected",
        CLOSED => "closed",
        _ => "unknown",
    }
}
