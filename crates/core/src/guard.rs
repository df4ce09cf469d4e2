//! Authority guard: who may perform which workflow transition.
//!
//! The guard looks only at the pre-transition snapshot. Denial is a normal
//! outcome, not an error: the orchestrator turns it into a user-facing
//! message and never reaches the repository.

use crate::transition::TransitionKind;

/// The slice of a document header the guard needs to decide.
///
/// Implemented by the persistence layer's header model so the guard stays
/// free of any database types.
pub trait WorkflowDocument {
    /// User id that created the document.
    fn created_by(&self) -> &str;

    /// User id expected to act next, when the document is pending approval.
    fn current_approver(&self) -> Option<&str>;
}

/// A refused transition, carrying the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub reason: String,
}

impl Denial {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Decide whether `acting_user` may perform `transition` on the document.
///
/// Submit, Recall and Close are creator-only; Approve and Reject are
/// current-approver-only. The snapshot must be fetched fresh immediately
/// before this call.
pub fn authorize<D: WorkflowDocument>(
    transition: TransitionKind,
    document: &D,
    acting_user: &str,
) -> Result<(), Denial> {
    if transition.is_creator_action() {
        if acting_user == document.created_by() {
            Ok(())
        } else {
            Err(Denial::new(format!(
                "Only the creator ({}) may {transition} this document",
                document.created_by()
            )))
        }
    } else {
        match document.current_approver() {
            Some(approver) if approver == acting_user => Ok(()),
            Some(approver) => Err(Denial::new(format!(
                "Only the current approver ({approver}) may {transition} this document"
            ))),
            None => Err(Denial::new(format!(
                "Document has no pending approver; cannot {transition}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Snapshot {
        created_by: &'static str,
        current_approver: Option<&'static str>,
    }

    impl WorkflowDocument for Snapshot {
        fn created_by(&self) -> &str {
            self.created_by
        }

        fn current_approver(&self) -> Option<&str> {
            self.current_approver
        }
    }

    const PENDING: Snapshot = Snapshot {
        created_by: "alice",
        current_approver: Some("bob"),
    };

    const DRAFT: Snapshot = Snapshot {
        created_by: "alice",
        current_approver: None,
    };

    #[test]
    fn test_creator_may_submit_recall_close() {
        for t in [
            TransitionKind::Submit,
            TransitionKind::Recall,
            TransitionKind::Close,
        ] {
            assert!(authorize(t, &DRAFT, "alice").is_ok());
        }
    }

    #[test]
    fn test_non_creator_denied_submit() {
        let denial = authorize(TransitionKind::Submit, &DRAFT, "bob").unwrap_err();
        assert!(denial.reason.contains("creator"));
        assert!(denial.reason.contains("alice"));
    }

    #[test]
    fn test_approver_may_approve_and_reject() {
        assert!(authorize(TransitionKind::Approve, &PENDING, "bob").is_ok());
        assert!(authorize(TransitionKind::Reject, &PENDING, "bob").is_ok());
    }

    #[test]
    fn test_wrong_user_denied_approve() {
        let denial = authorize(TransitionKind::Approve, &PENDING, "carol").unwrap_err();
        assert!(denial.reason.contains("bob"));
    }

    #[test]
    fn test_creator_may_not_approve_own_document() {
        assert!(authorize(TransitionKind::Approve, &PENDING, "alice").is_err());
    }

    #[test]
    fn test_approve_denied_when_no_pending_approver() {
        let denial = authorize(TransitionKind::Approve, &DRAFT, "bob").unwrap_err();
        assert!(denial.reason.contains("no pending approver"));
    }

    #[test]
    fn test_approver_may_not_recall() {
        assert!(authorize(TransitionKind::Recall, &PENDING, "bob").is_err());
    }
}
