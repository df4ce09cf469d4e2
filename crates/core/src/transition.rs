//! The fixed transition vocabulary of the approval workflow.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five workflow actions a user can take on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Submit,
    Approve,
    Reject,
    Recall,
    Close,
}

impl TransitionKind {
    /// Lowercase action name recorded in `wf_trans` rows and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Submit => "submit",
            TransitionKind::Approve => "approve",
            TransitionKind::Reject => "reject",
            TransitionKind::Recall => "recall",
            TransitionKind::Close => "close",
        }
    }

    /// Whether the transition is performed by the document's creator.
    ///
    /// Submit, Recall and Close belong to the creator; Approve and Reject
    /// belong to whoever the chain currently points at.
    pub fn is_creator_action(&self) -> bool {
        matches!(
            self,
            TransitionKind::Submit | TransitionKind::Recall | TransitionKind::Close
        )
    }

    /// Whether the transition accepts a free-form notes string.
    pub fn accepts_notes(&self) -> bool {
        matches!(self, TransitionKind::Approve | TransitionKind::Reject)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
