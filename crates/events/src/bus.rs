//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use chrono::{DateTime, Utc};
use docflow_core::types::DbId;
use docflow_core::{DocKind, TransitionKind};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// WorkflowEvent
// ---------------------------------------------------------------------------

/// Outcome of one committed workflow transition.
///
/// Carries everything the notification dispatcher needs to address the
/// right user: the next approver when the chain continues, the terminal
/// flag when it does not, and the actor's notes for reject messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// Which of the five document kinds transitioned.
    pub kind: DocKind,

    /// The transition that was applied.
    pub transition: TransitionKind,

    /// Human-facing document id, e.g. `PR0007`.
    pub business_id: String,

    /// Physical document id.
    pub rec_id: DbId,

    /// User that performed the transition.
    pub acting_user: String,

    /// User that created the document.
    pub created_by: String,

    /// Approver expected to act next; `None` when nothing is pending.
    pub next_approver: Option<String>,

    /// True for an Approve that exhausted the chain.
    pub fully_approved: bool,

    /// Notes supplied with Approve/Reject; empty otherwise.
    pub notes: String,

    /// When the transition committed (UTC).
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`WorkflowEvent`]. Shared via
/// `Arc<EventBus>` across the application.
pub struct EventBus {
    sender: broadcast::Sender<WorkflowEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// notification delivery is best-effort by contract.
    pub fn publish(&self, event: WorkflowEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
