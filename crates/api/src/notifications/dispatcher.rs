//! Event-to-notification dispatch.
//!
//! [`NotificationDispatcher`] subscribes to the workflow event bus and
//! writes one notification row per committed transition, addressed to
//! the next approver or back to the document's creator. Delivery is
//! best-effort: a failed insert is logged and never affects the
//! already-committed transition.

use docflow_core::TransitionKind;
use docflow_db::models::notification::{CreateNotification, Notification};
use docflow_db::repositories::NotificationRepo;
use docflow_db::DbPool;
use docflow_events::WorkflowEvent;
use tokio::sync::broadcast;

/// Background service that turns workflow events into user notifications.
pub struct NotificationDispatcher {
    pool: DbPool,
}

impl NotificationDispatcher {
    /// Create a dispatcher over the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run the dispatch loop.
    ///
    /// Subscribes to the event bus via `receiver` and handles each event
    /// at most once. The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](docflow_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<WorkflowEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.handle_event(&event).await {
                        tracing::error!(
                            error = %e,
                            business_id = %event.business_id,
                            transition = %event.transition,
                            "Failed to dispatch notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Dispatch a single event, returning the notification written (if any).
    pub async fn handle_event(
        &self,
        event: &WorkflowEvent,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let Some(create) = notification_for(event) else {
            return Ok(None);
        };
        let notification = NotificationRepo::create(&self.pool, &create).await?;
        tracing::debug!(
            user = %notification.user_id,
            business_id = %notification.business_id,
            "Notification dispatched"
        );
        Ok(Some(notification))
    }
}

/// Select the recipient and message for a workflow event.
///
/// Submit and a non-terminal Approve address the next approver; terminal
/// Approve, Reject, Recall and Close address the creator. Reject carries
/// the approver's notes in the message.
pub fn notification_for(event: &WorkflowEvent) -> Option<CreateNotification> {
    let business_id = &event.business_id;
    let (user_id, message) = match event.transition {
        TransitionKind::Submit => (
            event.next_approver.clone()?,
            format!(
                "{business_id} submitted by {} awaits your approval",
                event.acting_user
            ),
        ),
        TransitionKind::Approve if event.fully_approved => (
            event.created_by.clone(),
            format!("{business_id} has been fully approved"),
        ),
        TransitionKind::Approve => (
            event.next_approver.clone()?,
            format!(
                "{business_id} approved by {}; your approval is next",
                event.acting_user
            ),
        ),
        TransitionKind::Reject => (
            event.created_by.clone(),
            if event.notes.is_empty() {
                format!("{business_id} was rejected by {}", event.acting_user)
            } else {
                format!(
                    "{business_id} was rejected by {}: {}",
                    event.acting_user, event.notes
                )
            },
        ),
        TransitionKind::Recall => (
            event.created_by.clone(),
            format!("{business_id} was recalled to draft"),
        ),
        TransitionKind::Close => (
            event.created_by.clone(),
            format!("{business_id} was closed"),
        ),
    };

    Some(CreateNotification {
        user_id,
        kind: event.kind.as_str().to_string(),
        business_id: event.business_id.clone(),
        rec_id: event.rec_id,
        message,
    })
}
