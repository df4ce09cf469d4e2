//! The transition engine: one generic orchestrator for all five document
//! kinds and all five transitions.

use std::sync::Arc;

use chrono::Utc;
use docflow_core::types::DbId;
use docflow_core::{authorize, status, DocKind, TransitionKind};
use docflow_db::models::document::DocumentHeader;
use docflow_db::DbPool;
use docflow_events::{EventBus, WorkflowEvent};

use crate::error::{classify_db_error, WorkflowError};
use crate::store::{PgWorkflowStore, WorkflowStore};

/// A successfully applied transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// Post-transition header, re-read after commit.
    pub header: DocumentHeader,
    /// True when an Approve exhausted the chain (no approver remains).
    pub fully_approved: bool,
}

/// Orchestrates workflow transitions against a [`WorkflowStore`].
///
/// Per operation: fetch the pre-transition snapshot, run the authority
/// guard, apply the stored transition inside a unit of work, commit
/// exactly once, re-read the post-transition snapshot, publish exactly
/// one event. Any failure before the commit leaves the transaction to
/// roll back on drop and publishes nothing.
pub struct TransitionEngine<S = PgWorkflowStore> {
    store: S,
    bus: Arc<EventBus>,
}

impl TransitionEngine<PgWorkflowStore> {
    /// Production engine over a Postgres pool.
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self {
            store: PgWorkflowStore::new(pool),
            bus,
        }
    }
}

impl<S: WorkflowStore> TransitionEngine<S> {
    /// Engine over an arbitrary store implementation.
    pub fn with_store(store: S, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }

    /// Submit a draft (or rejected) document into its approval chain.
    /// Creator-only.
    pub async fn submit(
        &self,
        kind: DocKind,
        rec_id: DbId,
        acting_user: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.run(TransitionKind::Submit, kind, rec_id, acting_user, "")
            .await
    }

    /// Approve at the current chain stage. Current-approver-only.
    pub async fn approve(
        &self,
        kind: DocKind,
        rec_id: DbId,
        acting_user: &str,
        notes: Option<&str>,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.run(
            TransitionKind::Approve,
            kind,
            rec_id,
            acting_user,
            notes.unwrap_or(""),
        )
        .await
    }

    /// Reject at the current chain stage. Current-approver-only.
    pub async fn reject(
        &self,
        kind: DocKind,
        rec_id: DbId,
        acting_user: &str,
        notes: Option<&str>,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.run(
            TransitionKind::Reject,
            kind,
            rec_id,
            acting_user,
            notes.unwrap_or(""),
        )
        .await
    }

    /// Pull a pending document back to draft. Creator-only.
    pub async fn recall(
        &self,
        kind: DocKind,
        rec_id: DbId,
        acting_user: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.run(TransitionKind::Recall, kind, rec_id, acting_user, "")
            .await
    }

    /// Close a fully approved document. Creator-only.
    pub async fn close(
        &self,
        kind: DocKind,
        rec_id: DbId,
        acting_user: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        self.run(TransitionKind::Close, kind, rec_id, acting_user, "")
            .await
    }

    async fn run(
        &self,
        transition: TransitionKind,
        kind: DocKind,
        rec_id: DbId,
        acting_user: &str,
        notes: &str,
    ) -> Result<TransitionOutcome, WorkflowError> {
        // Fresh pre-transition snapshot; deliberately outside the unit of
        // work (see DESIGN.md on the authorization read).
        let pre = self
            .store
            .fetch_header(kind, rec_id)
            .await
            .map_err(classify_db_error)?
            .ok_or(WorkflowError::NotFound { kind, rec_id })?;

        if let Err(denial) = authorize(transition, &pre, acting_user) {
            tracing::info!(
                kind = %kind,
                rec_id,
                user = acting_user,
                transition = %transition,
                "Transition denied"
            );
            return Err(WorkflowError::Unauthorized(denial.reason));
        }

        let mut uow = self.store.begin().await.map_err(classify_db_error)?;
        uow.apply(transition, rec_id, acting_user, notes)
            .await
            .map_err(classify_db_error)?
            .ok_or(WorkflowError::NotFound { kind, rec_id })?;
        uow.commit().await.map_err(classify_db_error)?;

        // Post-transition snapshot, re-read after the commit.
        let post = self
            .store
            .fetch_header(kind, rec_id)
            .await
            .map_err(classify_db_error)?
            .ok_or(WorkflowError::NotFound { kind, rec_id })?;

        let fully_approved =
            transition == TransitionKind::Approve && post.current_approver.is_none();

        self.bus.publish(WorkflowEvent {
            kind,
            transition,
            business_id: post.business_id.clone(),
            rec_id,
            acting_user: acting_user.to_string(),
            created_by: post.created_by.clone(),
            next_approver: post.current_approver.clone(),
            fully_approved,
            notes: notes.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(
            kind = %kind,
            rec_id,
            user = acting_user,
            transition = %transition,
            status = status::label(post.status_id),
            fully_approved,
            "Workflow transition applied"
        );

        Ok(TransitionOutcome {
            header: post,
            fully_approved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockWorkflowStore, MockWorkflowUow, WorkflowUow};
    use assert_matches::assert_matches;
    use tokio::sync::broadcast::error::TryRecvError;

    fn header(status_id: i16, current_approver: Option<&str>) -> DocumentHeader {
        DocumentHeader {
            rec_id: 1,
            business_id: "PR0001".to_string(),
            kind: "purchase_request".to_string(),
            status_id,
            revision: 0,
            current_approver: current_approver.map(str::to_string),
            current_index: current_approver.map(|_| 0),
            wf_trans_id: None,
            created_by: "alice".to_string(),
            modified_by: "alice".to_string(),
            created_date: Utc::now(),
            modified_date: Utc::now(),
        }
    }

    /// A unit of work that applies successfully and expects one commit.
    fn committing_uow(result: DocumentHeader) -> Box<dyn WorkflowUow> {
        let mut uow = MockWorkflowUow::new();
        uow.expect_apply()
            .times(1)
            .returning(move |_, _, _, _| Ok(Some(result.clone())));
        uow.expect_commit().times(1).returning(|| Ok(()));
        Box::new(uow)
    }

    #[tokio::test]
    async fn denied_transition_never_opens_a_unit_of_work() {
        let mut store = MockWorkflowStore::new();
        store
            .expect_fetch_header()
            .times(1)
            .returning(|_, _| Ok(Some(header(status::DRAFT, None))));
        // The repository must not be reached on denial.
        store.expect_begin().times(0);

        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let engine = TransitionEngine::with_store(store, bus);

        let err = engine
            .submit(DocKind::PurchaseRequest, 1, "mallory")
            .await
            .unwrap_err();

        assert_matches!(err, WorkflowError::Unauthorized(reason) => {
            assert!(reason.contains("creator"));
        });
        assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn unknown_rec_id_is_not_found() {
        let mut store = MockWorkflowStore::new();
        store
            .expect_fetch_header()
            .times(1)
            .returning(|_, _| Ok(None));
        store.expect_begin().times(0);

        let engine = TransitionEngine::with_store(store, Arc::new(EventBus::default()));

        let err = engine
            .close(DocKind::SalesInvoice, 42, "alice")
            .await
            .unwrap_err();
        assert_matches!(
            err,
            WorkflowError::NotFound {
                kind: DocKind::SalesInvoice,
                rec_id: 42
            }
        );
    }

    #[tokio::test]
    async fn successful_submit_commits_once_and_publishes_once() {
        let mut store = MockWorkflowStore::new();
        let mut reads = 0;
        store.expect_fetch_header().times(2).returning(move |_, _| {
            reads += 1;
            if reads == 1 {
                Ok(Some(header(status::DRAFT, None)))
            } else {
                Ok(Some(header(status::SUBMITTED, Some("amara.osei"))))
            }
        });
        store
            .expect_begin()
            .times(1)
            .returning(|| Ok(committing_uow(header(status::SUBMITTED, Some("amara.osei")))));

        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let engine = TransitionEngine::with_store(store, bus);

        let outcome = engine
            .submit(DocKind::PurchaseRequest, 1, "alice")
            .await
            .unwrap();
        assert_eq!(outcome.header.status_id, status::SUBMITTED);
        assert!(!outcome.fully_approved);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.transition, TransitionKind::Submit);
        assert_eq!(event.next_approver.as_deref(), Some("amara.osei"));
        assert_eq!(event.acting_user, "alice");
        // Exactly one event.
        assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn repository_failure_skips_commit_and_event() {
        let mut store = MockWorkflowStore::new();
        store
            .expect_fetch_header()
            .times(1)
            .returning(|_, _| Ok(Some(header(status::SUBMITTED, Some("bob")))));
        store.expect_begin().times(1).returning(|| {
            let mut uow = MockWorkflowUow::new();
            uow.expect_apply()
                .times(1)
                .returning(|_, _, _, _| Err(sqlx::Error::PoolTimedOut));
            // The engine must not commit after a failed mutation.
            uow.expect_commit().times(0);
            Ok(Box::new(uow) as Box<dyn WorkflowUow>)
        });

        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let engine = TransitionEngine::with_store(store, bus);

        let err = engine
            .approve(DocKind::PurchaseRequest, 1, "bob", Some("ok"))
            .await
            .unwrap_err();
        assert_matches!(err, WorkflowError::Db(_));
        assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn approve_exhausting_chain_is_fully_approved() {
        let mut store = MockWorkflowStore::new();
        let mut reads = 0;
        store.expect_fetch_header().times(2).returning(move |_, _| {
            reads += 1;
            if reads == 1 {
                Ok(Some(header(status::SUBMITTED, Some("bob"))))
            } else {
                Ok(Some(header(status::APPROVED, None)))
            }
        });
        store
            .expect_begin()
            .times(1)
            .returning(|| Ok(committing_uow(header(status::APPROVED, None))));

        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let engine = TransitionEngine::with_store(store, bus);

        let outcome = engine
            .approve(DocKind::PurchaseOrder, 1, "bob", None)
            .await
            .unwrap();
        assert!(outcome.fully_approved);

        let event = rx.try_recv().unwrap();
        assert!(event.fully_approved);
        assert!(event.next_approver.is_none());
    }

    #[tokio::test]
    async fn intermediate_approve_is_not_fully_approved() {
        let mut store = MockWorkflowStore::new();
        let mut reads = 0;
        store.expect_fetch_header().times(2).returning(move |_, _| {
            reads += 1;
            if reads == 1 {
                Ok(Some(header(status::SUBMITTED, Some("bob"))))
            } else {
                Ok(Some(header(status::SUBMITTED, Some("carol"))))
            }
        });
        store
            .expect_begin()
            .times(1)
            .returning(|| Ok(committing_uow(header(status::SUBMITTED, Some("carol")))));

        let engine = TransitionEngine::with_store(store, Arc::new(EventBus::default()));

        let outcome = engine
            .approve(DocKind::PurchaseOrder, 1, "bob", None)
            .await
            .unwrap();
        assert!(!outcome.fully_approved);
        assert_eq!(outcome.header.current_approver.as_deref(), Some("carol"));
    }

    #[tokio::test]
    async fn reject_event_carries_notes_and_creator() {
        let mut store = MockWorkflowStore::new();
        let mut reads = 0;
        store.expect_fetch_header().times(2).returning(move |_, _| {
            reads += 1;
            if reads == 1 {
                Ok(Some(header(status::SUBMITTED, Some("bob"))))
            } else {
                Ok(Some(header(status::REJECTED, None)))
            }
        });
        store
            .expect_begin()
            .times(1)
            .returning(|| Ok(committing_uow(header(status::REJECTED, None))));

        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let engine = TransitionEngine::with_store(store, bus);

        engine
            .reject(DocKind::PurchaseRequest, 1, "bob", Some("insufficient budget"))
            .await
            .unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.notes, "insufficient budget");
        assert_eq!(event.created_by, "alice");
        assert!(!event.fully_approved);
    }

    #[tokio::test]
    async fn approve_by_wrong_user_is_denied() {
        let mut store = MockWorkflowStore::new();
        store
            .expect_fetch_header()
            .times(1)
            .returning(|_, _| Ok(Some(header(status::SUBMITTED, Some("bob")))));
        store.expect_begin().times(0);

        let engine = TransitionEngine::with_store(store, Arc::new(EventBus::default()));

        let err = engine
            .approve(DocKind::PurchaseRequest, 1, "carol", Some("ok"))
            .await
            .unwrap_err();
        assert_matches!(err, WorkflowError::Unauthorized(reason) => {
            assert!(reason.contains("bob"));
        });
    }
}
