//! Store and unit-of-work seams over the persistence layer.
//!
//! The engine talks to these traits so its sequencing guarantees (no
//! repository call on denial, commit exactly once, no event on failure)
//! can be asserted with mocks; [`PgWorkflowStore`] is the production
//! implementation over sqlx.

use async_trait::async_trait;
use docflow_core::types::DbId;
use docflow_core::{DocKind, TransitionKind};
use docflow_db::models::document::DocumentHeader;
use docflow_db::repositories::{DocumentRepo, TransitionRepo};
use docflow_db::DbPool;
use sqlx::{Postgres, Transaction};

/// One database transaction spanning one orchestrated transition.
///
/// `commit` must be called at most once, and only after `apply` succeeded.
/// Dropping the unit of work without committing rolls the transaction
/// back; the Postgres implementation gets this from `sqlx::Transaction`'s
/// drop behaviour, which also covers task cancellation at an await point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowUow: Send {
    /// Invoke the stored transition function inside this transaction.
    ///
    /// Returns `None` when the rec_id does not exist; surfaces the stored
    /// function's WF400 as a database error for the caller to classify.
    async fn apply(
        &mut self,
        transition: TransitionKind,
        rec_id: DbId,
        acting_user: &str,
        notes: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error>;

    /// Commit the transaction.
    async fn commit(&mut self) -> Result<(), sqlx::Error>;
}

/// Snapshot reads and unit-of-work construction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Fetch a header snapshot outside any open transaction.
    async fn fetch_header(
        &self,
        kind: DocKind,
        rec_id: DbId,
    ) -> Result<Option<DocumentHeader>, sqlx::Error>;

    /// Open a fresh unit of work.
    async fn begin(&self) -> Result<Box<dyn WorkflowUow>, sqlx::Error>;
}

/// Production store over a Postgres pool.
#[derive(Clone)]
pub struct PgWorkflowStore {
    pool: DbPool,
}

impl PgWorkflowStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowStore for PgWorkflowStore {
    async fn fetch_header(
        &self,
        kind: DocKind,
        rec_id: DbId,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        DocumentRepo::find_by_id(&self.pool, kind, rec_id).await
    }

    async fn begin(&self) -> Result<Box<dyn WorkflowUow>, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgWorkflowUow { tx: Some(tx) }))
    }
}

/// Postgres unit of work; the transaction rolls back on drop unless
/// `commit` consumed it.
pub struct PgWorkflowUow {
    tx: Option<Transaction<'static, Postgres>>,
}

#[async_trait]
impl WorkflowUow for PgWorkflowUow {
    async fn apply(
        &mut self,
        transition: TransitionKind,
        rec_id: DbId,
        acting_user: &str,
        notes: &str,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        let tx = match self.tx.as_mut() {
            Some(tx) => tx,
            None => return Err(sqlx::Error::Protocol("unit of work already committed".into())),
        };
        TransitionRepo::apply(tx, transition, rec_id, acting_user, notes).await
    }

    async fn commit(&mut self) -> Result<(), sqlx::Error> {
        match self.tx.take() {
            Some(tx) => tx.commit().await,
            None => Err(sqlx::Error::Protocol("unit of work already committed".into())),
        }
    }
}
