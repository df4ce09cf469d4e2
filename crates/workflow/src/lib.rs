//! Transition orchestration for the document workflow.
//!
//! The [`TransitionEngine`] sequences, for every document kind and every
//! transition: authority check on a fresh snapshot, the stored transition
//! function inside a unit of work, a single commit, a post-transition
//! re-read, and one event on the bus. The store and unit-of-work seams
//! are traits so the sequencing properties can be tested without a
//! database.

pub mod engine;
pub mod error;
pub mod store;

pub use engine::{TransitionEngine, TransitionOutcome};
pub use error::WorkflowError;
pub use store::{PgWorkflowStore, WorkflowStore, WorkflowUow};
