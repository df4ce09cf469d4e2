//! Pure domain logic for the document workflow service.
//!
//! No I/O lives here: document kinds, the transition vocabulary, workflow
//! status constants, and the authority guard that decides who may perform
//! a transition. The persistence and orchestration crates build on top.

pub mod document;
pub mod guard;
pub mod status;
pub mod transition;
pub mod types;

pub use document::DocKind;
pub use guard::{authorize, Denial, WorkflowDocument};
pub use transition::TransitionKind;
