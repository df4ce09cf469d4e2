//! Workflow event bus.
//!
//! One [`WorkflowEvent`] is published per committed transition; the
//! notification dispatcher consumes them off the broadcast channel after
//! the fact, so a subscriber can never observe an uncommitted transition.

pub mod bus;

pub use bus::{EventBus, WorkflowEvent};
