//! Notification dispatch for committed workflow transitions.

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
