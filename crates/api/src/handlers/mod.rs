pub mod documents;
pub mod notifications;
