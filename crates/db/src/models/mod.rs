pub mod document;
pub mod notification;
pub mod wf_trans;

pub use document::{CreateDocument, DocumentHeader};
pub use notification::{CreateNotification, Notification};
pub use wf_trans::WfTrans;
