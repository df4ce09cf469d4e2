pub mod document_repo;
pub mod notification_repo;
pub mod transition_repo;
pub mod wf_trans_repo;

pub use document_repo::DocumentRepo;
pub use notification_repo::NotificationRepo;
pub use transition_repo::TransitionRepo;
pub use wf_trans_repo::WfTransRepo;
