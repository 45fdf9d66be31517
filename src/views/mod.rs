pub mod merge_request;
pub mod messages;
pub mod status;

pub use merge_request::{MergeRequest, MergeRequestStatus};
pub use messages::error_message;
pub use status::{external_status, RegistrationKind, RegistryStatus};
