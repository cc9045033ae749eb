//! Domain model for task attachments.

mod attachment;
mod error;
mod ids;
mod policy;

pub use attachment::{Attachment, NewAttachment};
pub use error::AttachmentDomainError;
pub use ids::AttachmentId;
pub use policy::{AttachmentPolicy, DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE};
