//! Application services for task attachments.

mod attachments;

pub use attachments::{
    AttachmentDeletion, AttachmentService, AttachmentServiceError, AttachmentServiceResult,
    UploadRequest,
};
