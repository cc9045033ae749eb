//! In-memory attachment adapters.

mod attachment;
mod blob;

pub use attachment::InMemoryAttachmentRepository;
pub use blob::InMemoryBlobStore;
