//! In-memory list adapters.

mod list;

pub use list::InMemoryListRepository;
