//! File attachments linked to tasks.
//!
//! Content lives in a [`ports::BlobStore`]; this context keeps the metadata
//! and enforces the upload policy. Deleting a task leaves its attachments in
//! place.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
