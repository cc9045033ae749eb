//! Unit tests for the attachment context.
