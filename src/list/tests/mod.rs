//! Unit tests for the list context.

mod domain_tests;
mod service_tests;
