//! Unit tests for the field context.

mod service_tests;
