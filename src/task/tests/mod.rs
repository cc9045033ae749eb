//! Unit tests for the task context.

mod custom_field_tests;
