//! JSON response envelope and error classification shared by every route.
//!
//! Each response is `{success, data?, error?, message?}`. Service errors are
//! sorted into three kinds that decide the HTTP status.

mod error;
mod response;

pub use error::{ApiError, ApiErrorKind, INTERNAL_ERROR_MESSAGE};
pub use response::{ApiResponse, ApiResult, Reply};

#[cfg(test)]
mod tests;
