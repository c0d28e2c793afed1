//! Extension trait and helpers for classifying arbitrary errors by [`StatusCode`].

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use crate::status_code::StatusCode;

/// Uniform error classification surface implemented by every error type in this crate
/// and re-exported for downstream crates to implement on their own error enums.
pub trait ErrorExt: StdError {
    /// The status code this error maps to.
    fn status_code(&self) -> StatusCode;

    /// Downcast support for callers that need the concrete error type back.
    fn as_any(&self) -> &dyn Any;

    /// Returns true if callers should retry the operation that produced this error.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// A message safe to surface outside this process.
    ///
    /// Internal-category errors are redacted to avoid leaking implementation
    /// details; user-facing categories (input, tool, sandbox, ...) pass their
    /// message through unchanged.
    fn output_msg(&self) -> String {
        let code = self.status_code();
        if code.should_log_error() {
            format!("{code} error: {}", code as i32)
        } else {
            self.to_string()
        }
    }
}

/// A minimal [`ErrorExt`] implementation for call sites that only have a message
/// and a status code, without a richer error enum.
#[derive(Debug)]
pub struct PlainError {
    message: String,
    status_code: StatusCode,
}

impl PlainError {
    /// Creates a new plain error.
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for PlainError {}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An [`ErrorExt`] wrapper around an arbitrary `std::error::Error`, for bridging
/// third-party error types into this crate's classification scheme.
#[derive(Debug)]
pub struct BoxedError {
    source: Box<dyn StdError + Send + Sync + 'static>,
    status_code: StatusCode,
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

impl ErrorExt for BoxedError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wraps any `std::error::Error` into a [`BoxedError`] tagged with `status_code`.
pub fn boxed(
    err: impl StdError + Send + Sync + 'static,
    status_code: StatusCode,
) -> BoxedError {
    BoxedError {
        source: Box::new(err),
        status_code,
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
