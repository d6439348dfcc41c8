//! Domain-level error type.
//!
//! Errors are transport agnostic: the HTTP adapter decides how each
//! [`ErrorCode`] is rendered. Every error captures the request trace
//! identifier in scope at construction time so responses and logs correlate.

use std::fmt;

use crate::domain::TraceId;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The addressed user does not exist.
    NotFound,
    /// Configuration, connectivity, decoding or store failure.
    InternalError,
}

impl ErrorCode {
    /// Numeric code reported in structured client error bodies.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::InvalidRequest.wire_code(), 0);
    /// assert_eq!(ErrorCode::NotFound.wire_code(), 1);
    /// ```
    #[must_use]
    pub const fn wire_code(self) -> i32 {
        match self {
            Self::InvalidRequest => 0,
            Self::NotFound => 1,
            Self::InternalError => 2,
        }
    }
}

/// Failure raised by domain services and surfaced by inbound adapters.
///
/// # Examples
/// ```
/// use user_directory::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User Not Found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User Not Found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create an error, capturing the current trace identifier if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Internal error rendered as `"<context>: <source>"`.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::Error;
    ///
    /// let err = Error::with_context("insert failed", "duplicate key");
    /// assert_eq!(err.message(), "insert failed: duplicate key");
    /// ```
    pub fn with_context(context: &str, source: impl fmt::Display) -> Self {
        Self::internal(format!("{context}: {source}"))
    }

    /// Replace the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was built.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
