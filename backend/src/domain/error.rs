//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// The document changed since it was read.
    Conflict,
    /// A backing store is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Validation failures raised when constructing an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was blank.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("bank account missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    ///
    /// # Panics
    /// Panics when `message` is blank. Use [`Error::try_new`] for
    /// caller-supplied messages.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "amount" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier, replacing any captured one.
    ///
    /// # Panics
    /// Panics when `trace_id` is blank.
    #[must_use]
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        match self.try_with_trace_id(trace_id) {
            Ok(value) => value,
            Err(err) => panic!("trace identifiers must satisfy validation: {err}"),
        }
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(alias = "trace_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.trace_id = None;
        if let Some(trace_id) = trace_id {
            error = error.try_with_trace_id(trace_id)?;
        }
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
