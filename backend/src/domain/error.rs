//! Domain error payload shared by every endpoint.
//!
//! The type is transport agnostic; the HTTP adapter maps it to status codes
//! and a JSON body. Construction captures the request-scoped trace id when
//! one is active so clients and logs can be correlated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;
use crate::domain::ports::StorageError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with existing state, e.g. a taken username.
    Conflict,
    /// The storage backend could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Error response payload.
///
/// # Examples
/// ```
/// use arena_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Game not found");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "Invalid booking data")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details, e.g. `{ "field": "email" }`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the active trace id if one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
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

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict { message } => Self::conflict(message),
            StorageError::Query { message } => {
                tracing::error!(error = %message, "storage query failed");
                Self::internal(message)
            }
            StorageError::Unavailable { message } => {
                tracing::error!(error = %message, "storage backend unavailable");
                Self::service_unavailable(message)
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Coverage for constructors, trace capture, and storage error mapping.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constructors_set_codes() {
        assert_eq!(Error::invalid_request("x").code, ErrorCode::InvalidRequest);
        assert_eq!(Error::unauthorized("x").code, ErrorCode::Unauthorized);
        assert_eq!(Error::not_found("x").code, ErrorCode::NotFound);
        assert_eq!(Error::conflict("x").code, ErrorCode::Conflict);
        assert_eq!(
            Error::service_unavailable("x").code,
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(Error::internal("x").code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn new_captures_trace_id_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let expected = trace_id.to_string();
        let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
        assert_eq!(error.trace_id.as_deref(), Some(expected.as_str()));
    }

    #[rstest]
    fn new_leaves_trace_id_empty_out_of_scope() {
        assert!(Error::internal("boom").trace_id.is_none());
    }

    #[rstest]
    fn details_and_trace_id_are_optional_in_json() {
        let json = serde_json::to_value(Error::not_found("missing")).expect("serialize");
        assert!(json.get("traceId").is_none());
        assert!(json.get("details").is_none());
        assert_eq!(
            json.get("code"),
            Some(&serde_json::json!("not_found")),
        );
    }

    #[rstest]
    #[case(StorageError::conflict("Username already taken"), ErrorCode::Conflict)]
    #[case(StorageError::query("bad query"), ErrorCode::InternalError)]
    #[case(StorageError::unavailable("down"), ErrorCode::ServiceUnavailable)]
    fn storage_errors_map_to_codes(#[case] err: StorageError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(err).code, expected);
    }
}
