//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors register their shape
//! with utoipa from the adapter layer instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Credentials are missing or wrong.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The user or bank account does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The user document changed since it was read.
    #[schema(rename = "conflict")]
    Conflict,
    /// The account store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: amount")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "amount", "code": "missing_field"}`.
    details: Option<serde_json::Value>,
}
