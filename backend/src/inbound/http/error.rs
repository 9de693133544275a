//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays HTTP-agnostic; this module turns it into a status
//! code and JSON body. Internal failures are redacted before leaving the
//! process, and every `401` carries a basic-auth challenge.

use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Challenge sent with every `401` response.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"bank\"";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let redacted = Error::internal("Internal server error");
        match error.trace_id() {
            Some(id) => redacted.with_trace_id(id.to_owned()),
            None => redacted,
        }
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if matches!(self.code(), ErrorCode::Unauthorized) {
            builder.insert_header((header::WWW_AUTHENTICATE, BASIC_CHALLENGE));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
