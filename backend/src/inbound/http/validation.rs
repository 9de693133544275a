//! Shared validation helpers for inbound HTTP adapters.

use actix_web::web::JsonConfig;
use actix_web::{HttpRequest, error::JsonPayloadError};
use serde_json::json;
use tracing::debug;

use crate::domain::{BankAccountId, Error, UserId};

/// Validation error codes for request failures detected before the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Path segment naming the user.
pub(crate) const USER_ID: FieldName = FieldName::new("id");
/// Path segment naming the bank account.
pub(crate) const BANK_ACCOUNT_ID: FieldName = FieldName::new("idBankAccount");
/// Path segment naming the transfer source user.
pub(crate) const SOURCE_USER_ID: FieldName = FieldName::new("idFrom");
/// Path segment naming the transfer destination user.
pub(crate) const DESTINATION_USER_ID: FieldName = FieldName::new("idTo");

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_bank_account_id(value: &str, field: FieldName) -> Result<BankAccountId, Error> {
    BankAccountId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

fn malformed_body_error(err: &JsonPayloadError) -> Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request("request body is not valid JSON for this endpoint").with_details(json!({
        "reason": err.to_string(),
        "code": ErrorCode::MalformedBody.as_str(),
    }))
}

/// JSON extractor configuration reporting body failures as domain errors.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| malformed_body_error(&err).into())
}
