//! Business-rule violations raised before any write.
//!
//! Every variant maps onto a domain [`Error`] with a stable detail `code`
//! so clients can branch without parsing messages.

use serde_json::json;

use super::{BankAccountId, Error};

/// A rule broken by a request. Nothing has been persisted when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// A required field was empty or zero.
    #[error("missing required field: {field}")]
    MissingField {
        /// Field name as exposed to clients.
        field: &'static str,
    },
    /// A monetary field was NaN or infinite.
    #[error("invalid amount: {field} must be a finite number")]
    InvalidAmount {
        /// Field name as exposed to clients.
        field: &'static str,
    },
    /// The owner already holds an account with this number.
    #[error("duplicate account number: {account_number}")]
    DuplicateAccountNumber {
        /// The colliding account number.
        account_number: String,
    },
    /// No account with this identifier exists in the owner's list.
    #[error("bank account not found: {id}")]
    AccountNotFound {
        /// The identifier that was looked up.
        id: BankAccountId,
    },
    /// The transfer source account number is absent.
    #[error("source account not found: {account_number}")]
    SourceAccountNotFound {
        /// The source account number.
        account_number: String,
    },
    /// The transfer destination account number is absent.
    #[error("destination account not found: {account_number}")]
    DestinationAccountNotFound {
        /// The destination account number.
        account_number: String,
    },
}

impl RuleViolation {
    /// Required field `field` was empty or zero.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Monetary field `field` was not finite.
    pub fn invalid_amount(field: &'static str) -> Self {
        Self::InvalidAmount { field }
    }

    /// `account_number` already exists in the owner's list.
    pub fn duplicate_account_number(account_number: impl Into<String>) -> Self {
        Self::DuplicateAccountNumber {
            account_number: account_number.into(),
        }
    }

    /// No account with `id`.
    pub fn account_not_found(id: BankAccountId) -> Self {
        Self::AccountNotFound { id }
    }

    /// No source account with `account_number`.
    pub fn source_account_not_found(account_number: impl Into<String>) -> Self {
        Self::SourceAccountNotFound {
            account_number: account_number.into(),
        }
    }

    /// No destination account with `account_number`.
    pub fn destination_account_not_found(account_number: impl Into<String>) -> Self {
        Self::DestinationAccountNotFound {
            account_number: account_number.into(),
        }
    }
}

impl From<RuleViolation> for Error {
    fn from(value: RuleViolation) -> Self {
        let message = value.to_string();
        match value {
            RuleViolation::MissingField { field } => Self::invalid_request(message)
                .with_details(json!({ "field": field, "code": "missing_field" })),
            RuleViolation::InvalidAmount { field } => Self::invalid_request(message)
                .with_details(json!({ "field": field, "code": "invalid_amount" })),
            RuleViolation::DuplicateAccountNumber { account_number } => {
                Self::invalid_request(message).with_details(json!({
                    "field": "accountNumber",
                    "value": account_number,
                    "code": "duplicate_account_number",
                }))
            }
            RuleViolation::AccountNotFound { id } => Self::not_found(message)
                .with_details(json!({ "bankAccountId": id.to_string() })),
            RuleViolation::SourceAccountNotFound { account_number } => Self::not_found(message)
                .with_details(json!({ "field": "from", "value": account_number })),
            RuleViolation::DestinationAccountNotFound { account_number } => {
                Self::not_found(message)
                    .with_details(json!({ "field": "to", "value": account_number }))
            }
        }
    }
}
