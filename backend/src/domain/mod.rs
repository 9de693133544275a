//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define the user document with its embedded bank accounts and the
//! rules for moving money between them. Types here are transport agnostic;
//! inbound adapters translate them to HTTP and outbound adapters to storage.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): user document with embedded accounts.
//! - BankAccountService, TransferService, UserService: driving port
//!   implementations.

pub mod auth;
pub mod bank_account;
pub mod bank_account_service;
pub mod error;
pub mod funds;
pub mod ports;
pub mod rules;
pub mod trace_id;
pub mod transfer_service;
pub mod user;
pub mod user_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::bank_account::{
    AccountList, BalanceChange, BankAccount, BankAccountId, BankAccountIdError, NewBankAccount,
};
pub use self::bank_account_service::BankAccountService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::funds::{Transaction, TransferRequest};
pub use self::rules::RuleViolation;
pub use self::trace_id::TraceId;
pub use self::transfer_service::TransferService;
pub use self::user::{INITIAL_REVISION, User, UserId, UserPatch, UserProfile, UserValidationError};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such user"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
