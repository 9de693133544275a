//! HTTP inbound adapter exposing the banking REST endpoints.

pub mod auth;
pub mod bank_accounts;
pub mod error;
pub mod health;
pub mod routes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transfers;
pub mod users;
pub mod validation;

pub use error::ApiResult;
