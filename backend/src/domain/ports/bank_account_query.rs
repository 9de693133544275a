//! Driving port for reading a user's bank accounts.

use crate::domain::{AccountList, User};

/// Domain use-case port for listing accounts.
///
/// Listing is a projection of an already loaded document, so the port is
/// synchronous and never touches the store.
#[cfg_attr(test, mockall::automock)]
pub trait BankAccountQuery: Send + Sync {
    /// Accounts in stored order.
    fn list_accounts(&self, user: &User) -> AccountList;
}
