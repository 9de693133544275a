//! Driving port for mutating the bank accounts embedded in a user document.

use async_trait::async_trait;

use crate::domain::{
    AccountList, BankAccount, BankAccountId, Error, NewBankAccount, Transaction, User,
};

/// Domain use-case port for mutating a user's bank accounts.
///
/// Each operation validates before writing and performs at most one
/// whole-document replace at the revision `user` was loaded at.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankAccountCommand: Send + Sync {
    /// Open an account and return the owner's full updated list.
    async fn create_account(
        &self,
        user: User,
        account: NewBankAccount,
    ) -> Result<AccountList, Error>;

    /// Remove the account with `id` and return its last snapshot.
    async fn delete_account(&self, user: User, id: BankAccountId) -> Result<BankAccount, Error>;

    /// Add `transaction.amount` to the account with `id`.
    async fn deposit(
        &self,
        user: User,
        id: BankAccountId,
        transaction: Transaction,
    ) -> Result<BankAccount, Error>;

    /// Subtract `transaction.amount` from the account with `id`. Balances may
    /// go negative.
    async fn withdraw(
        &self,
        user: User,
        id: BankAccountId,
        transaction: Transaction,
    ) -> Result<BankAccount, Error>;
}
