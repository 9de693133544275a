//! Bank account services.
//!
//! Every mutation validates first, rebuilds the owner's account list, and
//! writes the whole document back at the revision it was loaded at.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{BankAccountCommand, BankAccountQuery, IdGenerator, UserRepository};
use crate::domain::user_service::map_persistence_error;
use crate::domain::{
    AccountList, BalanceChange, BankAccount, BankAccountId, Error, NewBankAccount, RuleViolation,
    Transaction, User,
};

fn reject(user: &User, violation: RuleViolation) -> Error {
    debug!(user_id = %user.id(), %violation, "rejected bank account operation");
    violation.into()
}

/// Bank account service implementing the account query and command ports.
pub struct BankAccountService<R: ?Sized, G: ?Sized> {
    user_repo: Arc<R>,
    ids: Arc<G>,
}

impl<R: ?Sized, G: ?Sized> BankAccountService<R, G> {
    /// Create a new service over the given repository and id source.
    pub fn new(user_repo: Arc<R>, ids: Arc<G>) -> Self {
        Self { user_repo, ids }
    }
}

impl<R, G> BankAccountService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    async fn store(&self, user: &User, accounts: AccountList) -> Result<User, Error> {
        let updated = user.with_bank_accounts(accounts).next_revision();
        self.user_repo
            .replace(&updated, user.revision())
            .await
            .map_err(map_persistence_error)?;
        Ok(updated)
    }

    async fn apply(
        &self,
        user: &User,
        id: BankAccountId,
        transaction: Transaction,
        change: BalanceChange,
    ) -> Result<BankAccount, Error> {
        transaction
            .validate()
            .map_err(|violation| reject(user, violation))?;
        let (accounts, account) = user
            .bank_accounts()
            .change_by_id(&id, change)
            .map_err(|violation| reject(user, violation))?;

        self.store(user, accounts).await?;
        Ok(account)
    }
}

impl<R, G> BankAccountQuery for BankAccountService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    fn list_accounts(&self, user: &User) -> AccountList {
        user.bank_accounts().clone()
    }
}

#[async_trait]
impl<R, G> BankAccountCommand for BankAccountService<R, G>
where
    R: UserRepository + ?Sized,
    G: IdGenerator + ?Sized,
{
    async fn create_account(
        &self,
        user: User,
        account: NewBankAccount,
    ) -> Result<AccountList, Error> {
        account
            .validate()
            .map_err(|violation| reject(&user, violation))?;
        let account = account.into_account(self.ids.bank_account_id());
        let account_id = account.id();
        let accounts = user
            .bank_accounts()
            .push(account)
            .map_err(|violation| reject(&user, violation))?;

        let updated = self.store(&user, accounts).await?;
        info!(user_id = %user.id(), account_id = %account_id, "opened bank account");
        Ok(updated.bank_accounts().clone())
    }

    async fn delete_account(&self, user: User, id: BankAccountId) -> Result<BankAccount, Error> {
        let (accounts, removed) = user
            .bank_accounts()
            .remove(&id)
            .map_err(|violation| reject(&user, violation))?;

        self.store(&user, accounts).await?;
        info!(user_id = %user.id(), account_id = %id, "closed bank account");
        Ok(removed)
    }

    async fn deposit(
        &self,
        user: User,
        id: BankAccountId,
        transaction: Transaction,
    ) -> Result<BankAccount, Error> {
        let amount = transaction.amount;
        let account = self
            .apply(&user, id, transaction, BalanceChange::Credit(amount))
            .await?;
        info!(user_id = %user.id(), account_id = %id, amount, "deposited");
        Ok(account)
    }

    async fn withdraw(
        &self,
        user: User,
        id: BankAccountId,
        transaction: Transaction,
    ) -> Result<BankAccount, Error> {
        let amount = transaction.amount;
        let account = self
            .apply(&user, id, transaction, BalanceChange::Debit(amount))
            .await?;
        info!(user_id = %user.id(), account_id = %id, amount, "withdrew");
        Ok(account)
    }
}

#[cfg(test)]
#[path = "bank_account_service_tests.rs"]
mod tests;
