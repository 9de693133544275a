//! Transfers between accounts addressed by account number.
//!
//! A transfer between two users is two whole-document writes: the source
//! debit first, then the destination credit. There is no multi-document
//! transaction. When the credit fails, one compensating write restores the
//! source list at the revision the debit produced.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{TransferCommand, TransferOutcome, UserRepository};
use crate::domain::user_service::map_persistence_error;
use crate::domain::{AccountList, BalanceChange, Error, RuleViolation, TransferRequest, User};

/// Transfer service implementing the transfer command port.
pub struct TransferService<R: ?Sized> {
    user_repo: Arc<R>,
}

impl<R: ?Sized> TransferService<R> {
    /// Create a new service over the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

fn debit(user: &User, request: &TransferRequest) -> Result<AccountList, RuleViolation> {
    user.bank_accounts()
        .change_by_number(&request.from, BalanceChange::Debit(request.amount))
        .map(|(accounts, _)| accounts)
        .ok_or_else(|| RuleViolation::source_account_not_found(request.from.as_str()))
}

fn credit(accounts: &AccountList, request: &TransferRequest) -> Result<AccountList, RuleViolation> {
    accounts
        .change_by_number(&request.to, BalanceChange::Credit(request.amount))
        .map(|(accounts, _)| accounts)
        .ok_or_else(|| RuleViolation::destination_account_not_found(request.to.as_str()))
}

impl<R> TransferService<R>
where
    R: UserRepository + ?Sized,
{
    async fn write(&self, updated: &User, read_at: u64) -> Result<(), Error> {
        self.user_repo
            .replace(updated, read_at)
            .await
            .map_err(map_persistence_error)
    }

    /// Both legs touch one document, so apply them together and write once.
    async fn transfer_within(
        &self,
        request: &TransferRequest,
        owner: User,
    ) -> Result<TransferOutcome, Error> {
        let debited = debit(&owner, request).map_err(Error::from)?;
        let credited = credit(&debited, request).map_err(Error::from)?;

        let updated = owner.with_bank_accounts(credited).next_revision();
        self.write(&updated, owner.revision()).await?;

        Ok(TransferOutcome {
            source: updated.clone(),
            destination: updated,
        })
    }

    async fn compensate(
        &self,
        original: &User,
        debited: &User,
        destination: &User,
        request: &TransferRequest,
    ) {
        let restored = debited
            .with_bank_accounts(original.bank_accounts().clone())
            .next_revision();
        match self.user_repo.replace(&restored, debited.revision()).await {
            Ok(()) => warn!(
                source_user_id = %original.id(),
                destination_user_id = %destination.id(),
                amount = request.amount,
                "restored source account after failed credit"
            ),
            Err(err) => error!(
                source_user_id = %original.id(),
                destination_user_id = %destination.id(),
                amount = request.amount,
                error = %err,
                "source debit could not be restored"
            ),
        }
    }
}

#[async_trait]
impl<R> TransferCommand for TransferService<R>
where
    R: UserRepository + ?Sized,
{
    async fn transfer(
        &self,
        request: TransferRequest,
        source: User,
        destination: User,
    ) -> Result<TransferOutcome, Error> {
        if let Err(violation) = request.validate() {
            debug!(%violation, "rejected transfer");
            return Err(violation.into());
        }

        if source.id() == destination.id() {
            let outcome = self.transfer_within(&request, source).await?;
            info!(
                user_id = %outcome.source.id(),
                amount = request.amount,
                "transferred within one user"
            );
            return Ok(outcome);
        }

        let source_accounts = debit(&source, &request).map_err(Error::from)?;
        let destination_accounts =
            credit(destination.bank_accounts(), &request).map_err(Error::from)?;

        let debited = source.with_bank_accounts(source_accounts).next_revision();
        let credited = destination
            .with_bank_accounts(destination_accounts)
            .next_revision();

        self.write(&debited, source.revision()).await?;
        if let Err(err) = self.write(&credited, destination.revision()).await {
            warn!(
                source_user_id = %source.id(),
                destination_user_id = %destination.id(),
                amount = request.amount,
                error = %err,
                "credit failed after debit"
            );
            self.compensate(&source, &debited, &destination, &request)
                .await;
            return Err(err);
        }

        info!(
            source_user_id = %debited.id(),
            destination_user_id = %credited.id(),
            amount = request.amount,
            "transferred"
        );
        Ok(TransferOutcome {
            source: debited,
            destination: credited,
        })
    }
}

#[cfg(test)]
#[path = "transfer_service_tests.rs"]
mod tests;
