//! Port supplying fresh identifiers for new documents and accounts.

use crate::domain::{BankAccountId, UserId};

/// Source of new identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Identifier for a newly created user document.
    fn user_id(&self) -> UserId;

    /// Identifier for a newly opened bank account.
    fn bank_account_id(&self) -> BankAccountId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn user_id(&self) -> UserId {
        UserId::random()
    }

    fn bank_account_id(&self) -> BankAccountId {
        BankAccountId::random()
    }
}
