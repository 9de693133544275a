//! Bank accounts embedded in a user document.
//!
//! Accounts are never stored on their own. Every mutation rebuilds the owning
//! user's [`AccountList`] and the whole document is written back.

use std::fmt;

use uuid::Uuid;

use super::rules::RuleViolation;

/// Validation errors returned when parsing a [`BankAccountId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BankAccountIdError {
    /// The identifier was blank.
    #[error("bank account id must not be empty")]
    Empty,
    /// The identifier was not a UUID.
    #[error("bank account id must be a valid UUID")]
    Invalid,
}

/// Stable bank account identifier.
///
/// Identifiers are looked up without scoping to a bank, so they are random
/// UUIDs rather than per-user counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankAccountId(Uuid);

impl BankAccountId {
    /// Parse an identifier from caller-supplied text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BankAccountIdError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(BankAccountIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(BankAccountIdError::Invalid);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| BankAccountIdError::Invalid)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BankAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single bank account owned by a user.
///
/// ## Invariants
/// - `bank_name` and `account_number` are non-empty.
/// - `account_number` is unique within the owning [`AccountList`].
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    id: BankAccountId,
    bank_name: String,
    account_number: String,
    balance: f64,
}

impl BankAccount {
    /// Assemble an account from stored components.
    pub fn new(
        id: BankAccountId,
        bank_name: impl Into<String>,
        account_number: impl Into<String>,
        balance: f64,
    ) -> Self {
        Self {
            id,
            bank_name: bank_name.into(),
            account_number: account_number.into(),
            balance,
        }
    }

    /// Account identifier.
    pub fn id(&self) -> BankAccountId {
        self.id
    }

    /// Name of the bank holding the account.
    pub fn bank_name(&self) -> &str {
        self.bank_name.as_str()
    }

    /// Account number, unique within the owner's accounts.
    pub fn account_number(&self) -> &str {
        self.account_number.as_str()
    }

    /// Current balance.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Return a copy with `change` applied to the balance.
    #[must_use]
    pub fn with_change(&self, change: BalanceChange) -> Self {
        Self {
            balance: change.apply(self.balance),
            ..self.clone()
        }
    }
}

/// Direction and size of a balance movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceChange {
    /// Add the amount to the balance.
    Credit(f64),
    /// Subtract the amount from the balance.
    Debit(f64),
}

impl BalanceChange {
    fn apply(self, balance: f64) -> f64 {
        match self {
            Self::Credit(amount) => balance + amount,
            Self::Debit(amount) => balance - amount,
        }
    }
}

/// Unvalidated request to open a bank account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBankAccount {
    /// Name of the bank.
    pub bank_name: String,
    /// Account number at that bank.
    pub account_number: String,
    /// Opening balance; must be non-zero.
    pub balance: f64,
}

impl NewBankAccount {
    /// Check required fields in declaration order, first failure wins.
    pub fn validate(&self) -> Result<(), RuleViolation> {
        if self.bank_name.is_empty() {
            return Err(RuleViolation::missing_field("bankName"));
        }
        if self.account_number.is_empty() {
            return Err(RuleViolation::missing_field("accountNumber"));
        }
        if !self.balance.is_finite() {
            return Err(RuleViolation::invalid_amount("balance"));
        }
        if self.balance == 0.0 {
            return Err(RuleViolation::missing_field("balance"));
        }
        Ok(())
    }

    /// Build the account under `id`, consuming the request.
    pub fn into_account(self, id: BankAccountId) -> BankAccount {
        BankAccount::new(id, self.bank_name, self.account_number, self.balance)
    }
}

/// Ordered list of accounts embedded in a user document.
///
/// Mutators return a new list and leave `self` untouched so a service can
/// keep the pre-mutation list for compensation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountList(Vec<BankAccount>);

impl AccountList {
    /// Wrap an existing ordered list.
    pub fn new(accounts: Vec<BankAccount>) -> Self {
        Self(accounts)
    }

    /// Accounts in stored order.
    pub fn as_slice(&self) -> &[BankAccount] {
        self.0.as_slice()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Find an account by identifier.
    pub fn find_by_id(&self, id: &BankAccountId) -> Option<&BankAccount> {
        self.0.iter().find(|account| account.id == *id)
    }

    /// Find the first account carrying `account_number`.
    pub fn find_by_number(&self, account_number: &str) -> Option<&BankAccount> {
        self.0
            .iter()
            .find(|account| account.account_number == account_number)
    }

    /// Append `account`, rejecting a duplicate account number.
    pub fn push(&self, account: BankAccount) -> Result<Self, RuleViolation> {
        if self.find_by_number(&account.account_number).is_some() {
            return Err(RuleViolation::duplicate_account_number(
                account.account_number,
            ));
        }
        let mut accounts = self.0.clone();
        accounts.push(account);
        Ok(Self(accounts))
    }

    /// Remove the account with `id`, returning the new list and the removed
    /// entry.
    pub fn remove(&self, id: &BankAccountId) -> Result<(Self, BankAccount), RuleViolation> {
        let Some(position) = self.0.iter().position(|account| account.id == *id) else {
            return Err(RuleViolation::account_not_found(*id));
        };
        let mut accounts = self.0.clone();
        let removed = accounts.remove(position);
        Ok((Self(accounts), removed))
    }

    /// Apply `change` to the account with `id`.
    ///
    /// Only the matched entry changes; order is preserved.
    pub fn change_by_id(
        &self,
        id: &BankAccountId,
        change: BalanceChange,
    ) -> Result<(Self, BankAccount), RuleViolation> {
        self.change_first(|account| account.id == *id, change)
            .ok_or_else(|| RuleViolation::account_not_found(*id))
    }

    /// Apply `change` to the first account carrying `account_number`.
    ///
    /// Returns `None` when no account matches.
    pub fn change_by_number(
        &self,
        account_number: &str,
        change: BalanceChange,
    ) -> Option<(Self, BankAccount)> {
        self.change_first(|account| account.account_number == account_number, change)
    }

    fn change_first<F>(&self, matches: F, change: BalanceChange) -> Option<(Self, BankAccount)>
    where
        F: Fn(&BankAccount) -> bool,
    {
        let position = self.0.iter().position(matches)?;
        let mut accounts = self.0.clone();
        let slot = accounts.get_mut(position)?;
        let updated = slot.with_change(change);
        *slot = updated.clone();
        Some((Self(accounts), updated))
    }
}

impl From<Vec<BankAccount>> for AccountList {
    fn from(value: Vec<BankAccount>) -> Self {
        Self(value)
    }
}

impl From<AccountList> for Vec<BankAccount> {
    fn from(value: AccountList) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a AccountList {
    type Item = &'a BankAccount;
    type IntoIter = std::slice::Iter<'a, BankAccount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
