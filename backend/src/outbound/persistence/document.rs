//! JSON layout of the `user_documents.document` column.
//!
//! The identifier and revision live in their own columns; everything else a
//! user owns is serialized here. Field names are part of the stored format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountList, BankAccount, BankAccountId, User, UserId, UserProfile};

/// Serialized form of one embedded bank account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BankAccountDocument {
    pub id: Uuid,
    pub bank_name: String,
    pub account_number: String,
    pub balance: f64,
}

/// Serialized profile plus embedded accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "idcard")]
    pub id_card: String,
    pub age: i64,
    pub email: String,
    pub tel: String,
    #[serde(default)]
    pub user_bank_account: Vec<BankAccountDocument>,
}

impl From<&BankAccount> for BankAccountDocument {
    fn from(account: &BankAccount) -> Self {
        Self {
            id: *account.id().as_uuid(),
            bank_name: account.bank_name().to_owned(),
            account_number: account.account_number().to_owned(),
            balance: account.balance(),
        }
    }
}

impl From<BankAccountDocument> for BankAccount {
    fn from(document: BankAccountDocument) -> Self {
        BankAccount::new(
            BankAccountId::from_uuid(document.id),
            document.bank_name,
            document.account_number,
            document.balance,
        )
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            username: profile.username.clone(),
            password: profile.password.clone(),
            id_card: profile.id_card.clone(),
            age: profile.age,
            email: profile.email.clone(),
            tel: profile.tel.clone(),
            user_bank_account: user
                .bank_accounts()
                .as_slice()
                .iter()
                .map(BankAccountDocument::from)
                .collect(),
        }
    }
}

impl UserDocument {
    /// Rebuild the domain document from its stored parts.
    pub fn into_user(self, id: Uuid, revision: u64) -> User {
        let profile = UserProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            password: self.password,
            id_card: self.id_card,
            age: self.age,
            email: self.email,
            tel: self.tel,
        };
        let accounts: Vec<BankAccount> = self
            .user_bank_account
            .into_iter()
            .map(BankAccount::from)
            .collect();
        User::new(
            UserId::from_uuid(id),
            profile,
            AccountList::from(accounts),
            revision,
        )
    }
}
