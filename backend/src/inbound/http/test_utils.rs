//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::ports::{
    MockBankAccountCommand, MockBankAccountQuery, MockLoginService, MockTransferCommand,
    MockUsersCommand, MockUsersQuery,
};
use crate::domain::{BankAccount, BankAccountId, User, UserId, UserProfile};

use super::state::{HttpState, HttpStatePorts};

pub const USERNAME: &str = "somchai";
pub const PASSWORD: &str = "s3cret";

/// Mock doubles for every driving port. Unset expectations panic when hit.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub users: MockUsersQuery,
    pub users_command: MockUsersCommand,
    pub accounts: MockBankAccountQuery,
    pub accounts_command: MockBankAccountCommand,
    pub transfers: MockTransferCommand,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            users: Arc::new(self.users),
            users_command: Arc::new(self.users_command),
            accounts: Arc::new(self.accounts),
            accounts_command: Arc::new(self.accounts_command),
            transfers: Arc::new(self.transfers),
        })
    }

    /// Accept `USERNAME`/`PASSWORD` for `user`, rejecting anything else.
    pub fn accepting(mut self, user: &User) -> Self {
        let user = user.clone();
        self.login
            .expect_authenticate()
            .returning(move |id, credentials| {
                if id == user.id() && user.accepts(credentials.username(), credentials.password()) {
                    Ok(user.clone())
                } else {
                    Err(crate::domain::Error::unauthorized("invalid credentials"))
                }
            });
        self
    }
}

/// `Authorization` header value for `username:password`.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// A stored user whose credentials are `USERNAME`/`PASSWORD`.
pub fn owner(accounts: &[(&str, f64)]) -> User {
    let accounts: Vec<BankAccount> = accounts
        .iter()
        .map(|(number, balance)| BankAccount::new(BankAccountId::random(), "SCB", *number, *balance))
        .collect();
    User::register(
        UserId::random(),
        UserProfile {
            first_name: "Somchai".to_owned(),
            last_name: "Jaidee".to_owned(),
            username: USERNAME.to_owned(),
            password: PASSWORD.to_owned(),
            id_card: "1100000000001".to_owned(),
            age: 35,
            email: "somchai@example.com".to_owned(),
            tel: "0812345678".to_owned(),
        },
    )
    .with_bank_accounts(accounts.into())
}
