//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they can be tested with doubles and no store.

use std::sync::Arc;

use crate::domain::ports::{
    BankAccountCommand, BankAccountQuery, LoginService, RandomIdGenerator, TransferCommand,
    UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{BankAccountService, TransferService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Basic-auth credential check.
    pub login: Arc<dyn LoginService>,
    /// User lookups.
    pub users: Arc<dyn UsersQuery>,
    /// User create, update, and delete.
    pub users_command: Arc<dyn UsersCommand>,
    /// Account listing.
    pub accounts: Arc<dyn BankAccountQuery>,
    /// Account lifecycle and balance changes.
    pub accounts_command: Arc<dyn BankAccountCommand>,
    /// Transfers by account number.
    pub transfers: Arc<dyn TransferCommand>,
}

/// Parameter object used to build [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Implementation backing [`HttpState::login`].
    pub login: Arc<dyn LoginService>,
    /// Implementation backing [`HttpState::users`].
    pub users: Arc<dyn UsersQuery>,
    /// Implementation backing [`HttpState::users_command`].
    pub users_command: Arc<dyn UsersCommand>,
    /// Implementation backing [`HttpState::accounts`].
    pub accounts: Arc<dyn BankAccountQuery>,
    /// Implementation backing [`HttpState::accounts_command`].
    pub accounts_command: Arc<dyn BankAccountCommand>,
    /// Implementation backing [`HttpState::transfers`].
    pub transfers: Arc<dyn TransferCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::RandomIdGenerator;
    /// use backend::domain::{BankAccountService, TransferService, UserService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::InMemoryUserRepository;
    ///
    /// let repo = Arc::new(InMemoryUserRepository::new());
    /// let ids = Arc::new(RandomIdGenerator);
    /// let users = Arc::new(UserService::new(repo.clone(), ids.clone()));
    /// let accounts = Arc::new(BankAccountService::new(repo.clone(), ids));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: users.clone(),
    ///     users: users.clone(),
    ///     users_command: users,
    ///     accounts: accounts.clone(),
    ///     accounts_command: accounts,
    ///     transfers: Arc::new(TransferService::new(repo)),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            users_command,
            accounts,
            accounts_command,
            transfers,
        } = ports;
        Self {
            login,
            users,
            users_command,
            accounts,
            accounts_command,
            transfers,
        }
    }
}

impl HttpState {
    /// Wire every driving port to the services over one user store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::UserRepository;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryUserRepository;
    ///
    /// let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    /// let state = HttpState::over_repository(&repo);
    /// let _users = state.users.clone();
    /// ```
    pub fn over_repository(repository: &Arc<dyn UserRepository>) -> Self {
        let ids = Arc::new(RandomIdGenerator);
        let users = Arc::new(UserService::new(Arc::clone(repository), Arc::clone(&ids)));
        let accounts = Arc::new(BankAccountService::new(Arc::clone(repository), ids));
        let transfers = Arc::new(TransferService::new(Arc::clone(repository)));

        Self::new(HttpStatePorts {
            login: users.clone(),
            users: users.clone(),
            users_command: users,
            accounts: accounts.clone(),
            accounts_command: accounts,
            transfers,
        })
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
