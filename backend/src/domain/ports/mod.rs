//! Domain ports and supporting types for the hexagonal boundary.

mod bank_account_command;
mod bank_account_query;
mod id_generator;
mod login_service;
mod transfer_command;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use bank_account_command::MockBankAccountCommand;
pub use bank_account_command::BankAccountCommand;
#[cfg(test)]
pub use bank_account_query::MockBankAccountQuery;
pub use bank_account_query::BankAccountQuery;
#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::{IdGenerator, RandomIdGenerator};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use transfer_command::MockTransferCommand;
pub use transfer_command::{TransferCommand, TransferOutcome};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

#[cfg(test)]
mod tests;
