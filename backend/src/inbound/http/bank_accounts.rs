//! Bank account API handlers.
//!
//! ```text
//! POST   /user/{id}/bankAccount                             open an account
//! GET    /user/{id}/bankAccount                             list accounts
//! DELETE /user/{id}/bankAccount/{idBankAccount}             close an account
//! PUT    /user/{id}/bankAccount/{idBankAccount}/deposit     deposit
//! PUT    /user/{id}/bankAccount/{idBankAccount}/withdraw    withdraw
//! ```
//!
//! Every route authenticates the owning user with basic auth first.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountList, BankAccount, NewBankAccount, Transaction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BasicAuth, authorize};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    BANK_ACCOUNT_ID, USER_ID, parse_bank_account_id, parse_user_id,
};

/// Request body for opening an account.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct BankAccountRequest {
    /// Name of the bank holding the account.
    #[schema(example = "SCB")]
    pub bank_name: String,
    /// Account number, unique within the owner's accounts.
    #[schema(example = "123-4-56789-0")]
    pub account_number: String,
    /// Opening balance; must be non-zero.
    #[schema(example = 500.0)]
    pub balance: f64,
}

impl From<BankAccountRequest> for NewBankAccount {
    fn from(value: BankAccountRequest) -> Self {
        Self {
            bank_name: value.bank_name,
            account_number: value.account_number,
            balance: value.balance,
        }
    }
}

/// Request body for deposits and withdrawals.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct TransactionRequest {
    /// Amount to add or subtract; must be non-zero.
    #[schema(example = 100.0)]
    pub amount: f64,
}

/// One embedded bank account.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BankAccountResponse {
    /// Account identifier.
    #[schema(example = "9b2f1e4c-7a3d-4c5e-8f6a-1b2c3d4e5f60")]
    pub id: String,
    /// Name of the bank holding the account.
    pub bank_name: String,
    /// Account number.
    pub account_number: String,
    /// Current balance. May be negative.
    pub balance: f64,
}

impl From<&BankAccount> for BankAccountResponse {
    fn from(account: &BankAccount) -> Self {
        Self {
            id: account.id().to_string(),
            bank_name: account.bank_name().to_owned(),
            account_number: account.account_number().to_owned(),
            balance: account.balance(),
        }
    }
}

/// Wrapper used by the list and create endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BankAccountListResponse {
    /// Accounts in stored order.
    pub bank_account: Vec<BankAccountResponse>,
}

impl From<&AccountList> for BankAccountListResponse {
    fn from(accounts: &AccountList) -> Self {
        Self {
            bank_account: accounts
                .as_slice()
                .iter()
                .map(BankAccountResponse::from)
                .collect(),
        }
    }
}

/// Open a bank account and return the owner's full list.
#[utoipa::path(
    post,
    path = "/user/{id}/bankAccount",
    params(("id" = String, Path, description = "Owner identifier")),
    request_body = BankAccountRequest,
    responses(
        (status = 201, description = "Updated account list", body = BankAccountListResponse),
        (status = 400, description = "Missing field or duplicate account number", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["bank accounts"],
    operation_id = "createBankAccount"
)]
#[post("/user/{id}/bankAccount")]
pub async fn create_bank_account(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    auth: BasicAuth,
    payload: web::Json<BankAccountRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path, USER_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let accounts = state
        .accounts_command
        .create_account(user, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(BankAccountListResponse::from(&accounts)))
}

/// List the owner's accounts in stored order.
#[utoipa::path(
    get,
    path = "/user/{id}/bankAccount",
    params(("id" = String, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Account list", body = BankAccountListResponse),
        (status = 401, description = "Bad credentials", body = ErrorSchema)
    ),
    tags = ["bank accounts"],
    operation_id = "listBankAccounts"
)]
#[get("/user/{id}/bankAccount")]
pub async fn list_bank_accounts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    auth: BasicAuth,
) -> ApiResult<web::Json<BankAccountListResponse>> {
    let id = parse_user_id(&path, USER_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let accounts = state.accounts.list_accounts(&user);
    Ok(web::Json(BankAccountListResponse::from(&accounts)))
}

/// Close an account and return its last snapshot.
#[utoipa::path(
    delete,
    path = "/user/{id}/bankAccount/{idBankAccount}",
    params(
        ("id" = String, Path, description = "Owner identifier"),
        ("idBankAccount" = String, Path, description = "Account identifier")
    ),
    responses(
        (status = 200, description = "Removed account", body = BankAccountResponse),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["bank accounts"],
    operation_id = "deleteBankAccount"
)]
#[delete("/user/{id}/bankAccount/{idBankAccount}")]
pub async fn delete_bank_account(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    auth: BasicAuth,
) -> ApiResult<web::Json<BankAccountResponse>> {
    let (user_id, account_id) = path.into_inner();
    let id = parse_user_id(&user_id, USER_ID)?;
    let account_id = parse_bank_account_id(&account_id, BANK_ACCOUNT_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let removed = state
        .accounts_command
        .delete_account(user, account_id)
        .await?;
    Ok(web::Json(BankAccountResponse::from(&removed)))
}

/// Deposit into an account and return its new state.
#[utoipa::path(
    put,
    path = "/user/{id}/bankAccount/{idBankAccount}/deposit",
    params(
        ("id" = String, Path, description = "Owner identifier"),
        ("idBankAccount" = String, Path, description = "Account identifier")
    ),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Updated account", body = BankAccountResponse),
        (status = 400, description = "Zero amount", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["bank accounts"],
    operation_id = "deposit"
)]
#[put("/user/{id}/bankAccount/{idBankAccount}/deposit")]
pub async fn deposit(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    auth: BasicAuth,
    payload: web::Json<TransactionRequest>,
) -> ApiResult<web::Json<BankAccountResponse>> {
    let (user_id, account_id) = path.into_inner();
    let id = parse_user_id(&user_id, USER_ID)?;
    let account_id = parse_bank_account_id(&account_id, BANK_ACCOUNT_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let transaction = Transaction {
        amount: payload.amount,
    };
    let account = state
        .accounts_command
        .deposit(user, account_id, transaction)
        .await?;
    Ok(web::Json(BankAccountResponse::from(&account)))
}

/// Withdraw from an account and return its new state. Balances may go
/// negative.
#[utoipa::path(
    put,
    path = "/user/{id}/bankAccount/{idBankAccount}/withdraw",
    params(
        ("id" = String, Path, description = "Owner identifier"),
        ("idBankAccount" = String, Path, description = "Account identifier")
    ),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Updated account", body = BankAccountResponse),
        (status = 400, description = "Zero amount", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 404, description = "No such account", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["bank accounts"],
    operation_id = "withdraw"
)]
#[put("/user/{id}/bankAccount/{idBankAccount}/withdraw")]
pub async fn withdraw(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    auth: BasicAuth,
    payload: web::Json<TransactionRequest>,
) -> ApiResult<web::Json<BankAccountResponse>> {
    let (user_id, account_id) = path.into_inner();
    let id = parse_user_id(&user_id, USER_ID)?;
    let account_id = parse_bank_account_id(&account_id, BANK_ACCOUNT_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let transaction = Transaction {
        amount: payload.amount,
    };
    let account = state
        .accounts_command
        .withdraw(user, account_id, transaction)
        .await?;
    Ok(web::Json(BankAccountResponse::from(&account)))
}
