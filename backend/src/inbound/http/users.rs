//! Users API handlers.
//!
//! ```text
//! GET    /users        list users
//! POST   /users        create a user
//! GET    /user/{id}    fetch the authenticated user
//! PUT    /user/{id}    sparse profile update
//! DELETE /user/{id}    delete the user document
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserPatch, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BasicAuth, authorize};
use crate::inbound::http::bank_accounts::BankAccountResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{USER_ID, parse_user_id};

/// Request body for `POST /users`.
///
/// Absent fields read as empty so the domain can name the first missing one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct UserRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// National id card number.
    pub idcard: String,
    /// Age in years.
    pub age: i64,
    /// Contact email.
    pub email: String,
    /// Contact telephone number.
    pub tel: String,
}

impl From<UserRequest> for UserProfile {
    fn from(value: UserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            username: value.username,
            password: value.password,
            id_card: value.idcard,
            age: value.age,
            email: value.email,
            tel: value.tel,
        }
    }
}

/// Request body for `PUT /user/{id}`.
///
/// Only non-empty strings and a non-zero age replace stored values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserPatchRequest {
    /// Replacement given name; absent or empty keeps the stored value.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement username.
    pub username: Option<String>,
    /// Replacement password.
    pub password: Option<String>,
    /// Replacement id card number.
    pub idcard: Option<String>,
    /// Replacement age; zero keeps the stored value.
    pub age: Option<i64>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement telephone number.
    pub tel: Option<String>,
}

impl From<UserPatchRequest> for UserPatch {
    fn from(value: UserPatchRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            username: value.username,
            password: value.password,
            id_card: value.idcard,
            age: value.age,
            email: value.email,
            tel: value.tel,
        }
    }
}

/// User document as returned to clients. The password is never included.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// User identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Basic-auth username.
    pub username: String,
    /// National id card number.
    pub idcard: String,
    /// Age in years.
    pub age: i64,
    /// Contact email.
    pub email: String,
    /// Contact telephone number.
    pub tel: String,
    /// Embedded accounts in stored order.
    pub user_bank_account: Vec<BankAccountResponse>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            username: profile.username.clone(),
            idcard: profile.id_card.clone(),
            age: profile.age,
            email: profile.email.clone(),
            tel: profile.tel.clone(),
            user_bank_account: user
                .bank_accounts()
                .as_slice()
                .iter()
                .map(BankAccountResponse::from)
                .collect(),
        }
    }
}

/// List every user in creation order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Register a new user with no bank accounts.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Fetch the authenticated user.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    auth: BasicAuth,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path, USER_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Apply a sparse profile update and return the merged user.
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPatchRequest,
    responses(
        (status = 200, description = "Merged user", body = UserResponse),
        (status = 400, description = "Malformed id or body", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    auth: BasicAuth,
    payload: web::Json<UserPatchRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path, USER_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let updated = state
        .users_command
        .update_user(user, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(&updated)))
}

/// Delete the user document and return its final state.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Removed user", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    auth: BasicAuth,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path, USER_ID)?;
    let user = authorize(&state, &id, &auth).await?;
    let removed = state.users_command.delete_user(user).await?;
    Ok(web::Json(UserResponse::from(&removed)))
}
