//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response DTOs,
//! the error schema mirrors, and the HTTP basic security scheme. Swagger UI
//! serves it in debug builds; `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::bank_accounts::{
    BankAccountListResponse, BankAccountRequest, BankAccountResponse, TransactionRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::transfers::{TransferBody, TransferResponse};
use crate::inbound::http::users::{UserPatchRequest, UserRequest, UserResponse};

/// Adds the basic-auth security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some("Username and password of the user named in the path."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bank backend API",
        description = "Users with embedded bank accounts, deposits, withdrawals, and transfers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::bank_accounts::create_bank_account,
        crate::inbound::http::bank_accounts::list_bank_accounts,
        crate::inbound::http::bank_accounts::delete_bank_account,
        crate::inbound::http::bank_accounts::deposit,
        crate::inbound::http::bank_accounts::withdraw,
        crate::inbound::http::transfers::transfer,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserRequest,
        UserPatchRequest,
        UserResponse,
        BankAccountRequest,
        BankAccountResponse,
        BankAccountListResponse,
        TransactionRequest,
        TransferBody,
        TransferResponse,
    )),
    tags(
        (name = "users", description = "User documents"),
        (name = "bank accounts", description = "Accounts embedded in a user document"),
        (name = "transfers", description = "Moving funds between account numbers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
