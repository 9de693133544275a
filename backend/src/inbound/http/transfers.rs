//! Transfer API handler.
//!
//! ```text
//! POST /transfers/from/{idFrom}/to/{idTo} {"amount":40,"from":"A1","to":"B1"}
//! ```
//!
//! The caller authenticates as the source user. Accounts are addressed by
//! account number inside each user's list.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::TransferRequest;
use crate::domain::ports::TransferOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BasicAuth, authorize};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{DESTINATION_USER_ID, SOURCE_USER_ID, parse_user_id};

/// Request body for a transfer.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct TransferBody {
    /// Amount debited from `from` and credited to `to`; must be non-zero.
    #[schema(example = 40.0)]
    pub amount: f64,
    /// Source account number.
    #[schema(example = "A1")]
    pub from: String,
    /// Destination account number.
    #[schema(example = "B1")]
    pub to: String,
}

impl From<TransferBody> for TransferRequest {
    fn from(value: TransferBody) -> Self {
        Self {
            amount: value.amount,
            from: value.from,
            to: value.to,
        }
    }
}

/// Both owners after the transfer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TransferResponse {
    /// Owner of the debited account.
    pub source: UserResponse,
    /// Owner of the credited account. Equal to `source` for a transfer
    /// within one user.
    pub destination: UserResponse,
}

impl From<&TransferOutcome> for TransferResponse {
    fn from(outcome: &TransferOutcome) -> Self {
        Self {
            source: UserResponse::from(&outcome.source),
            destination: UserResponse::from(&outcome.destination),
        }
    }
}

/// Move funds from one account number to another.
#[utoipa::path(
    post,
    path = "/transfers/from/{idFrom}/to/{idTo}",
    params(
        ("idFrom" = String, Path, description = "Source user identifier"),
        ("idTo" = String, Path, description = "Destination user identifier")
    ),
    request_body = TransferBody,
    responses(
        (status = 200, description = "Both updated users", body = TransferResponse),
        (status = 400, description = "Missing field or zero amount", body = ErrorSchema),
        (status = 401, description = "Bad source credentials", body = ErrorSchema),
        (status = 404, description = "Unknown user or account number", body = ErrorSchema),
        (status = 409, description = "Concurrent update", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "transfer"
)]
#[post("/transfers/from/{idFrom}/to/{idTo}")]
pub async fn transfer(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    auth: BasicAuth,
    payload: web::Json<TransferBody>,
) -> ApiResult<web::Json<TransferResponse>> {
    let (from, to) = path.into_inner();
    let source_id = parse_user_id(&from, SOURCE_USER_ID)?;
    let destination_id = parse_user_id(&to, DESTINATION_USER_ID)?;

    let source = authorize(&state, &source_id, &auth).await?;
    let destination = if destination_id == source_id {
        source.clone()
    } else {
        state.users.find_user(&destination_id).await?
    };

    let outcome = state
        .transfers
        .transfer(payload.into_inner().into(), source, destination)
        .await?;
    Ok(web::Json(TransferResponse::from(&outcome)))
}

#[cfg(test)]
mod tests;
