//! Registration of every banking endpoint.
//!
//! ```text
//! GET    /users
//! POST   /users
//! GET    /user/{id}
//! PUT    /user/{id}
//! DELETE /user/{id}
//! POST   /user/{id}/bankAccount
//! GET    /user/{id}/bankAccount
//! DELETE /user/{id}/bankAccount/{idBankAccount}
//! PUT    /user/{id}/bankAccount/{idBankAccount}/deposit
//! PUT    /user/{id}/bankAccount/{idBankAccount}/withdraw
//! POST   /transfers/from/{idFrom}/to/{idTo}
//! ```

use actix_web::web;

use super::bank_accounts::{
    create_bank_account, delete_bank_account, deposit, list_bank_accounts, withdraw,
};
use super::transfers::transfer;
use super::users::{create_user, delete_user, get_user, list_users, update_user};
use super::validation::json_config;

/// Register the JSON extractor config and the banking handlers.
///
/// [`HttpState`](super::state::HttpState) must be provided separately as
/// `web::Data`. Health probes are not included.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(create_bank_account)
        .service(list_bank_accounts)
        .service(delete_bank_account)
        .service(deposit)
        .service(withdraw)
        .service(transfer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, PASSWORD, USERNAME, basic_auth};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case::user("/user/not-a-uuid")]
    #[case::accounts("/user/not-a-uuid/bankAccount")]
    #[actix_web::test]
    async fn configured_routes_are_reachable(#[case] uri: &str) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(MockPorts::default().into_state()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri(uri)
            .insert_header((AUTHORIZATION, basic_auth(USERNAME, PASSWORD)))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_uuid");
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_uses_the_configured_error() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(MockPorts::default().into_state()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "malformed_body");
    }
}
