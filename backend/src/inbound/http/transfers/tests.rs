//! Tests for the transfer API handler.

use super::*;
use crate::domain::{Error, ErrorCode, UserId};
use crate::inbound::http::test_utils::{MockPorts, PASSWORD, USERNAME, basic_auth, owner};
use crate::inbound::http::validation::json_config;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::json;

macro_rules! init_app {
    ($ports:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($ports.into_state()))
                .app_data(json_config())
                .service(transfer),
        )
        .await
    };
}

fn transfer_request(from: &UserId, to: &UserId, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(&format!("/transfers/from/{from}/to/{to}"))
        .insert_header((AUTHORIZATION, basic_auth(USERNAME, password)))
        .set_json(json!({"amount": 40.0, "from": "A1", "to": "B1"}))
}

#[rstest]
#[actix_web::test]
async fn loads_destination_and_returns_both_users() {
    let source = owner(&[("A1", 100.0)]);
    let destination = owner(&[("B1", 50.0)]);
    let mut ports = MockPorts::default().accepting(&source);
    let loaded = destination.clone();
    let destination_id = destination.id().clone();
    ports
        .users
        .expect_find_user()
        .withf(move |id| id == &destination_id)
        .times(1)
        .returning(move |_| Ok(loaded.clone()));
    ports
        .transfers
        .expect_transfer()
        .withf(|request, _, _| request.amount == 40.0 && request.from == "A1" && request.to == "B1")
        .times(1)
        .returning(|_, source, destination| Ok(TransferOutcome { source, destination }));
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        transfer_request(source.id(), destination.id(), PASSWORD).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = actix_test::read_body_json(res).await;
    assert_eq!(body["source"]["id"], source.id().to_string());
    assert_eq!(body["destination"]["id"], destination.id().to_string());
    assert!(body["source"].get("password").is_none());
}

#[rstest]
#[actix_web::test]
async fn same_user_transfer_skips_second_lookup() {
    let user = owner(&[("A1", 100.0), ("B1", 0.5)]);
    let mut ports = MockPorts::default().accepting(&user);
    ports.users.expect_find_user().times(0);
    let expected_id = user.id().clone();
    ports
        .transfers
        .expect_transfer()
        .withf(move |_, source, destination| {
            source.id() == &expected_id && destination.id() == &expected_id
        })
        .times(1)
        .returning(|_, source, destination| Ok(TransferOutcome { source, destination }));
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        transfer_request(user.id(), user.id(), PASSWORD).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn wrong_source_password_is_unauthorized() {
    let source = owner(&[("A1", 100.0)]);
    let mut ports = MockPorts::default().accepting(&source);
    ports.transfers.expect_transfer().times(0);
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        transfer_request(source.id(), &UserId::random(), "wrong").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn unknown_destination_user_is_not_found() {
    let source = owner(&[("A1", 100.0)]);
    let mut ports = MockPorts::default().accepting(&source);
    ports
        .users
        .expect_find_user()
        .returning(|id| Err(Error::not_found(format!("user not found: {id}"))));
    ports.transfers.expect_transfer().times(0);
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        transfer_request(source.id(), &UserId::random(), PASSWORD).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn missing_destination_account_is_not_found() {
    let source = owner(&[("A1", 100.0)]);
    let destination = owner(&[("B2", 50.0)]);
    let mut ports = MockPorts::default().accepting(&source);
    let loaded = destination.clone();
    ports
        .users
        .expect_find_user()
        .returning(move |_| Ok(loaded.clone()));
    ports.transfers.expect_transfer().returning(|request, _, _| {
        Err(Error::not_found(format!(
            "destination account not found: {}",
            request.to
        )))
    });
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        transfer_request(source.id(), destination.id(), PASSWORD).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::NotFound);
    assert_eq!(body.message(), "destination account not found: B1");
}

#[rstest]
#[actix_web::test]
async fn malformed_destination_id_names_the_segment() {
    let source = owner(&[("A1", 100.0)]);
    let app = init_app!(MockPorts::default());

    let req = actix_test::TestRequest::post()
        .uri(&format!("/transfers/from/{}/to/nope", source.id()))
        .insert_header((AUTHORIZATION, basic_auth(USERNAME, PASSWORD)))
        .set_json(json!({"amount": 1.0, "from": "A1", "to": "B1"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "idTo");
}
