//! Tests for the user service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockIdGenerator, MockUserRepository};
use crate::domain::{ErrorCode, INITIAL_REVISION};

type Service = UserService<MockUserRepository, MockIdGenerator>;

#[fixture]
fn profile() -> UserProfile {
    UserProfile {
        first_name: "Somchai".to_owned(),
        last_name: "Jaidee".to_owned(),
        username: "somchai".to_owned(),
        password: "s3cret".to_owned(),
        id_card: "1100700000000".to_owned(),
        age: 32,
        email: "somchai@example.com".to_owned(),
        tel: "0812345678".to_owned(),
    }
}

fn stored_user(profile: UserProfile, revision: u64) -> User {
    User::register(UserId::random(), profile).at_revision(revision)
}

fn service(repo: MockUserRepository) -> Service {
    UserService::new(Arc::new(repo), Arc::new(MockIdGenerator::new()))
}

#[rstest]
#[tokio::test]
async fn create_user_assigns_fresh_id_and_inserts(profile: UserProfile) {
    let id = UserId::random();
    let expected_id = id.clone();
    let mut ids = MockIdGenerator::new();
    ids.expect_user_id().times(1).return_once(move || id);

    let mut repo = MockUserRepository::new();
    let inserted_id = expected_id.clone();
    repo.expect_insert()
        .withf(move |user: &User| {
            user.id() == &inserted_id
                && user.revision() == INITIAL_REVISION
                && user.bank_accounts().is_empty()
        })
        .times(1)
        .return_once(|_| Ok(()));

    let service = UserService::new(Arc::new(repo), Arc::new(ids));
    let user = service.create_user(profile).await.expect("user created");

    assert_eq!(user.id(), &expected_id);
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_missing_field_without_writing(profile: UserProfile) {
    let mut ids = MockIdGenerator::new();
    ids.expect_user_id().times(0);
    let mut repo = MockUserRepository::new();
    repo.expect_insert().times(0);

    let service = UserService::new(Arc::new(repo), Arc::new(ids));
    let error = service
        .create_user(UserProfile {
            id_card: String::new(),
            ..profile
        })
        .await
        .expect_err("missing id card");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "missing required field: idCard");
}

#[rstest]
#[tokio::test]
async fn update_user_merges_sparse_patch_at_loaded_revision(profile: UserProfile) {
    let user = stored_user(profile.clone(), 4);
    let mut repo = MockUserRepository::new();
    repo.expect_replace()
        .withf(|user: &User, expected: &u64| {
            *expected == 4 && user.revision() == 5 && user.profile().email == "new@example.com"
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let patch = UserPatch {
        email: Some("new@example.com".to_owned()),
        ..UserPatch::default()
    };
    let updated = service(repo)
        .update_user(user, patch)
        .await
        .expect("update succeeds");

    assert_eq!(
        updated.profile(),
        &UserProfile {
            email: "new@example.com".to_owned(),
            ..profile
        }
    );
}

#[rstest]
#[tokio::test]
async fn update_user_surfaces_stale_revision_as_conflict(profile: UserProfile) {
    let user = stored_user(profile, 2);
    let mut repo = MockUserRepository::new();
    repo.expect_replace()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::revision_mismatch(2_u64, 3_u64)));

    let error = service(repo)
        .update_user(user, UserPatch::default())
        .await
        .expect_err("stale revision");

    assert_eq!(error.code(), ErrorCode::Conflict);
    let details = error.details().expect("conflict details");
    assert_eq!(details["expectedRevision"], 2);
    assert_eq!(details["actualRevision"], 3);
}

#[rstest]
#[tokio::test]
async fn delete_user_removes_at_loaded_revision(profile: UserProfile) {
    let user = stored_user(profile, 3);
    let expected_id = user.id().clone();
    let mut repo = MockUserRepository::new();
    repo.expect_remove()
        .withf(move |id: &UserId, expected: &u64| id == &expected_id && *expected == 3)
        .times(1)
        .return_once(|_, _| Ok(()));

    let removed = service(repo)
        .delete_user(user.clone())
        .await
        .expect("delete succeeds");

    assert_eq!(removed, user);
}

#[rstest]
#[tokio::test]
async fn find_user_reports_missing_document() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .find_user(&UserId::random())
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_users_maps_repository_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(move || Err(failure));

    let error = service(repo).list_users().await.expect_err("failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("somchai", "s3cret", None)]
#[case("somchai", "wrong", Some(ErrorCode::Unauthorized))]
#[case("intruder", "s3cret", Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn authenticate_requires_matching_credentials(
    profile: UserProfile,
    #[case] username: &str,
    #[case] password: &str,
    #[case] expected: Option<ErrorCode>,
) {
    let user = stored_user(profile, 1);
    let id = user.id().clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(user)));

    let credentials = LoginCredentials::try_from_parts(username, password).expect("credentials");
    let result = service(repo).authenticate(&id, &credentials).await;

    match (expected, result) {
        (None, Ok(authenticated)) => assert_eq!(authenticated.id(), &id),
        (Some(code), Err(error)) => assert_eq!(error.code(), code),
        (None, Err(error)) => panic!("expected success, got {error:?}"),
        (Some(_), Ok(user)) => panic!("expected failure, got {:?}", user.id()),
    }
}

#[rstest]
#[tokio::test]
async fn authenticate_hides_unknown_ids() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let credentials = LoginCredentials::try_from_parts("ghost", "pw").expect("credentials");
    let error = service(repo)
        .authenticate(&UserId::random(), &credentials)
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}
