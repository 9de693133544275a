//! Contract checks shared by every port.

use super::*;
use crate::domain::{BankAccount, BankAccountId, User, UserId, UserProfile};
use rstest::rstest;

fn profile() -> UserProfile {
    UserProfile {
        first_name: "Malee".to_owned(),
        last_name: "Sukjai".to_owned(),
        username: "malee".to_owned(),
        password: "pw".to_owned(),
        id_card: "3100500000000".to_owned(),
        age: 41,
        email: "malee@example.com".to_owned(),
        tel: "0899999999".to_owned(),
    }
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), "user repository connection failed: refused")]
#[case(UserPersistenceError::query("syntax"), "user repository query failed: syntax")]
#[case(UserPersistenceError::not_found("abc"), "user document not found: abc")]
#[case(
    UserPersistenceError::revision_mismatch(2_u64, 3_u64),
    "revision mismatch: expected 2, found 3"
)]
fn persistence_errors_render_context(#[case] error: UserPersistenceError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn persistence_constructors_build_matching_variants() {
    assert_eq!(
        UserPersistenceError::query(String::from("disk full")),
        UserPersistenceError::Query {
            message: "disk full".to_owned()
        }
    );
    assert_eq!(
        UserPersistenceError::revision_mismatch(4, 5),
        UserPersistenceError::RevisionMismatch {
            expected: 4,
            actual: 5
        }
    );
}

struct ProjectingQuery;

impl BankAccountQuery for ProjectingQuery {
    fn list_accounts(&self, user: &User) -> crate::domain::AccountList {
        user.bank_accounts().clone()
    }
}

#[rstest]
fn account_query_is_usable_as_trait_object() {
    let query: Box<dyn BankAccountQuery> = Box::new(ProjectingQuery);
    let user = User::register(UserId::random(), profile()).with_bank_accounts(
        vec![BankAccount::new(BankAccountId::random(), "SCB", "A1", 5.0)].into(),
    );

    let accounts = query.list_accounts(&user);

    assert_eq!(accounts.len(), 1);
}

#[rstest]
#[tokio::test]
async fn repository_mock_honours_revision_contract() {
    let user = User::register(UserId::random(), profile());
    let mut repo = MockUserRepository::new();
    repo.expect_replace()
        .withf(|user: &User, expected: &u64| user.revision() == expected + 1)
        .times(1)
        .return_once(|_, _| Ok(()));

    let repo: Box<dyn UserRepository> = Box::new(repo);
    let next = user.clone().next_revision();
    repo.replace(&next, user.revision())
        .await
        .expect("replace succeeds");
}
