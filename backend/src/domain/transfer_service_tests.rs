//! Tests for the transfer service.

use std::sync::{Arc, Mutex};

use mockall::Sequence;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockUserRepository, UserPersistenceError};
use crate::domain::{BankAccount, BankAccountId, ErrorCode, UserId, UserProfile};

fn profile(username: &str) -> UserProfile {
    UserProfile {
        first_name: "Test".to_owned(),
        last_name: "Owner".to_owned(),
        username: username.to_owned(),
        password: "pw".to_owned(),
        id_card: "1000000000000".to_owned(),
        age: 30,
        email: format!("{username}@example.com"),
        tel: "020000000".to_owned(),
    }
}

fn owner(username: &str, accounts: &[(&str, f64)], revision: u64) -> User {
    let accounts: Vec<BankAccount> = accounts
        .iter()
        .map(|(number, balance)| BankAccount::new(BankAccountId::random(), "SCB", *number, *balance))
        .collect();
    User::register(UserId::random(), profile(username))
        .with_bank_accounts(accounts.into())
        .at_revision(revision)
}

fn balance_of(user: &User, number: &str) -> f64 {
    user.bank_accounts()
        .find_by_number(number)
        .map(BankAccount::balance)
        .expect("account present")
}

fn request(amount: f64, from: &str, to: &str) -> TransferRequest {
    TransferRequest {
        amount,
        from: from.to_owned(),
        to: to.to_owned(),
    }
}

type Writes = Arc<Mutex<Vec<(User, u64)>>>;

fn recording_repo(writes: &Writes, count: usize) -> MockUserRepository {
    let writes = Arc::clone(writes);
    let mut repo = MockUserRepository::new();
    repo.expect_replace()
        .times(count)
        .returning(move |user: &User, expected: u64| {
            writes
                .lock()
                .expect("recording lock")
                .push((user.clone(), expected));
            Ok(())
        });
    repo
}

#[rstest]
#[tokio::test]
async fn transfer_debits_source_and_credits_destination() {
    let source = owner("alice", &[("A1", 100.0)], 3);
    let destination = owner("bob", &[("B0", 1.0), ("B1", 50.0)], 9);
    let writes: Writes = Arc::default();
    let service = TransferService::new(Arc::new(recording_repo(&writes, 2)));

    let outcome = service
        .transfer(request(40.0, "A1", "B1"), source.clone(), destination.clone())
        .await
        .expect("transfer succeeds");

    assert!((balance_of(&outcome.source, "A1") - 60.0).abs() < f64::EPSILON);
    assert!((balance_of(&outcome.destination, "B1") - 90.0).abs() < f64::EPSILON);
    assert!((balance_of(&outcome.destination, "B0") - 1.0).abs() < f64::EPSILON);

    let writes = writes.lock().expect("recording lock");
    let revisions: Vec<(&UserId, u64, u64)> = writes
        .iter()
        .map(|(user, expected)| (user.id(), *expected, user.revision()))
        .collect();
    assert_eq!(
        revisions,
        [(source.id(), 3, 4), (destination.id(), 9, 10)],
        "source is written before destination at the revisions read"
    );
}

#[rstest]
#[case::missing_destination(request(10.0, "A1", "B9"), "destination account not found: B9")]
#[case::missing_source(request(10.0, "A9", "B1"), "source account not found: A9")]
#[tokio::test]
async fn unknown_account_numbers_fail_before_any_write(
    #[case] transfer: TransferRequest,
    #[case] message: &str,
) {
    let source = owner("alice", &[("A1", 100.0)], 1);
    let destination = owner("bob", &[("B1", 50.0)], 1);
    let mut repo = MockUserRepository::new();
    repo.expect_replace().times(0);

    let error = TransferService::new(Arc::new(repo))
        .transfer(transfer, source, destination)
        .await
        .expect_err("missing account");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case(request(0.0, "A1", "B1"), "amount")]
#[case(request(5.0, "", "B1"), "from")]
#[case(request(5.0, "A1", ""), "to")]
#[tokio::test]
async fn invalid_requests_fail_before_any_write(
    #[case] transfer: TransferRequest,
    #[case] field: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_replace().times(0);

    let error = TransferService::new(Arc::new(repo))
        .transfer(
            transfer,
            owner("alice", &[("A1", 100.0)], 1),
            owner("bob", &[("B1", 50.0)], 1),
        )
        .await
        .expect_err("invalid");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details().expect("details")["field"], field);
}

#[rstest]
#[tokio::test]
async fn same_user_transfer_writes_both_legs_once() {
    let user = owner("alice", &[("A1", 100.0), ("A2", 5.0)], 2);
    let writes: Writes = Arc::default();
    let service = TransferService::new(Arc::new(recording_repo(&writes, 1)));

    let outcome = service
        .transfer(request(30.0, "A1", "A2"), user.clone(), user.clone())
        .await
        .expect("transfer succeeds");

    assert_eq!(outcome.source, outcome.destination);
    let writes = writes.lock().expect("recording lock");
    let (stored, expected) = writes.first().expect("one write");
    assert_eq!(*expected, 2);
    assert!((balance_of(stored, "A1") - 70.0).abs() < f64::EPSILON);
    assert!((balance_of(stored, "A2") - 35.0).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test]
async fn failed_credit_restores_source_once() {
    let source = owner("alice", &[("A1", 100.0)], 5);
    let destination = owner("bob", &[("B1", 50.0)], 1);
    let source_id = source.id().clone();
    let destination_id = destination.id().clone();
    let original_accounts = source.bank_accounts().clone();

    let mut seq = Sequence::new();
    let mut repo = MockUserRepository::new();
    let debit_id = source_id.clone();
    repo.expect_replace()
        .withf(move |user: &User, expected: &u64| user.id() == &debit_id && *expected == 5)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(()));
    repo.expect_replace()
        .withf(move |user: &User, _: &u64| user.id() == &destination_id)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Err(UserPersistenceError::revision_mismatch(1_u64, 2_u64)));
    repo.expect_replace()
        .withf(move |user: &User, expected: &u64| {
            user.id() == &source_id
                && *expected == 6
                && user.revision() == 7
                && user.bank_accounts() == &original_accounts
        })
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(()));

    let error = TransferService::new(Arc::new(repo))
        .transfer(request(40.0, "A1", "B1"), source, destination)
        .await
        .expect_err("destination write fails");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn failed_compensation_still_reports_credit_failure() {
    let source = owner("alice", &[("A1", 100.0)], 1);
    let destination = owner("bob", &[("B1", 50.0)], 1);

    let mut seq = Sequence::new();
    let mut repo = MockUserRepository::new();
    repo.expect_replace()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(()));
    repo.expect_replace()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Err(UserPersistenceError::connection("reset")));
    repo.expect_replace()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Err(UserPersistenceError::connection("reset")));

    let error = TransferService::new(Arc::new(repo))
        .transfer(request(40.0, "A1", "B1"), source, destination)
        .await
        .expect_err("destination write fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn failed_debit_skips_credit() {
    let mut repo = MockUserRepository::new();
    repo.expect_replace()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::query("disk full")));

    let error = TransferService::new(Arc::new(repo))
        .transfer(
            request(40.0, "A1", "B1"),
            owner("alice", &[("A1", 100.0)], 1),
            owner("bob", &[("B1", 50.0)], 1),
        )
        .await
        .expect_err("source write fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
