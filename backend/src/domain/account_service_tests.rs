//! Tests for the account service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{DisplayName, ErrorCode, color_from_email};

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("fixture email")
}

fn account(raw_email: &str, name: &str) -> UserAccount {
    UserAccount::new(
        User::new(
            UserId::random(),
            email(raw_email),
            DisplayName::new(name).expect("fixture name"),
        ),
        "stored-hash",
    )
}

#[fixture]
fn ada() -> UserAccount {
    account("a@x.com", "Ada")
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockUserRepository, MockPasswordHasher> {
    AccountService::new(Arc::new(users), Arc::new(hasher))
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_before_insert() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account| {
            account.password_hash() == "hashed:pw" && account.user().email().as_ref() == "a@x.com"
        })
        .times(1)
        .returning(|_| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|plain| plain == "pw")
        .returning(|plain| Ok(format!("hashed:{plain}")));

    let registration = Registration::try_from_parts("a@x.com", "pw", "Ada").expect("valid");
    let user = service(users, hasher)
        .register(&registration)
        .await
        .expect("registration succeeds");

    assert_eq!(user.name().as_ref(), "Ada");
}

#[rstest]
#[tokio::test]
async fn register_existing_email_is_conflict(ada: UserAccount) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(ada)));
    users.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let registration = Registration::try_from_parts("a@x.com", "pw", "Ada").expect("valid");
    let err = service(users, hasher)
        .register(&registration)
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn register_race_on_unique_email_is_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("a@x.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok("hash".to_owned()));

    let registration = Registration::try_from_parts("a@x.com", "pw", "Ada").expect("valid");
    let err = service(users, hasher)
        .register(&registration)
        .await
        .expect_err("lost race");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn login_checks_password(
    ada: UserAccount,
    #[case] password_matches: bool,
    #[case] expected_error: Option<ErrorCode>,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(ada)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|plain, hash| plain == "pw" && hash == "stored-hash")
        .returning(move |_, _| Ok(password_matches));

    let creds = LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid");
    let result = service(users, hasher).authenticate(&creds).await;

    match (expected_error, result) {
        (None, Ok(user)) => assert_eq!(user.email().as_ref(), "a@x.com"),
        (Some(code), Err(err)) => assert_eq!(err.code(), code),
        (expected, other) => panic!("expected {expected:?}, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn login_with_unknown_email_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(0);

    let creds = LoginCredentials::try_from_parts("ghost@x.com", "pw").expect("valid");
    let err = service(users, hasher)
        .authenticate(&creds)
        .await
        .expect_err("unknown");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn login_with_malformed_stored_hash_is_internal(ada: UserAccount) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(ada)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(|_, _| Err(PasswordHashError::malformed_hash("bad phc")));

    let creds = LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid");
    let err = service(users, hasher)
        .authenticate(&creds)
        .await
        .expect_err("bad hash");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn search_uses_fixed_limit() {
    let mut users = MockUserRepository::new();
    users
        .expect_search_emails()
        .withf(|text, limit| text == "x.com" && *limit == USER_SEARCH_LIMIT)
        .return_once(|_, _| Ok(vec![email("a@x.com"), email("b@x.com")]));

    let found = service(users, MockPasswordHasher::new())
        .search_emails("x.com")
        .await
        .expect("search succeeds");
    assert_eq!(found, [email("a@x.com"), email("b@x.com")]);
}

#[rstest]
#[tokio::test]
async fn presence_keeps_request_order_and_skips_unknown() {
    let ada = account("a@x.com", "Ada");
    let bob = account("b@y.com", "Bob");
    let mut users = MockUserRepository::new();
    users
        .expect_find_many_by_email()
        .return_once(move |_| Ok(vec![ada, bob]));

    let requested = [email("b@y.com"), email("ghost@x.com"), email("a@x.com")];
    let profiles = service(users, MockPasswordHasher::new())
        .presence(&requested)
        .await
        .expect("presence succeeds");

    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["b@y.com", "a@x.com"]);
    assert_eq!(profiles[1].info.color, color_from_email("a@x.com"));
}

#[rstest]
#[tokio::test]
async fn current_user_for_vanished_account_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(users, MockPasswordHasher::new())
        .current_user(&UserId::random())
        .await
        .expect_err("gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
