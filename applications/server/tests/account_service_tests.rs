/// Account use case tests
/// Runs signup, signin, refresh and personal info against a real database
mod common;

use blockaction_core::{IdentityStore, UserId};
use blockaction_server::{
    error::{ServerError, BAD_CREDENTIALS},
    services::{SecretCodec, SigninInput, SignupInput},
};
use common::{fixtures, TestApp, TEST_SECRET};

fn signup_input(account: &str) -> SignupInput {
    SignupInput {
        account: account.to_string(),
        password: fixtures::TEST_PASSWORD.to_string(),
        user_name: fixtures::TEST_NAME.to_string(),
    }
}

fn signin_input(account: &str, password: &str) -> SigninInput {
    SigninInput {
        account: account.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_signup_persists_user() {
    let app = TestApp::new().await;

    let account = app
        .state
        .accounts
        .signup(&signup_input(fixtures::TEST_ACCOUNT))
        .await
        .unwrap();
    assert_eq!(account, fixtures::TEST_ACCOUNT);

    let user = app
        .store
        .get_by_account(fixtures::TEST_ACCOUNT)
        .await
        .unwrap()
        .expect("user should exist");

    assert_eq!(user.name, fixtures::TEST_NAME);
    assert_eq!(user.creator, user.id);
    assert_eq!(user.updater, user.id);
    assert_eq!(user.created_at, user.updated_at);
    assert_ne!(user.secret, fixtures::TEST_PASSWORD);

    // stored secret is the keyed digest of the password
    let codec = SecretCodec::new(TEST_SECRET);
    assert_eq!(user.secret, codec.derive_secret(fixtures::TEST_PASSWORD).unwrap());
}

#[tokio::test]
async fn test_signup_duplicate_conflicts() {
    let app = TestApp::new().await;
    let accounts = &app.state.accounts;

    accounts.signup(&signup_input("duplicate")).await.unwrap();
    let err = accounts.signup(&signup_input("duplicate")).await.unwrap_err();

    assert!(matches!(err, ServerError::Conflict(_)));
}

#[tokio::test]
async fn test_signup_validation_has_no_side_effects() {
    let app = TestApp::new().await;

    let err = app
        .state
        .accounts
        .signup(&signup_input("short"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::Validation(_)));

    assert!(!app.store.exists_by_account("short").await.unwrap());
}

#[tokio::test]
async fn test_signup_ids_are_unique_and_increasing() {
    let app = TestApp::new().await;
    let accounts = &app.state.accounts;

    accounts.signup(&signup_input("account1")).await.unwrap();
    accounts.signup(&signup_input("account2")).await.unwrap();

    let first = app.store.get_by_account("account1").await.unwrap().unwrap();
    let second = app.store.get_by_account("account2").await.unwrap().unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_signin_issues_token_pair() {
    let app = TestApp::new().await;
    let accounts = &app.state.accounts;

    accounts
        .signup(&signup_input(fixtures::TEST_ACCOUNT))
        .await
        .unwrap();

    let pair = accounts
        .signin(&signin_input(fixtures::TEST_ACCOUNT, fixtures::TEST_PASSWORD))
        .await
        .unwrap();

    let claims = app.state.tokens.validate(&pair.token).unwrap();
    assert_eq!(claims.account, fixtures::TEST_ACCOUNT);
    assert!(!claims.is_refresh());

    let refresh = app.state.tokens.validate(&pair.refresh_token).unwrap();
    assert!(refresh.is_refresh());
    assert_eq!(refresh.id, claims.id);
}

#[tokio::test]
async fn test_signin_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    let accounts = &app.state.accounts;

    accounts
        .signup(&signup_input(fixtures::TEST_ACCOUNT))
        .await
        .unwrap();

    let wrong_password = accounts
        .signin(&signin_input(fixtures::TEST_ACCOUNT, "wrong-password"))
        .await
        .unwrap_err();
    let unknown_account = accounts
        .signin(&signin_input("nobody-here", fixtures::TEST_PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_account.to_string());
    assert!(matches!(wrong_password, ServerError::Auth(ref msg) if msg == BAD_CREDENTIALS));
}

#[tokio::test]
async fn test_refresh_issues_access_token() {
    let app = TestApp::new().await;
    let accounts = &app.state.accounts;

    accounts
        .signup(&signup_input(fixtures::TEST_ACCOUNT))
        .await
        .unwrap();
    let pair = accounts
        .signin(&signin_input(fixtures::TEST_ACCOUNT, fixtures::TEST_PASSWORD))
        .await
        .unwrap();

    let token = accounts.refresh(&pair.refresh_token).await.unwrap();
    let claims = app.state.tokens.validate(&token).unwrap();
    assert_eq!(claims.account, fixtures::TEST_ACCOUNT);
    assert!(claims.exp.is_some());

    // an access token is not accepted as a refresh token
    let err = accounts.refresh(&pair.token).await.unwrap_err();
    assert!(matches!(err, ServerError::Auth(ref msg) if msg == BAD_CREDENTIALS));

    let err = accounts.refresh("not-a-token").await.unwrap_err();
    assert!(matches!(err, ServerError::Auth(ref msg) if msg == BAD_CREDENTIALS));
}

#[tokio::test]
async fn test_refresh_for_missing_user() {
    let app = TestApp::new().await;

    let orphan = app.state.tokens.create_refresh_token(UserId::new(12345)).unwrap();
    let err = app.state.accounts.refresh(&orphan).await.unwrap_err();

    assert!(matches!(err, ServerError::Auth(ref msg) if msg == BAD_CREDENTIALS));
}

#[tokio::test]
async fn test_personal_info() {
    let app = TestApp::new().await;
    let accounts = &app.state.accounts;

    accounts
        .signup(&signup_input(fixtures::TEST_ACCOUNT))
        .await
        .unwrap();
    let stored = app
        .store
        .get_by_account(fixtures::TEST_ACCOUNT)
        .await
        .unwrap()
        .unwrap();

    let user = accounts.personal_info(stored.id).await.unwrap();
    assert_eq!(user.account, fixtures::TEST_ACCOUNT);
    assert_eq!(user.name, fixtures::TEST_NAME);

    let err = accounts.personal_info(UserId::new(1)).await.unwrap_err();
    assert!(matches!(err, ServerError::Auth(_)));
}
