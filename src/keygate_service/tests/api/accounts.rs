use keygate_core::{Email, IdentityStore};
use serde_json::{json, Value};

use crate::helpers::{sign_in_body, sign_up_body, spawn_app, spawn_app_with_failing_mail};

#[tokio::test]
async fn sign_up_returns_created_with_a_token() {
    let app = spawn_app().await;

    let response = app.post("/signup", &sign_up_body("a@x.com")).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(app.mail.sent().len(), 1);
}

#[tokio::test]
async fn duplicate_sign_up_is_a_conflict() {
    let app = spawn_app().await;

    app.post("/signup", &sign_up_body("a@x.com")).await;
    let response = app.post("/signup", &sign_up_body("A@X.com")).await;

    assert_eq!(response.status(), 409);
    assert_eq!(app.identity_store.count().await, 1);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = spawn_app().await;

    let response = app.post("/signup", &sign_up_body("not-an-email")).await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = spawn_app().await;
    let body = json!({"email": "a@x.com", "password": "short"});

    let response = app.post("/signup", &body).await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn sign_up_rolls_back_when_the_verification_mail_fails() {
    let app = spawn_app_with_failing_mail().await;

    let response = app.post("/signup", &sign_up_body("a@x.com")).await;

    assert_eq!(response.status(), 500);
    let email = Email::parse("a@x.com").unwrap();
    assert!(app
        .identity_store
        .find_by_email(&email)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn sign_in_returns_token_and_user_summary() {
    let app = spawn_app().await;
    app.post("/signup", &sign_up_body("a@x.com")).await;

    let response = app.post("/signin", &sign_in_body("a@x.com", "pw123456")).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["firstName"], "Ann");
    assert_eq!(body["redirectUrl"], "/");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_share_one_message() {
    let app = spawn_app().await;
    app.post("/signup", &sign_up_body("a@x.com")).await;

    let wrong_password = app
        .post("/signin", &sign_in_body("a@x.com", "wrongpw99"))
        .await;
    let unknown_email = app
        .post("/signin", &sign_in_body("missing@x.com", "whatever99"))
        .await;

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_email.status(), 401);

    let first: Value = wrong_password.json().await.unwrap();
    let second: Value = unknown_email.json().await.unwrap();
    assert_eq!(first["error"], second["error"]);
    assert_eq!(first["error"], "Invalid Email or password.");
}

#[tokio::test]
async fn locked_out_account_gets_the_lockout_message() {
    let app = spawn_app().await;
    app.post("/signup", &sign_up_body("a@x.com")).await;
    app.identity_store
        .lock_out(&Email::parse("a@x.com").unwrap())
        .await;

    let response = app.post("/signin", &sign_in_body("a@x.com", "pw123456")).await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Account is locked out.");
}

fn external_body(email: &str) -> Value {
    json!({
        "provider": "Google",
        "subjectKey": "sub-42",
        "email": email,
        "givenName": "Bob",
        "familyName": "Ray",
    })
}

#[tokio::test]
async fn external_sign_in_creates_one_identity_and_reuses_it() {
    let app = spawn_app().await;

    let first = app.post("/external", &external_body("bob@x.com")).await;
    assert_eq!(first.status(), 200);
    let body: Value = first.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "bob@x.com");

    let second = app.post("/external", &external_body("bob@x.com")).await;
    assert_eq!(second.status(), 200);
    assert_eq!(app.identity_store.count().await, 1);
}

#[tokio::test]
async fn external_sign_in_links_to_an_existing_local_account() {
    let app = spawn_app().await;
    app.post("/signup", &sign_up_body("bob@x.com")).await;

    let response = app.post("/external", &external_body("bob@x.com")).await;

    assert_eq!(response.status(), 200);
    assert_eq!(app.identity_store.count().await, 1);
}

#[tokio::test]
async fn external_sign_in_requires_a_provider() {
    let app = spawn_app().await;
    let body = json!({
        "provider": " ",
        "subjectKey": "sub-42",
        "email": "bob@x.com",
    });

    let response = app.post("/external", &body).await;

    assert_eq!(response.status(), 400);
}
