use serde_json::{json, Value};

use crate::helpers::spawn_app;

#[tokio::test]
async fn sent_code_can_be_redeemed_once() {
    let app = spawn_app().await;
    let email = json!({"email": "carol@x.com"});

    let sent = app.post("/verification/send", &email).await;
    assert_eq!(sent.status(), 200);
    let body: Value = sent.json().await.unwrap();
    assert_eq!(body["message"], "Verification email sent successfully.");

    let code = app.last_mailed_code();
    let redeemed = app
        .post(
            "/verification/verify",
            &json!({"email": "carol@x.com", "code": code}),
        )
        .await;
    assert_eq!(redeemed.status(), 200);

    let again = app
        .post(
            "/verification/verify",
            &json!({"email": "carol@x.com", "code": code}),
        )
        .await;
    assert_eq!(again.status(), 400);
}

#[tokio::test]
async fn wrong_code_does_not_burn_the_stored_one() {
    let app = spawn_app().await;
    app.post("/verification/send", &json!({"email": "carol@x.com"}))
        .await;
    let code = app.last_mailed_code();
    let wrong = if code == "999999" { "888888" } else { "999999" };

    let mismatch = app
        .post(
            "/verification/verify",
            &json!({"email": "carol@x.com", "code": wrong}),
        )
        .await;
    assert_eq!(mismatch.status(), 400);

    let correct = app
        .post(
            "/verification/verify",
            &json!({"email": "carol@x.com", "code": code}),
        )
        .await;
    assert_eq!(correct.status(), 200);
}

#[tokio::test]
async fn redeeming_without_a_sent_code_fails() {
    let app = spawn_app().await;

    let response = app
        .post(
            "/verification/verify",
            &json!({"email": "carol@x.com", "code": "123456"}),
        )
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn sending_to_a_malformed_address_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .post("/verification/send", &json!({"email": "nope"}))
        .await;

    assert_eq!(response.status(), 400);
    assert!(app.mail.sent().is_empty());
}

#[tokio::test]
async fn verification_mail_links_to_the_verify_page() {
    let app = spawn_app().await;
    app.post("/verification/send", &json!({"email": "carol@x.com"}))
        .await;

    let sent = app.mail.sent();
    let mail = sent.last().unwrap();
    assert!(mail
        .html_body
        .contains("https://app.keygate.dev/verify-email?email=carol@x.com&code="));
}
