use keygate_adapters::config::constants::test as test_config;
use keygate_adapters::config::settings::JwtSettings;
use keygate_adapters::email::MockMailDispatcher;
use keygate_adapters::persistence::{HashMapIdentityStore, InMemoryCodeCache};
use keygate_adapters::token::JwtTokenIssuer;
use keygate_service::{AppState, CredentialService};
use secrecy::Secret;
use serde_json::{json, Value};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub mail: MockMailDispatcher,
    pub identity_store: HashMapIdentityStore,
}

impl TestApp {
    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    /// Pull the most recently mailed verification code out of the recorded
    /// subject line (`Your code is NNNNNN.`).
    pub fn last_mailed_code(&self) -> String {
        let sent = self.mail.sent();
        let subject = &sent.last().expect("no mail recorded").subject;
        subject
            .trim_start_matches("Your code is ")
            .trim_end_matches('.')
            .to_string()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_mail(MockMailDispatcher::new()).await
}

pub async fn spawn_app_with_failing_mail() -> TestApp {
    spawn_app_with_mail(MockMailDispatcher::failing()).await
}

async fn spawn_app_with_mail(mail: MockMailDispatcher) -> TestApp {
    let identity_store = HashMapIdentityStore::new();
    let code_cache = InMemoryCodeCache::new();
    let token_issuer = JwtTokenIssuer::new(JwtSettings {
        secret: Secret::from("test-secret-at-least-32-bytes-long!".to_string()),
        issuer: "keygate".to_string(),
        audience: "keygate-clients".to_string(),
        expire_minutes: 60,
    });

    let state = AppState {
        identity_store: identity_store.clone(),
        code_cache,
        mail_dispatcher: mail.clone(),
        token_issuer,
        verify_page_url: "https://app.keygate.dev/verify-email".to_string(),
    };
    let router = CredentialService::new(state).into_router(None);

    let listener = tokio::net::TcpListener::bind(test_config::APP_ADDRESS)
        .await
        .expect("failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
        mail,
        identity_store,
    }
}

pub fn sign_up_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "pw123456",
        "firstName": "Ann",
        "lastName": "Lee",
    })
}

pub fn sign_in_body(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "password": password,
    })
}
