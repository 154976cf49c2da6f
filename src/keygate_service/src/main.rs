use color_eyre::eyre::WrapErr;
use keygate_adapters::{
    config::{env, Settings},
    email::PostmarkMailDispatcher,
    persistence::{HashMapIdentityStore, InMemoryCodeCache},
    token::JwtTokenIssuer,
};
use keygate_core::Email;
use keygate_service::{AppState, CredentialService};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    dotenvy::dotenv().ok();
    let settings = Settings::load().wrap_err_with(|| {
        format!(
            "configuration incomplete; at minimum {} and {} must be set",
            env::JWT_SECRET_ENV_VAR,
            env::POSTMARK_AUTH_TOKEN_ENV_VAR,
        )
    })?;

    // The in-memory store is the reference adapter; a deployment against a
    // real identity provider swaps it out here.
    let identity_store = HashMapIdentityStore::new();
    let code_cache = InMemoryCodeCache::new();

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(settings.mail.timeout_ms))
        .build()?;
    let mail_dispatcher = PostmarkMailDispatcher::new(
        settings.mail.base_url.clone(),
        Email::parse(&settings.mail.sender)?,
        settings.mail.auth_token.clone(),
        http_client,
    );

    let token_issuer = JwtTokenIssuer::new(settings.jwt.clone());

    let state = AppState {
        identity_store,
        code_cache,
        mail_dispatcher,
        token_issuer,
        verify_page_url: settings.mail.verify_page_url.clone(),
    };

    let listener = TcpListener::bind(&settings.app.address).await?;
    tracing::info!(address = %settings.app.address, "credential service listening");

    axum::serve(listener, CredentialService::new(state).into_router(None)).await?;

    Ok(())
}

fn init_tracing() -> color_eyre::Result<()> {
    let fmt_layer = fmt::layer().compact();
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
