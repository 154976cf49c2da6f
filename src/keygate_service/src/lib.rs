pub mod error;
pub mod routes;
pub mod tracing;

use axum::{
    http::{request, HeaderValue, Method},
    routing::post,
    Router,
};
use keygate_core::{IdentityStore, MailDispatcher, TokenIssuer, VerificationCodeCache};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Shared handler state: one clone-cheap bundle of the core's collaborators.
pub struct AppState<S, C, M, T> {
    pub identity_store: S,
    pub code_cache: C,
    pub mail_dispatcher: M,
    pub token_issuer: T,
    pub verify_page_url: String,
}

impl<S: Clone, C: Clone, M: Clone, T: Clone> Clone for AppState<S, C, M, T> {
    fn clone(&self) -> Self {
        Self {
            identity_store: self.identity_store.clone(),
            code_cache: self.code_cache.clone(),
            mail_dispatcher: self.mail_dispatcher.clone(),
            token_issuer: self.token_issuer.clone(),
            verify_page_url: self.verify_page_url.clone(),
        }
    }
}

/// The credential service: sign-up, sign-in, external-login linking and
/// email verification over HTTP.
pub struct CredentialService {
    router: Router,
}

impl CredentialService {
    pub fn new<S, C, M, T>(state: AppState<S, C, M, T>) -> Self
    where
        S: IdentityStore + Clone + 'static,
        C: VerificationCodeCache + Clone + 'static,
        M: MailDispatcher + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let router = Router::new()
            .route("/signup", post(routes::sign_up::<S, C, M, T>))
            .route("/signin", post(routes::sign_in::<S, C, M, T>))
            .route("/external", post(routes::link_external::<S, C, M, T>))
            .route(
                "/verification/send",
                post(routes::send_verification::<S, C, M, T>),
            )
            .route(
                "/verification/verify",
                post(routes::redeem_verification::<S, C, M, T>),
            )
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting CORS to the given origins.
    pub fn into_router(self, allowed_origins: Option<Vec<HeaderValue>>) -> Router {
        let service = self.with_trace_layer();

        match allowed_origins {
            Some(origins) => {
                let cors = CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST])
                    .allow_credentials(true)
                    .allow_origin(AllowOrigin::predicate(
                        move |origin: &HeaderValue, _request_parts: &request::Parts| {
                            origins.contains(origin)
                        },
                    ));
                service.router.layer(cors)
            }
            None => service.router,
        }
    }
}
