pub mod link_external;
pub mod sign_in;
pub mod sign_up;
pub mod sync_claims;
pub mod verification;

use keygate_core::{ClaimKind, Identity, IdentityStore, TokenClaims};
use uuid::Uuid;

/// Role granted to every locally registered account.
pub const DEFAULT_ROLE: &str = "User";

/// Minimal user payload returned alongside a freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&Identity> for UserSummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.as_str().to_string(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
        }
    }
}

/// Build token claims from whatever display claims the store currently
/// holds. Claims are a best-effort enhancement: a store failure here is
/// logged and the token is issued without them.
pub(crate) async fn assemble_token_claims<S: IdentityStore>(
    identity_store: &S,
    identity: &Identity,
) -> TokenClaims {
    let mut claims = TokenClaims::new(identity.id, identity.email.clone());

    match identity_store.get_claims(identity).await {
        Ok(stored) => {
            for claim in stored {
                match claim.kind {
                    ClaimKind::DisplayName if claims.display_name.is_none() => {
                        claims.display_name = Some(claim.value);
                    }
                    ClaimKind::DisplayRole if claims.display_role.is_none() => {
                        claims.display_role = Some(claim.value);
                    }
                    _ => {}
                }
            }
        }
        Err(error) => {
            tracing::warn!(%error, "could not read stored claims, issuing token without them");
        }
    }

    claims
}

/// Delete a partially created identity after a downstream failure.
///
/// Runs on a detached task so the cleanup still completes when the caller
/// has disconnected and the request future is dropped mid-flight.
pub(crate) async fn roll_back_identity<S>(identity_store: &S, identity: &Identity)
where
    S: IdentityStore + Clone + 'static,
{
    let store = identity_store.clone();
    let identity = identity.clone();
    let cleanup = tokio::spawn(async move { store.delete(&identity).await });

    match cleanup.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
            tracing::warn!(%error, "failed to roll back partially created identity");
        }
        Err(error) => {
            tracing::warn!(%error, "identity rollback task panicked");
        }
    }
}
