use keygate_core::{
    ClaimKind, ExternalLoginInfo, Identity, IdentityStore, IdentityStoreError, TokenIssueError,
    TokenIssuer,
};

use super::sign_in::SignedIn;
use super::sync_claims::ClaimSyncUseCase;
use super::{assemble_token_claims, roll_back_identity, UserSummary};

#[derive(Debug, thiserror::Error)]
pub enum LinkExternalError {
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
    #[error(transparent)]
    Token(#[from] TokenIssueError),
}

/// External-login use case - signs in via a (provider, subject key) link,
/// creating and linking an identity for the provider's email when none
/// exists yet.
///
/// Compensation is symmetric with sign-up: when linking fails after this
/// flow created the identity, the identity is deleted again.
pub struct LinkExternalUseCase<S, T>
where
    S: IdentityStore + Clone + 'static,
    T: TokenIssuer,
{
    identity_store: S,
    token_issuer: T,
}

impl<S, T> LinkExternalUseCase<S, T>
where
    S: IdentityStore + Clone + 'static,
    T: TokenIssuer,
{
    pub fn new(identity_store: S, token_issuer: T) -> Self {
        Self {
            identity_store,
            token_issuer,
        }
    }

    #[tracing::instrument(
        name = "LinkExternalUseCase::execute",
        skip(self, info),
        fields(provider = %info.provider)
    )]
    pub async fn execute(&self, info: ExternalLoginInfo) -> Result<SignedIn, LinkExternalError> {
        // Direct external sign-in first: the link may already exist.
        if let Some(identity) = self
            .identity_store
            .find_by_external_login(&info.provider, &info.subject_key)
            .await?
        {
            return self.finish(identity, &info).await;
        }

        let (identity, created) = match self.identity_store.find_by_email(&info.email).await? {
            Some(existing) => (existing, false),
            None => {
                let identity = Identity::new_external(&info);
                self.identity_store.create(identity.clone(), None).await?;
                (identity, true)
            }
        };

        if let Err(error) = self
            .identity_store
            .add_external_login(&identity, &info)
            .await
        {
            if created {
                roll_back_identity(&self.identity_store, &identity).await;
            }
            return Err(error.into());
        }

        self.finish(identity, &info).await
    }

    async fn finish(
        &self,
        identity: Identity,
        info: &ExternalLoginInfo,
    ) -> Result<SignedIn, LinkExternalError> {
        let sync = ClaimSyncUseCase::new(self.identity_store.clone());
        let mut pending = vec![(ClaimKind::DisplayName, identity.display_name())];
        if let Some(picture) = &info.picture {
            pending.push((ClaimKind::Picture, picture.clone()));
        }
        for (kind, value) in pending {
            if let Err(error) = sync.sync(&identity.email, kind, &value).await {
                tracing::warn!(%error, %kind, "claim sync failed, continuing external sign-in");
            }
        }

        let claims = assemble_token_claims(&self.identity_store, &identity).await;
        let token = self.token_issuer.issue(&claims)?;

        Ok(SignedIn {
            user: UserSummary::from(&identity),
            token,
        })
    }
}
