use keygate_core::{
    ClaimKind, Email, Identity, IdentityStore, IdentityStoreError, Password, SignInOutcome,
    TokenIssueError, TokenIssuer,
};

use super::sync_claims::ClaimSyncUseCase;
use super::{assemble_token_claims, UserSummary};

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    /// Covers unknown accounts and wrong passwords alike; the message never
    /// reveals whether the email is registered.
    #[error("Invalid Email or password.")]
    InvalidCredentials,
    #[error("Account is locked out.")]
    LockedOut,
    #[error("Account is not allowed to sign in.")]
    NotAllowed,
    #[error("Two-factor authentication required.")]
    RequiresTwoFactor,
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
    #[error(transparent)]
    Token(#[from] TokenIssueError),
}

#[derive(Debug)]
pub struct SignedIn {
    pub token: String,
    pub user: UserSummary,
}

/// Sign-in use case - checks local credentials, classifies the outcome, and
/// on success synchronizes display claims and issues a token.
pub struct SignInUseCase<S, T>
where
    S: IdentityStore + Clone,
    T: TokenIssuer,
{
    identity_store: S,
    token_issuer: T,
}

impl<S, T> SignInUseCase<S, T>
where
    S: IdentityStore + Clone,
    T: TokenIssuer,
{
    pub fn new(identity_store: S, token_issuer: T) -> Self {
        Self {
            identity_store,
            token_issuer,
        }
    }

    #[tracing::instrument(name = "SignInUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        persistent: bool,
    ) -> Result<SignedIn, SignInError> {
        let Some(identity) = self.identity_store.find_by_email(&email).await? else {
            return Err(SignInError::InvalidCredentials);
        };

        match self
            .identity_store
            .password_sign_in(&email, &password, persistent)
            .await?
        {
            SignInOutcome::Success => {}
            SignInOutcome::InvalidCredentials => return Err(SignInError::InvalidCredentials),
            SignInOutcome::LockedOut => return Err(SignInError::LockedOut),
            SignInOutcome::NotAllowed => return Err(SignInError::NotAllowed),
            SignInOutcome::RequiresTwoFactor => return Err(SignInError::RequiresTwoFactor),
        }

        self.sync_display_claims(&identity).await;

        let claims = assemble_token_claims(&self.identity_store, &identity).await;
        let token = self.token_issuer.issue(&claims)?;

        Ok(SignedIn {
            token,
            user: UserSummary::from(&identity),
        })
    }

    /// Claims are display sugar, not an authentication gate: any store error
    /// here is downgraded to a warning and the sign-in continues.
    async fn sync_display_claims(&self, identity: &Identity) {
        let sync = ClaimSyncUseCase::new(self.identity_store.clone());

        let display_role = match self.identity_store.get_roles(identity).await {
            Ok(roles) => roles.join(", "),
            Err(error) => {
                tracing::warn!(%error, "could not read roles for claim sync");
                String::new()
            }
        };

        for (kind, value) in [
            (ClaimKind::DisplayName, identity.display_name()),
            (ClaimKind::DisplayRole, display_role),
        ] {
            if let Err(error) = sync.sync(&identity.email, kind, &value).await {
                tracing::warn!(%error, %kind, "claim sync failed, continuing sign-in");
            }
        }
    }
}
