use keygate_core::{
    Email, Identity, IdentityStore, IdentityStoreError, MailDispatcher, Password, TokenClaims,
    TokenIssueError, TokenIssuer, VerificationCodeCache,
};

use super::verification::{SendCodeError, VerificationUseCase};
use super::{roll_back_identity, DEFAULT_ROLE};

#[derive(Debug, thiserror::Error)]
pub enum SignUpError {
    #[error("An account with this email already exists.")]
    AlreadyExists,
    #[error("User could not be created. Please try again later.")]
    Store(#[source] IdentityStoreError),
    #[error("Failed to send verification email.")]
    Verification(#[source] SendCodeError),
    #[error(transparent)]
    Token(#[from] TokenIssueError),
}

#[derive(Debug)]
pub struct SignedUp {
    pub token: String,
}

/// Sign-up use case - creates an unconfirmed identity, grants the default
/// role, and gates activation behind a verification email.
///
/// If the verification email cannot be dispatched, the just-created identity
/// is deleted again: a failed sign-up leaves no orphaned account behind.
pub struct SignUpUseCase<S, C, M, T>
where
    S: IdentityStore + Clone + 'static,
    C: VerificationCodeCache,
    M: MailDispatcher,
    T: TokenIssuer,
{
    identity_store: S,
    verification: VerificationUseCase<C, M>,
    token_issuer: T,
}

impl<S, C, M, T> SignUpUseCase<S, C, M, T>
where
    S: IdentityStore + Clone + 'static,
    C: VerificationCodeCache,
    M: MailDispatcher,
    T: TokenIssuer,
{
    pub fn new(
        identity_store: S,
        verification: VerificationUseCase<C, M>,
        token_issuer: T,
    ) -> Self {
        Self {
            identity_store,
            verification,
            token_issuer,
        }
    }

    #[tracing::instrument(name = "SignUpUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<SignedUp, SignUpError> {
        let existing = self
            .identity_store
            .find_by_email(&email)
            .await
            .map_err(SignUpError::Store)?;
        if existing.is_some() {
            return Err(SignUpError::AlreadyExists);
        }

        let identity = Identity::new_local(email.clone(), first_name, last_name);
        match self
            .identity_store
            .create(identity.clone(), Some(password))
            .await
        {
            // Lost a concurrent race: the store's uniqueness constraint on
            // email is the arbiter, not a lock of our own.
            Err(IdentityStoreError::AlreadyExists) => return Err(SignUpError::AlreadyExists),
            Err(error) => return Err(SignUpError::Store(error)),
            Ok(()) => {}
        }

        if let Err(error) = self.identity_store.add_to_role(&identity, DEFAULT_ROLE).await {
            roll_back_identity(&self.identity_store, &identity).await;
            return Err(SignUpError::Store(error));
        }

        if let Err(error) = self.verification.send_code(&email).await {
            roll_back_identity(&self.identity_store, &identity).await;
            return Err(SignUpError::Verification(error));
        }

        // Whether the account is usable before the code is redeemed is the
        // boundary's policy; a token is issued either way.
        let claims = TokenClaims::new(identity.id, email)
            .with_display_name(identity.display_name())
            .with_display_role(DEFAULT_ROLE);
        let token = self.token_issuer.issue(&claims)?;

        Ok(SignedUp { token })
    }
}

#[cfg(test)]
mod tests {
    use keygate_adapters::email::MockMailDispatcher;
    use keygate_adapters::persistence::{HashMapIdentityStore, InMemoryCodeCache};
    use secrecy::Secret;

    use super::*;

    struct StubTokenIssuer;

    impl TokenIssuer for StubTokenIssuer {
        fn issue(&self, _claims: &TokenClaims) -> Result<String, TokenIssueError> {
            Ok("stub-token".to_string())
        }
    }

    fn make_use_case(
        store: HashMapIdentityStore,
        mail: MockMailDispatcher,
    ) -> SignUpUseCase<HashMapIdentityStore, InMemoryCodeCache, MockMailDispatcher, StubTokenIssuer>
    {
        let verification = VerificationUseCase::new(
            InMemoryCodeCache::new(),
            mail,
            "https://app.example.com/verify-email".to_string(),
        );
        SignUpUseCase::new(store, verification, StubTokenIssuer)
    }

    fn password() -> Password {
        Password::try_from(Secret::from("pw123456".to_string())).unwrap()
    }

    #[tokio::test]
    async fn sign_up_creates_identity_with_default_role_and_issues_token() {
        let store = HashMapIdentityStore::new();
        let use_case = make_use_case(store.clone(), MockMailDispatcher::new());
        let email = Email::parse("a@x.com").unwrap();

        let signed_up = use_case
            .execute(email.clone(), password(), Some("Ann".into()), Some("Lee".into()))
            .await
            .unwrap();
        assert_eq!(signed_up.token, "stub-token");

        let identity = store.find_by_email(&email).await.unwrap().unwrap();
        assert!(!identity.email_confirmed);
        let roles = store.get_roles(&identity).await.unwrap();
        assert_eq!(roles, vec!["User".to_string()]);
    }

    #[tokio::test]
    async fn mail_failure_rolls_the_identity_back() {
        let store = HashMapIdentityStore::new();
        let use_case = make_use_case(store.clone(), MockMailDispatcher::failing());
        let email = Email::parse("a@x.com").unwrap();

        let result = use_case
            .execute(email.clone(), password(), Some("Ann".into()), Some("Lee".into()))
            .await;

        assert!(matches!(result, Err(SignUpError::Verification(_))));
        assert!(store.find_by_email(&email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_sign_up_for_same_email_is_a_conflict() {
        let store = HashMapIdentityStore::new();
        let use_case = make_use_case(store.clone(), MockMailDispatcher::new());
        let email = Email::parse("a@x.com").unwrap();

        use_case
            .execute(email.clone(), password(), None, None)
            .await
            .unwrap();
        let result = use_case.execute(email.clone(), password(), None, None).await;

        assert!(matches!(result, Err(SignUpError::AlreadyExists)));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn email_is_normalized_before_the_conflict_check() {
        let store = HashMapIdentityStore::new();
        let use_case = make_use_case(store.clone(), MockMailDispatcher::new());

        use_case
            .execute(Email::parse("a@x.com").unwrap(), password(), None, None)
            .await
            .unwrap();
        let result = use_case
            .execute(Email::parse(" A@X.COM ").unwrap(), password(), None, None)
            .await;

        assert!(matches!(result, Err(SignUpError::AlreadyExists)));
    }
}
