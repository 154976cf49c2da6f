use keygate_core::{ClaimKind, DerivedClaim, Email, IdentityStore, IdentityStoreError};

/// Claim synchronization use case - idempotently derives and stores display
/// claims on an identity.
///
/// Additive-only: a stored claim with the same kind but a differing value is
/// left untouched. Callers treat failures as warnings; a failed sync never
/// aborts the enclosing sign-in or sign-up flow.
pub struct ClaimSyncUseCase<S>
where
    S: IdentityStore,
{
    identity_store: S,
}

impl<S> ClaimSyncUseCase<S>
where
    S: IdentityStore,
{
    pub fn new(identity_store: S) -> Self {
        Self { identity_store }
    }

    /// Store `(kind, value)` on the identity behind `email` unless an equal
    /// claim already exists. For `DisplayRole` the value is re-derived from
    /// the identity's current role set when no DisplayRole claim exists yet,
    /// so a stale caller value cannot be persisted.
    #[tracing::instrument(name = "ClaimSyncUseCase::sync", skip(self, value))]
    pub async fn sync(
        &self,
        email: &Email,
        kind: ClaimKind,
        value: &str,
    ) -> Result<(), IdentityStoreError> {
        let Some(identity) = self.identity_store.find_by_email(email).await? else {
            return Err(IdentityStoreError::NotFound);
        };

        let claims = self.identity_store.get_claims(&identity).await?;

        if claims.iter().any(|c| c.kind == kind && c.value == value) {
            return Ok(());
        }
        if claims.iter().any(|c| c.kind == kind) {
            tracing::debug!(%email, %kind, "differing claim already stored, skipping");
            return Ok(());
        }

        let value = if kind == ClaimKind::DisplayRole {
            let roles = self.identity_store.get_roles(&identity).await?;
            if roles.is_empty() {
                return Ok(());
            }
            roles.join(", ")
        } else {
            value.to_string()
        };

        self.identity_store
            .add_claim(&identity, DerivedClaim::new(kind, value))
            .await
    }
}
