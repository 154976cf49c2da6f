use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use keygate_core::{
    DerivedClaim, Email, ExternalLoginInfo, Identity, IdentityStore, IdentityStoreError, Password,
    SignInOutcome,
};

struct IdentityRecord {
    identity: Identity,
    password: Option<Password>,
    roles: BTreeSet<String>,
    claims: Vec<DerivedClaim>,
    external_logins: Vec<(String, String)>,
    locked_out: bool,
    two_factor_enabled: bool,
}

impl IdentityRecord {
    fn new(identity: Identity, password: Option<Password>) -> Self {
        Self {
            identity,
            password,
            roles: BTreeSet::new(),
            claims: Vec::new(),
            external_logins: Vec::new(),
            locked_out: false,
            two_factor_enabled: false,
        }
    }
}

/// In-memory identity store, the reference adapter standing in for the
/// external identity provider.
///
/// Holds passwords in plain [`Password`] wrappers; hashing is the real
/// provider's concern and out of scope here. `require_confirmed_email` is
/// the sign-in policy knob: when set, unverified accounts classify as
/// `NotAllowed`.
#[derive(Default, Clone)]
pub struct HashMapIdentityStore {
    records: Arc<RwLock<HashMap<Email, IdentityRecord>>>,
    require_confirmed_email: bool,
}

impl HashMapIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_confirmation() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            require_confirmed_email: true,
        }
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn lock_out(&self, email: &Email) {
        if let Some(record) = self.records.write().await.get_mut(email) {
            record.locked_out = true;
        }
    }

    pub async fn enable_two_factor(&self, email: &Email) {
        if let Some(record) = self.records.write().await.get_mut(email) {
            record.two_factor_enabled = true;
        }
    }

    pub async fn confirm_email(&self, email: &Email) {
        if let Some(record) = self.records.write().await.get_mut(email) {
            record.identity.email_confirmed = true;
        }
    }
}

#[async_trait]
impl IdentityStore for HashMapIdentityStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Identity>, IdentityStoreError> {
        let records = self.records.read().await;
        Ok(records.get(email).map(|record| record.identity.clone()))
    }

    async fn create(
        &self,
        identity: Identity,
        password: Option<Password>,
    ) -> Result<(), IdentityStoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&identity.email) {
            return Err(IdentityStoreError::AlreadyExists);
        }
        records.insert(
            identity.email.clone(),
            IdentityRecord::new(identity, password),
        );
        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> Result<(), IdentityStoreError> {
        let mut records = self.records.write().await;
        records
            .remove(&identity.email)
            .ok_or(IdentityStoreError::NotFound)?;
        Ok(())
    }

    async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, IdentityStoreError> {
        let records = self.records.read().await;
        let record = records
            .get(&identity.email)
            .ok_or(IdentityStoreError::NotFound)?;
        Ok(record.roles.iter().cloned().collect())
    }

    async fn add_to_role(
        &self,
        identity: &Identity,
        role: &str,
    ) -> Result<(), IdentityStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&identity.email)
            .ok_or(IdentityStoreError::NotFound)?;
        record.roles.insert(role.to_string());
        Ok(())
    }

    async fn get_claims(
        &self,
        identity: &Identity,
    ) -> Result<Vec<DerivedClaim>, IdentityStoreError> {
        let records = self.records.read().await;
        let record = records
            .get(&identity.email)
            .ok_or(IdentityStoreError::NotFound)?;
        Ok(record.claims.clone())
    }

    async fn add_claim(
        &self,
        identity: &Identity,
        claim: DerivedClaim,
    ) -> Result<(), IdentityStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&identity.email)
            .ok_or(IdentityStoreError::NotFound)?;
        // No existence check here on purpose: effective uniqueness per kind
        // is the synchronizer's responsibility, the store just accumulates.
        record.claims.push(claim);
        Ok(())
    }

    async fn password_sign_in(
        &self,
        email: &Email,
        password: &Password,
        _persistent: bool,
    ) -> Result<SignInOutcome, IdentityStoreError> {
        let records = self.records.read().await;
        let Some(record) = records.get(email) else {
            return Ok(SignInOutcome::InvalidCredentials);
        };
        if record.locked_out {
            return Ok(SignInOutcome::LockedOut);
        }
        if self.require_confirmed_email && !record.identity.email_confirmed {
            return Ok(SignInOutcome::NotAllowed);
        }
        match &record.password {
            Some(stored) if stored.expose() == password.expose() => {}
            _ => return Ok(SignInOutcome::InvalidCredentials),
        }
        if record.two_factor_enabled {
            return Ok(SignInOutcome::RequiresTwoFactor);
        }
        Ok(SignInOutcome::Success)
    }

    async fn find_by_external_login(
        &self,
        provider: &str,
        subject_key: &str,
    ) -> Result<Option<Identity>, IdentityStoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|record| {
                record
                    .external_logins
                    .iter()
                    .any(|(p, k)| p == provider && k == subject_key)
            })
            .map(|record| record.identity.clone()))
    }

    async fn add_external_login(
        &self,
        identity: &Identity,
        info: &ExternalLoginInfo,
    ) -> Result<(), IdentityStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&identity.email)
            .ok_or(IdentityStoreError::NotFound)?;
        record
            .external_logins
            .push((info.provider.clone(), info.subject_key.clone()));
        Ok(())
    }
}
