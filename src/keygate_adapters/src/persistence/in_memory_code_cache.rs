use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use keygate_core::{CodeRedemption, Email, VerificationCode, VerificationCodeCache};

struct CacheSlot {
    code: VerificationCode,
    deadline: Instant,
}

/// In-memory verification-code cache guarded by a single lock.
///
/// One slot per normalized email, so issuing a new code overwrites any prior
/// unredeemed one. Expiry is enforced on read; there is no sweeper to depend
/// on. Deadlines use `tokio::time::Instant` so tests can drive them with a
/// paused clock.
#[derive(Default, Clone)]
pub struct InMemoryCodeCache {
    slots: Arc<RwLock<HashMap<Email, CacheSlot>>>,
}

impl InMemoryCodeCache {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl VerificationCodeCache for InMemoryCodeCache {
    async fn put(&self, email: Email, code: VerificationCode, ttl: Duration) {
        let slot = CacheSlot {
            code,
            deadline: Instant::now() + ttl,
        };
        let mut slots = self.slots.write().await;
        slots.insert(email, slot);
    }

    async fn try_get(&self, email: &Email) -> Option<VerificationCode> {
        let slots = self.slots.read().await;
        let slot = slots.get(email)?;
        if slot.deadline <= Instant::now() {
            return None;
        }
        Some(slot.code.clone())
    }

    async fn redeem(&self, email: &Email, submitted: &str) -> CodeRedemption {
        // Compare and delete under one write-lock acquisition so concurrent
        // redemptions for the same email cannot both succeed.
        let mut slots = self.slots.write().await;
        let Some(slot) = slots.get(email) else {
            return CodeRedemption::Missing;
        };
        if slot.deadline <= Instant::now() {
            slots.remove(email);
            return CodeRedemption::Missing;
        }
        if !slot.code.matches(submitted) {
            return CodeRedemption::Mismatch;
        }
        slots.remove(email);
        CodeRedemption::Redeemed
    }

    async fn delete(&self, email: &Email) {
        let mut slots = self.slots.write().await;
        slots.remove(email);
    }
}
