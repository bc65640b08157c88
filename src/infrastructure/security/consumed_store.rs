// src/infrastructure/security/consumed_store.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::{replay::ConsumedCredentialStore, time::Clock},
};
use crate::domain::credential::VerifiedCredential;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, hash_map::Entry};
use std::sync::{Arc, Mutex, MutexGuard};

/// Seconds between sweeps of expired ids.
const PRUNE_INTERVAL_SECS: i64 = 60;

#[derive(Default)]
struct ConsumedIds {
    // credential id -> expires_at
    entries: HashMap<String, DateTime<Utc>>,
    next_prune: i64,
}

impl ConsumedIds {
    fn prune_if_due(&mut self, now: i64) {
        if now < self.next_prune {
            return;
        }
        self.entries.retain(|_, expires_at| expires_at.timestamp() >= now);
        self.next_prune = now + PRUNE_INTERVAL_SECS;
    }
}

/// Process-local set of spent credential ids. Entries are swept at most once
/// per interval after the credential they belong to has expired; an expired
/// id left in the map is harmless since the codec rejects it first.
pub struct InMemoryConsumedCredentialStore {
    consumed: Mutex<ConsumedIds>,
    clock: Arc<dyn Clock>,
}

impl InMemoryConsumedCredentialStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            consumed: Mutex::new(ConsumedIds::default()),
            clock,
        }
    }

    fn lock(&self) -> ApplicationResult<MutexGuard<'_, ConsumedIds>> {
        self.consumed
            .lock()
            .map_err(|_| ApplicationError::infrastructure("consumed credential store poisoned"))
    }

    /// Number of ids currently held.
    pub fn tracked(&self) -> ApplicationResult<usize> {
        Ok(self.lock()?.entries.len())
    }
}

#[async_trait]
impl ConsumedCredentialStore for InMemoryConsumedCredentialStore {
    async fn consume(&self, credential: &VerifiedCredential) -> ApplicationResult<bool> {
        let now = self.clock.now().timestamp();
        let mut guard = self.lock()?;
        guard.prune_if_due(now);

        match guard.entries.entry(credential.id.as_str().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(credential.expires_at);
                Ok(true)
            }
        }
    }
}

pub fn into_arc(store: InMemoryConsumedCredentialStore) -> Arc<dyn ConsumedCredentialStore> {
    Arc::new(store)
}
