// In-memory implementation of BanStore.
//
// Bans live for the life of the process. Nothing sweeps expired records;
// the gate ignores them on read.

use crate::core::moderation::{BanRecord, BanStore, ModerationError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Maps identity -> ban expiry.
pub struct InMemoryBanStore {
    bans: DashMap<String, DateTime<Utc>>,
}

impl InMemoryBanStore {
    pub fn new() -> Self {
        Self {
            bans: DashMap::new(),
        }
    }

    /// Number of records held, expired ones included.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.bans.len()
    }
}

#[async_trait]
impl BanStore for InMemoryBanStore {
    async fn get_ban(&self, identity: &str) -> Result<Option<BanRecord>, ModerationError> {
        Ok(self.bans.get(identity).map(|entry| BanRecord {
            identity: identity.to_string(),
            expires_at: *entry,
        }))
    }

    async fn set_ban(&self, record: BanRecord) -> Result<(), ModerationError> {
        self.bans.insert(record.identity, record.expires_at);
        Ok(())
    }
}

impl Default for InMemoryBanStore {
    fn default() -> Self {
        Self::new()
    }
}
