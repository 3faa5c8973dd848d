// Moderation gate - core business logic for accepting submissions.
//
// This service handles:
// - Ban checks for identities caught submitting filtered content
// - Input validation (missing or blank text)
// - Profanity detection and the ban that follows it
//
// NO HTTP dependencies here - just pure domain logic.

use super::moderation_models::{BanRecord, ModerationConfig};
use crate::core::clock::Clock;
use crate::core::filter::WordFilter;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("You are temporarily banned for submitting inappropriate content.")]
    Banned { remaining: Duration },

    #[error("Submission text is missing or blank")]
    InvalidInput,

    #[error("Inappropriate content detected. You are banned for {} minutes.", .ban.num_minutes())]
    ContentRejected { ban: Duration },

    #[error("Storage error: {0}")]
    StorageError(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for keeping ban records.
///
/// Records are never swept; expired ones are ignored on read.
#[async_trait]
pub trait BanStore: Send + Sync {
    /// Get the ban record for an identity, active or not.
    async fn get_ban(&self, identity: &str) -> Result<Option<BanRecord>, ModerationError>;

    /// Insert or replace the ban record for an identity.
    async fn set_ban(&self, record: BanRecord) -> Result<(), ModerationError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Decides whether a submission may be added to the board.
pub struct ModerationGate<B: BanStore> {
    store: B,
    filter: WordFilter,
    config: ModerationConfig,
    clock: Arc<dyn Clock>,
}

impl<B: BanStore> ModerationGate<B> {
    pub fn new(
        store: B,
        filter: WordFilter,
        config: ModerationConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            filter,
            config,
            clock,
        }
    }

    /// Run a submission through the gate.
    ///
    /// Checks, in order: active ban, blank or missing text, banned words.
    /// A banned word bans `identity` for the configured window. On success the
    /// trimmed text is returned for the caller to store.
    ///
    /// Callers that need check-and-store to be atomic per identity must hold
    /// their own lock across this call and the store write.
    pub async fn check_and_register_submission(
        &self,
        identity: &str,
        text: Option<&str>,
    ) -> Result<String, ModerationError> {
        let now = self.clock.now();

        if let Some(record) = self.store.get_ban(identity).await? {
            if record.is_active(now) {
                return Err(ModerationError::Banned {
                    remaining: record.remaining(now),
                });
            }
        }

        let text = match text.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ModerationError::InvalidInput),
        };

        if self.filter.contains_banned_word(text) {
            let record = BanRecord {
                identity: identity.to_string(),
                expires_at: now + self.config.ban_window,
            };
            self.store.set_ban(record).await?;

            tracing::warn!(
                identity,
                ban_secs = self.config.ban_window.num_seconds(),
                "Rejected submission and banned identity"
            );

            return Err(ModerationError::ContentRejected {
                ban: self.config.ban_window,
            });
        }

        Ok(text.to_string())
    }

    /// Time left on an identity's ban, if it has an active one.
    #[allow(dead_code)]
    pub async fn ban_remaining(&self, identity: &str) -> Result<Option<Duration>, ModerationError> {
        let now = self.clock.now();
        Ok(self
            .store
            .get_ban(identity)
            .await?
            .filter(|record| record.is_active(now))
            .map(|record| record.remaining(now)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
