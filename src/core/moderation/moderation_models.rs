// Moderation domain models - data structures for the submission gate.
//
// These are pure domain types with no HTTP dependencies.
// The web layer will convert rejections to status codes.

use chrono::{DateTime, Duration, Utc};

/// Default ban length for identities that submit filtered content.
pub const DEFAULT_BAN_WINDOW_SECS: i64 = 10 * 60;

/// A ban on one identity, active while `now < expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRecord {
    pub identity: String,
    pub expires_at: DateTime<Utc>,
}

impl BanRecord {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left on the ban, zero once it has lapsed.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.is_active(now) {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Configuration for the moderation gate.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// How long a content rejection bans the submitter
    pub ban_window: Duration,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            ban_window: Duration::seconds(DEFAULT_BAN_WINDOW_SECS),
        }
    }
}
