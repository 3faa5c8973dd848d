// Voting service - core business logic for the item ledgers.
//
// One vote per identity per item. A vote can only be taken back by a reset,
// never overwritten. All stats are computed from the ledgers on read.

use super::voting_models::{
    BallotKind, Item, ItemSummary, Ledger, ListOrder, PercentPolicy, VoteStats, VoteType,
};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VotingError {
    #[error("Invalid vote: {0}")]
    InvalidVote(String),

    #[error("Item {0} not found")]
    NotFound(i64),

    #[error("Already voted")]
    AlreadyVoted,

    #[error("Storage error: {0}")]
    StorageError(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for holding items and their ledgers.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Append an item. Returns its index.
    async fn add_item(&self, item: Item) -> Result<usize, VotingError>;

    /// Snapshot of every item, in insertion order.
    async fn get_items(&self) -> Result<Vec<Item>, VotingError>;

    /// Record `identity`'s vote on the item at `index`.
    ///
    /// Must check and write as one step: `NotFound` if there is no such item,
    /// `AlreadyVoted` if the identity is already in the ledger. Returns the
    /// ledger after the write.
    async fn record_vote(
        &self,
        index: usize,
        identity: &str,
        vote: VoteType,
    ) -> Result<Ledger, VotingError>;

    /// Remove `identity` from every ledger. Returns how many entries went.
    async fn remove_votes_by(&self, identity: &str) -> Result<usize, VotingError>;

    /// Empty every ledger.
    async fn clear_votes(&self) -> Result<(), VotingError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Per-deployment voting policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct VotingConfig {
    pub ballot: BallotKind,
    pub percent: PercentPolicy,
    pub order: ListOrder,
}

pub struct VotingService<S: ItemStore> {
    store: S,
    config: VotingConfig,
}

impl<S: ItemStore> VotingService<S> {
    pub fn new(store: S, config: VotingConfig) -> Self {
        Self { store, config }
    }

    /// Add a new item with an empty ledger.
    pub async fn add_item(&self, text: String) -> Result<usize, VotingError> {
        self.store.add_item(Item::new(text)).await
    }

    /// Every item with its stats, ordered by the configured `ListOrder`.
    pub async fn list_items(&self) -> Result<Vec<ItemSummary>, VotingError> {
        let mut summaries: Vec<ItemSummary> = self
            .store
            .get_items()
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, item)| ItemSummary {
                index,
                stats: VoteStats::from_ledger(&item.votes, self.config.percent),
                text: item.text,
            })
            .collect();

        match self.config.order {
            ListOrder::Insertion => {}
            ListOrder::MostVotes => {
                // stable, so ties keep insertion order
                summaries.sort_by(|a, b| b.stats.total.cmp(&a.stats.total));
            }
            ListOrder::Ranked => {
                summaries.sort_by(|a, b| {
                    b.stats
                        .agree_count
                        .cmp(&a.stats.agree_count)
                        .then(a.stats.disagree_count.cmp(&b.stats.disagree_count))
                        .then_with(|| a.text.cmp(&b.text))
                        .then(a.index.cmp(&b.index))
                });
            }
        }

        Ok(summaries)
    }

    /// Cast a vote on the item at `index`.
    ///
    /// **Returns:**
    /// - `Ok(VoteStats)` for the item after the vote
    /// - `Err(VotingError::InvalidVote)` if `vote` isn't on this board's ballot
    /// - `Err(VotingError::NotFound)` if there is no item at `index`
    /// - `Err(VotingError::AlreadyVoted)` if `identity` already voted on it
    pub async fn cast_vote(
        &self,
        identity: &str,
        index: i64,
        vote: &str,
    ) -> Result<VoteStats, VotingError> {
        let vote = VoteType::from_name(vote)
            .filter(|v| self.config.ballot.supports(*v))
            .ok_or_else(|| VotingError::InvalidVote(format!("unsupported vote type {vote:?}")))?;

        let slot = usize::try_from(index).map_err(|_| VotingError::NotFound(index))?;

        let ledger = self
            .store
            .record_vote(slot, identity, vote)
            .await
            .map_err(|e| match e {
                VotingError::NotFound(_) => VotingError::NotFound(index),
                other => other,
            })?;

        tracing::debug!(identity, index, vote = %vote, "Vote recorded");

        Ok(VoteStats::from_ledger(&ledger, self.config.percent))
    }

    /// Remove every vote `identity` has cast. Always succeeds on a healthy store.
    pub async fn reset_personal_votes(&self, identity: &str) -> Result<usize, VotingError> {
        let removed = self.store.remove_votes_by(identity).await?;
        tracing::info!(identity, removed, "Personal votes reset");
        Ok(removed)
    }

    /// Clear every ledger on the board.
    pub async fn reset_all_votes(&self) -> Result<(), VotingError> {
        self.store.clear_votes().await?;
        tracing::info!("All votes reset");
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
