// In-memory implementation of ItemStore.
//
// Items sit in a Vec behind a tokio RwLock. Every ledger mutation takes the
// write lock, so a vote's duplicate check and its insert happen together.

use crate::core::voting::{Item, ItemStore, Ledger, VoteType, VotingError};
use async_trait::async_trait;
use tokio::sync::RwLock;

pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn add_item(&self, item: Item) -> Result<usize, VotingError> {
        let mut items = self.items.write().await;
        items.push(item);
        Ok(items.len() - 1)
    }

    async fn get_items(&self) -> Result<Vec<Item>, VotingError> {
        let items = self.items.read().await;
        Ok(items.clone())
    }

    async fn record_vote(
        &self,
        index: usize,
        identity: &str,
        vote: VoteType,
    ) -> Result<Ledger, VotingError> {
        let mut items = self.items.write().await;

        let item = items
            .get_mut(index)
            .ok_or(VotingError::NotFound(index as i64))?;

        if item.votes.contains_key(identity) {
            return Err(VotingError::AlreadyVoted);
        }

        item.votes.insert(identity.to_string(), vote);
        Ok(item.votes.clone())
    }

    async fn remove_votes_by(&self, identity: &str) -> Result<usize, VotingError> {
        let mut items = self.items.write().await;

        let mut removed = 0;
        for item in items.iter_mut() {
            if item.votes.remove(identity).is_some() {
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn clear_votes(&self) -> Result<(), VotingError> {
        let mut items = self.items.write().await;
        for item in items.iter_mut() {
            item.votes.clear();
        }
        Ok(())
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}
