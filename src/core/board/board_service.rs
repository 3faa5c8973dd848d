// Suggestion board - the operations the request layer calls.
//
// Composes the moderation gate and the voting service. Submissions are
// serialized so a ban check and the write that follows it can't interleave
// with another submission. Votes are serialized by the item store.

use crate::core::moderation::{BanStore, ModerationError, ModerationGate};
use crate::core::voting::{ItemStore, ItemSummary, VoteStats, VotingError, VotingService};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Moderation(#[from] ModerationError),

    #[error(transparent)]
    Voting(#[from] VotingError),
}

pub struct SuggestionBoard<B: BanStore, S: ItemStore> {
    gate: ModerationGate<B>,
    voting: VotingService<S>,
    submit_lock: Mutex<()>,
}

impl<B: BanStore, S: ItemStore> SuggestionBoard<B, S> {
    pub fn new(gate: ModerationGate<B>, voting: VotingService<S>) -> Self {
        Self {
            gate,
            voting,
            submit_lock: Mutex::new(()),
        }
    }

    /// Add starting items without running them through the gate.
    pub async fn seed<I>(&self, texts: I) -> Result<usize, BoardError>
    where
        I: IntoIterator<Item = String> + Send,
        I::IntoIter: Send,
    {
        let mut count = 0;
        for text in texts {
            self.voting.add_item(text).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Submit a new suggestion. Returns the new item's index.
    pub async fn submit(&self, identity: &str, text: Option<&str>) -> Result<usize, BoardError> {
        let _guard = self.submit_lock.lock().await;

        let text = self.gate.check_and_register_submission(identity, text).await?;
        let index = self.voting.add_item(text).await?;

        tracing::info!(identity, index, "Accepted submission");
        Ok(index)
    }

    /// Vote on the item at `index`. Bans don't apply to voting.
    pub async fn vote(
        &self,
        identity: &str,
        index: i64,
        vote: &str,
    ) -> Result<VoteStats, BoardError> {
        Ok(self.voting.cast_vote(identity, index, vote).await?)
    }

    pub async fn list(&self) -> Result<Vec<ItemSummary>, BoardError> {
        Ok(self.voting.list_items().await?)
    }

    pub async fn reset_personal(&self, identity: &str) -> Result<(), BoardError> {
        self.voting.reset_personal_votes(identity).await?;
        Ok(())
    }

    pub async fn reset_all(&self) -> Result<(), BoardError> {
        Ok(self.voting.reset_all_votes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::filter::WordFilter;
    use crate::core::moderation::ModerationConfig;
    use crate::core::voting::{VoteType, VotingConfig};
    use crate::infra::moderation::InMemoryBanStore;
    use crate::infra::voting::InMemoryItemStore;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    type TestBoard = SuggestionBoard<InMemoryBanStore, InMemoryItemStore>;

    fn board() -> (TestBoard, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let gate = ModerationGate::new(
            InMemoryBanStore::new(),
            WordFilter::default(),
            ModerationConfig::default(),
            clock.clone(),
        );
        let voting = VotingService::new(InMemoryItemStore::new(), VotingConfig::default());
        (SuggestionBoard::new(gate, voting), clock)
    }

    #[tokio::test]
    async fn test_submit_adds_one_empty_item() {
        let (board, _) = board();
        board
            .seed(vec!["Bike lanes".to_string()])
            .await
            .unwrap();

        let before = board.list().await.unwrap().len();
        let index = board.submit("1.1.1.1", Some(" More parks ")).await.unwrap();
        let after = board.list().await.unwrap();

        assert_eq!(after.len(), before + 1);
        assert_eq!(after[index].text, "More parks");
        assert_eq!(after[index].stats.total, 0);
    }

    #[tokio::test]
    async fn test_ban_blocks_submissions_not_votes() {
        let (board, clock) = board();
        board.seed(vec!["Bike lanes".to_string()]).await.unwrap();

        let rejected = board.submit("x", Some("$h1t idea")).await;
        assert!(matches!(
            rejected,
            Err(BoardError::Moderation(ModerationError::ContentRejected { .. }))
        ));
        assert_eq!(board.list().await.unwrap().len(), 1);

        let banned = board.submit("x", Some("A fine idea")).await;
        assert!(matches!(
            banned,
            Err(BoardError::Moderation(ModerationError::Banned { .. }))
        ));

        // voting is still allowed
        assert!(board.vote("x", 0, "agree").await.is_ok());

        clock.advance(Duration::minutes(10));
        assert!(board.submit("x", Some("A fine idea")).await.is_ok());
    }

    #[tokio::test]
    async fn test_vote_reset_revote() {
        let (board, _) = board();
        board.seed(vec!["Bike lanes".to_string()]).await.unwrap();

        board.vote("x", 0, "agree").await.unwrap();
        assert!(matches!(
            board.vote("x", 0, "agree").await,
            Err(BoardError::Voting(VotingError::AlreadyVoted))
        ));

        board.reset_personal("x").await.unwrap();
        let stats = board.vote("x", 0, "disagree").await.unwrap();

        assert_eq!(stats.total, 1);
        assert_eq!(stats.disagree_pct, 100);
    }

    #[tokio::test]
    async fn test_reset_all() {
        let (board, _) = board();
        board
            .seed(vec!["A".to_string(), "B".to_string()])
            .await
            .unwrap();

        board.vote("x", 0, "agree").await.unwrap();
        board.vote("y", 1, "pass").await.unwrap();
        board.reset_all().await.unwrap();

        assert!(board
            .list()
            .await
            .unwrap()
            .iter()
            .all(|item| item.stats.total == 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_record_once() {
        let (board, _) = board();
        board.seed(vec!["Bike lanes".to_string()]).await.unwrap();
        let board = Arc::new(board);

        let mut handles = Vec::new();
        for _ in 0..32 {
            let board = Arc::clone(&board);
            handles.push(tokio::spawn(async move {
                board.vote("same-ip", 0, VoteType::Agree.as_str()).await.is_ok()
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(board.list().await.unwrap()[0].stats.total, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dirty_and_clean_submissions() {
        let (board, _) = board();
        let board = Arc::new(board);

        // the dirty submission races the clean ones from the same identity
        let mut handles = Vec::new();
        for i in 0..16 {
            let board = Arc::clone(&board);
            handles.push(tokio::spawn(async move {
                let text = if i == 8 {
                    "d4mn".to_string()
                } else {
                    format!("idea {i}")
                };
                (i, board.submit("x", Some(&text)).await)
            }));
        }

        let mut accepted = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                (8, result) => assert!(matches!(
                    result,
                    Err(BoardError::Moderation(ModerationError::ContentRejected { .. }))
                )),
                (i, Ok(index)) => accepted.push((index, i)),
                (_, result) => assert!(matches!(
                    result,
                    Err(BoardError::Moderation(ModerationError::Banned { .. }))
                )),
            }
        }

        // only submissions that got in before the ban were stored
        let items = board.list().await.unwrap();
        assert_eq!(items.len(), accepted.len());
        for (index, i) in accepted {
            assert_eq!(items[index].text, format!("idea {i}"));
        }

        // and every clean submission after it is refused
        for i in 0..4 {
            let text = format!("later idea {i}");
            assert!(matches!(
                board.submit("x", Some(&text)).await,
                Err(BoardError::Moderation(ModerationError::Banned { .. }))
            ));
        }
        assert_eq!(board.list().await.unwrap().len(), items.len());
    }
}
