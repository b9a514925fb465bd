use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::poll::{Poll, VoteChoice};

/// Polls held in memory for the lifetime of the process
#[derive(Clone, Default)]
pub struct PollStore {
    polls: Arc<RwLock<HashMap<Uuid, Poll>>>,
}

impl PollStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, poll: Poll) -> Poll {
        self.polls.write().await.insert(poll.id(), poll.clone());
        poll
    }

    /// All polls, newest first
    pub async fn list(&self) -> Vec<Poll> {
        let mut polls: Vec<Poll> = self.polls.read().await.values().cloned().collect();
        polls.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        polls
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Poll> {
        self.polls
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("Poll not found".to_string()))
    }

    /// Records a vote under the write lock, so the duplicate check and the
    /// count update cannot interleave with another vote
    pub async fn vote(&self, id: Uuid, voter: &str, choice: VoteChoice) -> DomainResult<Poll> {
        let mut polls = self.polls.write().await;
        let poll = polls
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("Poll not found".to_string()))?;
        poll.cast_vote(voter, choice)?;
        Ok(poll.clone())
    }
}
