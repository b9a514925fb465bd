use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{require_text, DomainError, DomainResult};

/// A yes/no ballot choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yes,
    No,
}

/// A yes/no poll where each voter identifier may vote once
///
/// Voter identifiers are kept to enforce the one-vote rule but never leave
/// the process.
///
/// # Example
/// ```
/// use managehub_api::domain::poll::{Poll, VoteChoice};
///
/// let mut poll = Poll::new("Extend opening hours?", "admin").unwrap();
/// poll.cast_vote("10.0.0.1", VoteChoice::Yes).unwrap();
/// assert!(poll.cast_vote("10.0.0.1", VoteChoice::No).is_err());
/// assert_eq!(poll.yes_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Poll {
    id: Uuid,
    question: String,
    yes_count: u32,
    no_count: u32,
    #[serde(skip)]
    voters: HashSet<String>,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl Poll {
    pub fn new(question: &str, created_by: &str) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            question: require_text(question, "Question")?,
            yes_count: 0,
            no_count: 0,
            voters: HashSet::new(),
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Records a vote
    ///
    /// # Business Rules
    /// - Each identifier may vote once; a repeat leaves the counts unchanged
    pub fn cast_vote(&mut self, identifier: &str, choice: VoteChoice) -> DomainResult<()> {
        if !self.voters.insert(identifier.to_string()) {
            return Err(DomainError::invalid_state("You have already voted"));
        }
        match choice {
            VoteChoice::Yes => self.yes_count += 1,
            VoteChoice::No => self.no_count += 1,
        }
        Ok(())
    }

    pub fn has_voted(&self, identifier: &str) -> bool {
        self.voters.contains(identifier)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn yes_count(&self) -> u32 {
        self.yes_count
    }

    pub fn no_count(&self) -> u32 {
        self.no_count
    }

    pub fn total_votes(&self) -> u32 {
        self.yes_count + self.no_count
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
