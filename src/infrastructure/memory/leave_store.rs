use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::leave::LeaveRequest;

/// The outcome an admin gives a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

/// Leave requests held in memory for the lifetime of the process
#[derive(Clone, Default)]
pub struct LeaveStore {
    requests: Arc<RwLock<HashMap<Uuid, LeaveRequest>>>,
}

impl LeaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, request: LeaveRequest) -> LeaveRequest {
        self.requests
            .write()
            .await
            .insert(request.id(), request.clone());
        request
    }

    /// All requests, newest first
    pub async fn list(&self) -> Vec<LeaveRequest> {
        let mut requests: Vec<LeaveRequest> =
            self.requests.read().await.values().cloned().collect();
        requests.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        requests
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<LeaveRequest> {
        self.requests
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("Leave request not found".to_string()))
    }

    pub async fn decide(
        &self,
        id: Uuid,
        decision: LeaveDecision,
        admin: &str,
    ) -> DomainResult<LeaveRequest> {
        let mut requests = self.requests.write().await;
        let request = requests
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("Leave request not found".to_string()))?;

        match decision {
            LeaveDecision::Approve => request.approve(admin)?,
            LeaveDecision::Reject => request.reject(admin)?,
        }
        Ok(request.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leave::LeaveStatus;
    use chrono::NaiveDate;

    fn request() -> LeaveRequest {
        LeaveRequest::new(
            "Ada",
            "Family event",
            NaiveDate::from_ymd_opt(2024, 12, 23).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 27).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn decided_exactly_once() {
        let store = LeaveStore::new();
        let request = store.insert(request()).await;

        let approved = store
            .decide(request.id(), LeaveDecision::Approve, "ops-lead")
            .await
            .unwrap();
        assert_eq!(approved.status(), LeaveStatus::Approved);
        assert_eq!(approved.decision_by(), Some("ops-lead"));

        let again = store
            .decide(request.id(), LeaveDecision::Reject, "someone")
            .await;
        assert_eq!(
            again.unwrap_err(),
            DomainError::InvalidState("Request already decided".into())
        );
        assert_eq!(
            store.get(request.id()).await.unwrap().status(),
            LeaveStatus::Approved
        );
    }
}
