use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{require_text, DomainError, DomainResult};

/// Decision status of a leave request
///
/// # Status Transitions
/// ```text
/// Pending -> Approved
///        \-> Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// A staff request for time off
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    id: Uuid,
    staff_name: String,
    reason: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: LeaveStatus,
    created_at: DateTime<Utc>,
    decision_by: Option<String>,
    decision_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Files a new pending request
    ///
    /// # Business Rules
    /// - Staff name and reason must be non-blank
    /// - The leave cannot end before it starts
    pub fn new(
        staff_name: &str,
        reason: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DomainResult<Self> {
        let staff_name = require_text(staff_name, "Staff name")?;
        let reason = require_text(reason, "Reason")?;
        if end_date < start_date {
            return Err(DomainError::validation("End date cannot be before start date"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            staff_name,
            reason,
            start_date,
            end_date,
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
            decision_by: None,
            decision_at: None,
        })
    }

    pub fn approve(&mut self, admin: &str) -> DomainResult<()> {
        self.decide(LeaveStatus::Approved, admin)
    }

    pub fn reject(&mut self, admin: &str) -> DomainResult<()> {
        self.decide(LeaveStatus::Rejected, admin)
    }

    fn decide(&mut self, outcome: LeaveStatus, admin: &str) -> DomainResult<()> {
        let admin = require_text(admin, "Admin name")?;
        if self.status != LeaveStatus::Pending {
            return Err(DomainError::invalid_state("Request already decided"));
        }
        self.status = outcome;
        self.decision_by = Some(admin);
        self.decision_at = Some(Utc::now());
        Ok(())
    }

    /// Number of calendar days covered, inclusive of both ends
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn staff_name(&self) -> &str {
        &self.staff_name
    }

    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn decision_by(&self) -> Option<&str> {
        self.decision_by.as_deref()
    }

    pub fn decision_at(&self) -> Option<DateTime<Utc>> {
        self.decision_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    fn request() -> LeaveRequest {
        LeaveRequest::new("Ada", "Family visit", date(1), date(5)).unwrap()
    }

    #[test]
    fn new_request_is_pending() {
        let leave = request();
        assert_eq!(leave.status(), LeaveStatus::Pending);
        assert_eq!(leave.days(), 5);
        assert!(leave.decision_by().is_none());
    }

    #[test]
    fn missing_fields_fail() {
        assert!(LeaveRequest::new("", "x", date(1), date(1)).is_err());
        assert!(LeaveRequest::new("Ada", " ", date(1), date(1)).is_err());
    }

    #[test]
    fn end_before_start_fails() {
        let result = LeaveRequest::new("Ada", "Trip", date(5), date(1));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn approve_records_decision() {
        let mut leave = request();
        leave.approve("Grace").unwrap();

        assert_eq!(leave.status(), LeaveStatus::Approved);
        assert_eq!(leave.decision_by(), Some("Grace"));
        assert!(leave.decision_at().is_some());
    }

    #[test]
    fn decision_happens_once() {
        let mut leave = request();
        leave.reject("Grace").unwrap();

        let result = leave.approve("Linus");
        assert_eq!(
            result,
            Err(DomainError::InvalidState("Request already decided".into()))
        );
        assert_eq!(leave.status(), LeaveStatus::Rejected);
        assert_eq!(leave.decision_by(), Some("Grace"));
    }

    #[test]
    fn blank_admin_fails_without_deciding() {
        let mut leave = request();
        assert!(leave.approve("  ").is_err());
        assert_eq!(leave.status(), LeaveStatus::Pending);
    }
}
