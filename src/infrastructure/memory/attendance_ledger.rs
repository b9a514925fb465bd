use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

/// Read-only attendance history used to evaluate badges
#[derive(Clone, Default)]
pub struct AttendanceLedger {
    days: Arc<HashMap<String, Vec<NaiveDate>>>,
}

impl AttendanceLedger {
    pub fn new(days: HashMap<String, Vec<NaiveDate>>) -> Self {
        Self {
            days: Arc::new(days),
        }
    }

    /// Ledger with the demo members: `user1` attended 30 days, `user2` 12
    pub fn seeded() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap_or_default();
        let days = |count: usize| start.iter_days().take(count).collect::<Vec<_>>();

        Self::new(HashMap::from([
            ("user1".to_string(), days(30)),
            ("user2".to_string(), days(12)),
        ]))
    }

    /// Attendance days of a member; unknown members have none
    pub fn attendance(&self, user_id: &str) -> &[NaiveDate] {
        self.days.get(user_id).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_members() {
        let ledger = AttendanceLedger::seeded();
        assert_eq!(ledger.attendance("user1").len(), 30);
        assert_eq!(ledger.attendance("user2").len(), 12);
        assert!(ledger.attendance("nobody").is_empty());
    }
}
