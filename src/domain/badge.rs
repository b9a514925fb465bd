use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

/// An achievement awarded for attendance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Distinct attendance days required to earn the badge
    pub required_days: usize,
}

const CATALOG: &[Badge] = &[
    Badge {
        id: "attendance-30",
        name: "Monthly Regular",
        description: "Checked in on 30 different days",
        required_days: 30,
    },
    Badge {
        id: "attendance-90",
        name: "Quarterly Champion",
        description: "Checked in on 90 different days",
        required_days: 90,
    },
];

/// All badges that can be earned
pub fn catalog() -> &'static [Badge] {
    CATALOG
}

/// Badges earned by an attendance history
///
/// Only distinct calendar days count towards a threshold.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use managehub_api::domain::badge::earned_badges;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let days: Vec<NaiveDate> = start.iter_days().take(30).collect();
///
/// let earned = earned_badges(&days);
/// assert_eq!(earned.len(), 1);
/// assert_eq!(earned[0].id, "attendance-30");
/// ```
pub fn earned_badges(attendance: &[NaiveDate]) -> Vec<Badge> {
    let distinct_days = attendance.iter().collect::<BTreeSet<_>>().len();
    CATALOG
        .iter()
        .filter(|badge| distinct_days >= badge.required_days)
        .cloned()
        .collect()
}
