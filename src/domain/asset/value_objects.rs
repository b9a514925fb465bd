use serde::{Deserialize, Serialize};

/// Lifecycle status of an asset
///
/// # Status Transitions
/// ```text
/// Available <-> Assigned <-> UnderMaintenance
///     \______________|_____________/
///                    v
///                 Disposed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "asset_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// In stock and unassigned
    Available,
    /// Handed out to a member or staff
    Assigned,
    /// Temporarily out of service
    UnderMaintenance,
    /// Permanently removed from the register
    Disposed,
}

impl AssetStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// Any live status may move to any other live status or to `Disposed`.
    /// `Disposed` is terminal.
    ///
    /// # Example
    /// ```
    /// use managehub_api::domain::asset::AssetStatus;
    ///
    /// assert!(AssetStatus::Available.can_transition_to(AssetStatus::Assigned));
    /// assert!(!AssetStatus::Disposed.can_transition_to(AssetStatus::Available));
    /// ```
    pub fn can_transition_to(&self, next: AssetStatus) -> bool {
        *self != AssetStatus::Disposed && *self != next
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetStatus::Available => write!(f, "available"),
            AssetStatus::Assigned => write!(f, "assigned"),
            AssetStatus::UnderMaintenance => write!(f, "under_maintenance"),
            AssetStatus::Disposed => write!(f, "disposed"),
        }
    }
}
