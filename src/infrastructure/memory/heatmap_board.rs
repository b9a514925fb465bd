use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::heatmap::{self, HeatmapSlot};

/// The current workspace occupancy grid
#[derive(Clone)]
pub struct HeatmapBoard {
    slots: Arc<RwLock<Vec<HeatmapSlot>>>,
}

impl HeatmapBoard {
    /// Creates a board with a freshly generated grid
    pub fn new() -> Self {
        let slots = heatmap::generate(&mut rand::thread_rng());
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }

    pub async fn all(&self) -> Vec<HeatmapSlot> {
        self.slots.read().await.clone()
    }

    pub async fn for_workspace(&self, workspace_id: &str) -> Vec<HeatmapSlot> {
        let slots = self.slots.read().await;
        heatmap::by_workspace(&slots, workspace_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn for_time_slot(&self, time_slot: &str) -> Vec<HeatmapSlot> {
        let slots = self.slots.read().await;
        heatmap::by_time_slot(&slots, time_slot)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Replaces the grid with new random usage and returns it
    pub async fn refresh(&self) -> Vec<HeatmapSlot> {
        let fresh = heatmap::generate(&mut rand::thread_rng());
        *self.slots.write().await = fresh.clone();
        tracing::debug!(slots = fresh.len(), "Heatmap regenerated");
        fresh
    }
}

impl Default for HeatmapBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::heatmap::{TIME_SLOTS, WORKSPACES};

    #[tokio::test]
    async fn filters_by_workspace_and_slot() {
        let board = HeatmapBoard::new();
        assert_eq!(board.all().await.len(), WORKSPACES.len() * TIME_SLOTS.len());
        assert_eq!(board.for_workspace("B").await.len(), TIME_SLOTS.len());
        assert_eq!(board.for_time_slot("09:00-10:00").await.len(), WORKSPACES.len());
        assert!(board.for_workspace("Z").await.is_empty());
    }

    #[tokio::test]
    async fn refresh_keeps_shape() {
        let board = HeatmapBoard::new();
        let fresh = board.refresh().await;
        assert_eq!(fresh, board.all().await);
        assert!(fresh.iter().all(|slot| slot.usage <= 100));
    }
}
