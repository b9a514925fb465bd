use rand::Rng;
use serde::Serialize;

pub const WORKSPACES: [&str; 4] = ["A", "B", "C", "D"];

pub const TIME_SLOTS: [&str; 8] = [
    "08:00-09:00",
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
];

/// Occupancy of one workspace during one hourly slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapSlot {
    pub workspace_id: String,
    pub time_slot: String,
    /// Percentage in 0..=100
    pub usage: u8,
}

/// Generates one slot per workspace and time slot with random usage
pub fn generate<R: Rng>(rng: &mut R) -> Vec<HeatmapSlot> {
    WORKSPACES
        .iter()
        .flat_map(|workspace| {
            TIME_SLOTS.iter().map(move |slot| (*workspace, *slot))
        })
        .map(|(workspace, slot)| HeatmapSlot {
            workspace_id: workspace.to_string(),
            time_slot: slot.to_string(),
            usage: rng.gen_range(0..=100),
        })
        .collect()
}

pub fn by_workspace<'a>(slots: &'a [HeatmapSlot], workspace_id: &str) -> Vec<&'a HeatmapSlot> {
    slots
        .iter()
        .filter(|slot| slot.workspace_id == workspace_id)
        .collect()
}

pub fn by_time_slot<'a>(slots: &'a [HeatmapSlot], time_slot: &str) -> Vec<&'a HeatmapSlot> {
    slots
        .iter()
        .filter(|slot| slot.time_slot == time_slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> Vec<HeatmapSlot> {
        generate(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn grid_covers_every_workspace_and_slot() {
        let slots = grid();
        assert_eq!(slots.len(), WORKSPACES.len() * TIME_SLOTS.len());
    }

    #[test]
    fn usage_is_a_percentage() {
        assert!(grid().iter().all(|slot| slot.usage <= 100));
    }

    #[test]
    fn filter_by_workspace() {
        let slots = grid();
        let a = by_workspace(&slots, "A");
        assert_eq!(a.len(), TIME_SLOTS.len());
        assert!(a.iter().all(|slot| slot.workspace_id == "A"));
    }

    #[test]
    fn filter_by_time_slot() {
        let slots = grid();
        let nine = by_time_slot(&slots, "09:00-10:00");
        assert_eq!(nine.len(), WORKSPACES.len());
    }

    #[test]
    fn unknown_filters_are_empty() {
        let slots = grid();
        assert!(by_workspace(&slots, "Z").is_empty());
        assert!(by_time_slot(&slots, "23:00-24:00").is_empty());
    }
}
