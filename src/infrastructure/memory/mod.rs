// Process-local stores for the resources that are not persisted

pub mod attendance_ledger;
pub mod biometric_simulator;
pub mod heatmap_board;
pub mod leave_store;
pub mod poll_store;

pub use attendance_ledger::AttendanceLedger;
pub use biometric_simulator::{BiometricSimulator, SimulationStatus};
pub use heatmap_board::HeatmapBoard;
pub use leave_store::{LeaveDecision, LeaveStore};
pub use poll_store::PollStore;
