pub mod fleet_error;
pub mod fleet_orchestrator;

pub use fleet_error::FleetError;
pub use fleet_orchestrator::{DriverOutcome, FleetOrchestrator, FleetStatus, ShutdownSummary};
