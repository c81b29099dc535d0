pub mod position_sample;
pub mod runtime_state;
pub mod vehicle_config;

pub use position_sample::{MotionStatus, PositionSample};
pub use runtime_state::VehicleRuntimeState;
pub use vehicle_config::{VehicleConfig, VehicleConfigBuilder};
