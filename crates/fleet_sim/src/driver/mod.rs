pub mod motion_driver;
pub mod telemetry_noise;

pub use motion_driver::{DriverExit, DriverState, MotionDriver};
