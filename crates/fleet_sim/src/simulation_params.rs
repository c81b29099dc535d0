use jiff::SignedDuration;

use crate::{route::stop_set::DEFAULT_STOP_THRESHOLD, units::kilometers::Kilometers};

/// Engine constants shared by every vehicle of a fleet.
#[derive(Clone, Debug)]
pub struct SimulationParams {
    /// Delay between two consecutive vehicle launches
    pub stagger_delay: SignedDuration,

    /// How long `stop()` waits for each driver before abandoning it
    pub join_timeout: SignedDuration,

    /// Pause between two laps of a looping vehicle
    pub lap_pause: SignedDuration,

    pub stop_threshold: Kilometers,

    /// Segments shorter than this are skipped
    pub segment_epsilon: Kilometers,

    /// Maximum positional noise per axis, in degrees
    pub position_noise: f64,

    /// Maximum speed jitter, in km/h
    pub speed_jitter: f64,

    /// Fixes the noise generators for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            stagger_delay: SignedDuration::from_secs(5),
            join_timeout: SignedDuration::from_secs(5),
            lap_pause: SignedDuration::from_secs(30),
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            segment_epsilon: Kilometers::new(0.0001),
            position_noise: 0.00004,
            speed_jitter: 3.0,
            seed: None,
        }
    }
}
