use jiff::SignedDuration;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::{
    reporter::TelemetryReporter,
    route::{Route, StopSet},
    simulation_params::SimulationParams,
    units::kmh::Kmh,
    vehicle::{MotionStatus, PositionSample, VehicleConfig, VehicleConfigBuilder},
};

/// Keeps every reported sample together with the (tokio) instant it was reported at.
#[derive(Default)]
pub struct RecordingReporter {
    samples: Mutex<Vec<(PositionSample, Instant)>>,
}

impl RecordingReporter {
    pub fn samples(&self) -> Vec<(PositionSample, Instant)> {
        self.samples.lock().clone()
    }

    pub fn statuses(&self) -> Vec<MotionStatus> {
        self.samples
            .lock()
            .iter()
            .map(|(sample, _)| sample.status())
            .collect()
    }
}

impl TelemetryReporter for RecordingReporter {
    async fn report(&self, sample: PositionSample) {
        self.samples.lock().push((sample, Instant::now()));
    }
}

/// No noise, no jitter: emitted positions are exact interpolations.
pub fn quiet_params() -> SimulationParams {
    SimulationParams {
        position_noise: 0.0,
        speed_jitter: 0.0,
        seed: Some(0),
        ..SimulationParams::default()
    }
}

/// 36 km/h, 10 s interval, 10 s dwell.
pub fn config_builder(vehicle_id: &str, route: Route, stops: StopSet) -> VehicleConfigBuilder {
    let mut builder = VehicleConfigBuilder::default();
    builder
        .set_vehicle_id(vehicle_id)
        .set_route(route)
        .set_stops(stops)
        .set_speed(Kmh::new(36.0))
        .set_update_interval(SignedDuration::from_secs(10))
        .set_dwell(SignedDuration::from_secs(10));
    builder
}

pub fn create_config(
    vehicle_id: &str,
    route: Route,
    stops: StopSet,
    should_loop: bool,
) -> VehicleConfig {
    let mut builder = config_builder(vehicle_id, route, stops);
    builder.set_should_loop(should_loop);
    builder.build().unwrap()
}
