#![allow(dead_code)]

use fleet_sim::{
    geospatial::Coordinate,
    reporter::TelemetryReporter,
    route::{Route, StopSet},
    simulation_params::SimulationParams,
    units::kmh::Kmh,
    vehicle::{MotionStatus, PositionSample, VehicleConfig, VehicleConfigBuilder},
};
use jiff::SignedDuration;
use parking_lot::Mutex;
use tokio::time::Instant;

#[derive(Default)]
pub struct RecordingReporter {
    samples: Mutex<Vec<(PositionSample, Instant)>>,
}

impl RecordingReporter {
    pub fn samples_of(&self, vehicle_id: &str) -> Vec<(PositionSample, Instant)> {
        self.samples
            .lock()
            .iter()
            .filter(|(sample, _)| sample.vehicle_id() == vehicle_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.samples.lock().len()
    }

    pub fn count_status(&self, status: MotionStatus) -> usize {
        self.samples
            .lock()
            .iter()
            .filter(|(sample, _)| sample.status() == status)
            .count()
    }
}

impl TelemetryReporter for RecordingReporter {
    async fn report(&self, sample: PositionSample) {
        self.samples.lock().push((sample, Instant::now()));
    }
}

/// Panics on the first sample of `faulty_vehicle_id`, records the others.
pub struct FaultyReporter {
    pub faulty_vehicle_id: &'static str,
    pub inner: RecordingReporter,
}

impl TelemetryReporter for FaultyReporter {
    async fn report(&self, sample: PositionSample) {
        if sample.vehicle_id() == self.faulty_vehicle_id {
            panic!("arithmetic fault in {}", self.faulty_vehicle_id);
        }
        self.inner.report(sample).await;
    }
}

pub fn quiet_params() -> SimulationParams {
    SimulationParams {
        position_noise: 0.0,
        speed_jitter: 0.0,
        seed: Some(1),
        ..SimulationParams::default()
    }
}

/// About 100 m along the equator.
pub fn short_route() -> Route {
    Route::new(vec![
        Coordinate::from_lat_lon(0.0, 0.0),
        Coordinate::from_lat_lon(0.0, 0.0009),
    ])
}

pub fn create_config(vehicle_id: &str, route: Route, should_loop: bool) -> VehicleConfig {
    let mut builder = VehicleConfigBuilder::default();
    builder
        .set_vehicle_id(vehicle_id)
        .set_route(route)
        .set_stops(StopSet::default())
        .set_speed(Kmh::new(36.0))
        .set_update_interval(SignedDuration::from_secs(2))
        .set_should_loop(should_loop);
    builder.build().unwrap()
}
