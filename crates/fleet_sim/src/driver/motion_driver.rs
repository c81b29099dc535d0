use std::sync::Arc;

use jiff::SignedDuration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    driver::telemetry_noise::TelemetryNoise,
    geospatial::Coordinate,
    reporter::TelemetryReporter,
    route::{Segment, StopIdx},
    simulation_params::SimulationParams,
    units::{kilometers::Kilometers, kmh::Kmh},
    vehicle::{MotionStatus, PositionSample, VehicleConfig, VehicleRuntimeState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    TraversingSegment { segment: usize },
    DwellingAtStop { stop: StopIdx },
    IterationPause,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// Ran a non-looping route to its end
    Completed,
    /// Observed the fleet stop signal
    Stopped,
}

/// Marker for an observed stop signal, lets the traversal unwind with `?`.
#[derive(Debug)]
pub(crate) struct Stopped;

/// Drives one vehicle along its route and emits its telemetry.
pub struct MotionDriver<R> {
    config: VehicleConfig,
    params: SimulationParams,
    reporter: Arc<R>,
    noise: TelemetryNoise,
    runtime: VehicleRuntimeState,
    state: DriverState,
}

impl<R: TelemetryReporter> MotionDriver<R> {
    /// `stream` must differ between vehicles of a fleet so seeded runs don't
    /// share their noise.
    pub fn new(
        config: VehicleConfig,
        params: &SimulationParams,
        reporter: Arc<R>,
        stream: u64,
    ) -> Self {
        Self {
            noise: TelemetryNoise::from_params(params, stream),
            config,
            params: params.clone(),
            reporter,
            runtime: VehicleRuntimeState::default(),
            state: DriverState::TraversingSegment { segment: 0 },
        }
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn runtime(&self) -> &VehicleRuntimeState {
        &self.runtime
    }

    /// Runs until the route is completed (loop disabled) or `cancel` fires.
    pub async fn run(&mut self, cancel: &CancellationToken) -> DriverExit {
        info!(
            vehicle_id = self.config.vehicle_id(),
            waypoints = self.config.route().len(),
            stops = self.config.stops().len(),
            speed = %self.config.speed(),
            "Vehicle driver started"
        );

        match self.drive(cancel).await {
            Ok(()) => DriverExit::Completed,
            Err(Stopped) => {
                debug!(vehicle_id = self.config.vehicle_id(), state = ?self.state, "Vehicle driver stopped");
                DriverExit::Stopped
            }
        }
    }

    async fn drive(&mut self, cancel: &CancellationToken) -> Result<(), Stopped> {
        let route = self.config.shared_route();

        loop {
            ensure_running(cancel)?;
            self.runtime.begin_iteration();
            debug!(
                vehicle_id = self.config.vehicle_id(),
                iteration = self.runtime.iteration(),
                "Starting route iteration"
            );

            for (index, segment) in route.segments().enumerate() {
                self.traverse_segment(index, segment, cancel).await?;
            }

            if !self.config.should_loop() {
                if let Some(last_waypoint) = route.last() {
                    self.emit(*last_waypoint, Kmh::ZERO, MotionStatus::Completed)
                        .await;
                }
                self.state = DriverState::Completed;

                info!(
                    vehicle_id = self.config.vehicle_id(),
                    iterations = self.runtime.iteration(),
                    "Route completed"
                );
                return Ok(());
            }

            self.state = DriverState::IterationPause;
            info!(
                vehicle_id = self.config.vehicle_id(),
                pause = %self.params.lap_pause,
                "Lap finished, restarting route after pause"
            );
            sleep_unless_cancelled(cancel, self.params.lap_pause).await?;
        }
    }

    async fn traverse_segment(
        &mut self,
        index: usize,
        segment: Segment,
        cancel: &CancellationToken,
    ) -> Result<(), Stopped> {
        let distance = segment.distance();
        if distance < self.params.segment_epsilon {
            return Ok(());
        }

        self.state = DriverState::TraversingSegment { segment: index };
        let steps = sample_count(distance, self.config.speed(), self.config.update_interval());

        for step in 0..=steps {
            ensure_running(cancel)?;

            let fraction = step as f64 / steps as f64;
            let position = self.noise.jitter_position(segment.position_at(fraction));

            match self.claim_stop_near(&position) {
                Some(stop) => {
                    self.dwell_at_stop(stop, position, cancel).await?;
                    self.state = DriverState::TraversingSegment { segment: index };
                }
                None => {
                    let speed = self.noise.jitter_speed(self.config.speed());
                    self.emit(position, speed, MotionStatus::Moving).await;
                }
            }

            if step < steps {
                sleep_unless_cancelled(cancel, self.config.update_interval()).await?;
            }
        }

        Ok(())
    }

    /// The stop within reach of `position`, marked visited, unless this lap
    /// already dwelled there.
    fn claim_stop_near(&mut self, position: &Coordinate) -> Option<StopIdx> {
        let stop = self
            .config
            .stops()
            .find_nearby_stop(position, self.params.stop_threshold)?;

        self.runtime.mark_visited(stop).then_some(stop)
    }

    async fn dwell_at_stop(
        &mut self,
        stop: StopIdx,
        position: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<(), Stopped> {
        self.state = DriverState::DwellingAtStop { stop };

        info!(
            vehicle_id = self.config.vehicle_id(),
            stop = %format!("{}/{}", stop.get() + 1, self.config.stops().len()),
            dwell = %self.config.dwell(),
            "Reached stop"
        );

        self.emit(position, Kmh::ZERO, MotionStatus::Stopped).await;
        sleep_unless_cancelled(cancel, self.config.dwell()).await?;

        let speed = self.noise.jitter_speed(self.config.speed());
        self.emit(position, speed, MotionStatus::Moving).await;

        Ok(())
    }

    async fn emit(&self, position: Coordinate, speed: Kmh, status: MotionStatus) {
        let sample = PositionSample::new(self.config.shared_vehicle_id(), position, speed, status);
        self.reporter.report(sample).await;
    }
}

/// Number of sampling intervals used to cover a segment, at least one.
/// Saturates at `u64::MAX` for speeds so low the traversal time overflows.
pub fn sample_count(distance: Kilometers, speed: Kmh, update_interval: SignedDuration) -> u64 {
    let traversal_secs = distance.value() * 3600.0 / speed.value();
    let samples = (traversal_secs / update_interval.as_secs_f64()).floor();

    // NaN fails the comparison; +inf casts to u64::MAX
    if samples >= 1.0 { samples as u64 } else { 1 }
}

fn ensure_running(cancel: &CancellationToken) -> Result<(), Stopped> {
    if cancel.is_cancelled() {
        Err(Stopped)
    } else {
        Ok(())
    }
}

/// Sleeps for `duration`, returning early with `Stopped` once `cancel` fires.
pub(crate) async fn sleep_unless_cancelled(
    cancel: &CancellationToken,
    duration: SignedDuration,
) -> Result<(), Stopped> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Stopped),
        _ = tokio::time::sleep(duration.unsigned_abs()) => Ok(()),
    }
}
