use std::sync::Arc;

use futures::future::join_all;
use jiff::SignedDuration;
use tokio::{
    runtime::Handle,
    task::{JoinError, JoinHandle},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    driver::{
        DriverExit, MotionDriver,
        motion_driver::sleep_unless_cancelled,
    },
    reporter::TelemetryReporter,
    simulation_params::SimulationParams,
    vehicle::VehicleConfig,
};

use super::fleet_error::FleetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetStatus {
    Pending,
    Running,
    Stopped,
}

/// How a driver task ended, as seen by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOutcome {
    Completed,
    Stopped,
    /// Did not exit within the join timeout, left running detached
    Abandoned,
    /// Panicked, the rest of the fleet is unaffected
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownSummary {
    pub completed: usize,
    pub stopped: usize,
    pub abandoned: usize,
    pub failed: usize,
}

impl ShutdownSummary {
    pub fn total(&self) -> usize {
        self.completed + self.stopped + self.abandoned + self.failed
    }

    fn record(&mut self, outcome: DriverOutcome) {
        match outcome {
            DriverOutcome::Completed => self.completed += 1,
            DriverOutcome::Stopped => self.stopped += 1,
            DriverOutcome::Abandoned => self.abandoned += 1,
            DriverOutcome::Failed => self.failed += 1,
        }
    }
}

struct FleetEntry {
    config: VehicleConfig,
    handle: Option<JoinHandle<DriverExit>>,
    outcome: Option<DriverOutcome>,
}

/// Owns the registered vehicles and runs one driver task per vehicle.
///
/// The fleet goes `Pending -> Running -> Stopped` exactly once. Vehicles can only
/// be registered while pending, and every driver observes the same cancellation
/// token.
pub struct FleetOrchestrator<R> {
    reporter: Arc<R>,
    params: SimulationParams,
    vehicles: Vec<FleetEntry>,
    cancellation: CancellationToken,
    status: FleetStatus,
}

impl<R: TelemetryReporter> FleetOrchestrator<R> {
    pub fn new(reporter: Arc<R>, params: SimulationParams) -> Self {
        Self {
            reporter,
            params,
            vehicles: Vec::new(),
            cancellation: CancellationToken::new(),
            status: FleetStatus::Pending,
        }
    }

    pub fn reporter(&self) -> &Arc<R> {
        &self.reporter
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn status(&self) -> FleetStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Registered vehicle ids, in registration (and launch) order.
    pub fn vehicle_ids(&self) -> impl Iterator<Item = &str> {
        self.vehicles.iter().map(|entry| entry.config.vehicle_id())
    }

    pub fn add_vehicle(&mut self, config: VehicleConfig) -> Result<(), FleetError> {
        if self.status != FleetStatus::Pending {
            return Err(FleetError::AlreadyStarted);
        }

        config.validate()?;

        if self.vehicle_ids().any(|id| id == config.vehicle_id()) {
            return Err(FleetError::DuplicateVehicle(config.vehicle_id().to_owned()));
        }

        debug!(
            vehicle_id = config.vehicle_id(),
            waypoints = config.route().len(),
            stops = config.stops().len(),
            "Vehicle registered"
        );

        self.vehicles.push(FleetEntry {
            config,
            handle: None,
            outcome: None,
        });

        Ok(())
    }

    /// Spawns every driver on the current tokio runtime and returns immediately.
    /// Vehicle `i` begins after `i * stagger_delay`, a stop signal received
    /// before that cancels its launch.
    pub fn start(&mut self) -> Result<(), FleetError> {
        if self.status != FleetStatus::Pending {
            return Err(FleetError::AlreadyStarted);
        }

        let runtime = Handle::try_current().map_err(|_| FleetError::NoRuntime)?;
        self.status = FleetStatus::Running;

        info!(
            vehicles = self.vehicles.len(),
            stagger = %self.params.stagger_delay,
            "Starting fleet"
        );

        for (index, entry) in self.vehicles.iter_mut().enumerate() {
            let launch_delay = self.params.stagger_delay * index as i32;
            let config = entry.config.clone();
            let params = self.params.clone();
            let reporter = Arc::clone(&self.reporter);
            let cancel = self.cancellation.clone();

            debug!(
                vehicle_id = config.vehicle_id(),
                launch_delay = %launch_delay,
                "Scheduling vehicle driver"
            );

            entry.handle = Some(runtime.spawn(async move {
                if sleep_unless_cancelled(&cancel, launch_delay).await.is_err() {
                    return DriverExit::Stopped;
                }

                let mut driver = MotionDriver::new(config, &params, reporter, index as u64);
                driver.run(&cancel).await
            }));
        }

        Ok(())
    }

    /// Signals every driver to stop and waits for them, at most `join_timeout`
    /// per driver. Drivers are joined concurrently so the whole call is bounded
    /// by a single timeout. A no-op on a pending fleet, idempotent afterwards.
    pub async fn stop(&mut self) -> ShutdownSummary {
        match self.status {
            FleetStatus::Pending => {
                debug!("Fleet was never started, nothing to stop");
                return ShutdownSummary::default();
            }
            FleetStatus::Stopped => return self.summary(),
            FleetStatus::Running => {}
        }

        info!(vehicles = self.vehicles.len(), "Stopping fleet");
        self.cancellation.cancel();

        let join_timeout = self.params.join_timeout;
        join_all(
            self.vehicles
                .iter_mut()
                .map(|entry| join_entry(entry, Some(join_timeout))),
        )
        .await;

        self.status = FleetStatus::Stopped;
        let summary = self.summary();

        info!(
            completed = summary.completed,
            stopped = summary.stopped,
            abandoned = summary.abandoned,
            failed = summary.failed,
            "Fleet stopped"
        );

        summary
    }

    /// Waits for every driver to finish on its own, without signalling them.
    /// Only returns for fleets where no vehicle loops.
    ///
    /// Cancel safe: drivers that were not joined yet stay owned by the fleet and
    /// are picked up by a later `stop()`.
    pub async fn wait(&mut self) -> Result<ShutdownSummary, FleetError> {
        match self.status {
            FleetStatus::Pending => return Err(FleetError::NotStarted),
            FleetStatus::Stopped => return Ok(self.summary()),
            FleetStatus::Running => {}
        }

        join_all(
            self.vehicles
                .iter_mut()
                .map(|entry| join_entry(entry, None)),
        )
        .await;

        self.status = FleetStatus::Stopped;
        let summary = self.summary();

        info!(
            completed = summary.completed,
            failed = summary.failed,
            "All vehicles finished"
        );

        Ok(summary)
    }

    /// Outcomes of the drivers joined so far.
    pub fn summary(&self) -> ShutdownSummary {
        let mut summary = ShutdownSummary::default();
        for outcome in self.vehicles.iter().filter_map(|entry| entry.outcome) {
            summary.record(outcome);
        }
        summary
    }

    pub fn outcome(&self, vehicle_id: &str) -> Option<DriverOutcome> {
        self.vehicles
            .iter()
            .find(|entry| entry.config.vehicle_id() == vehicle_id)
            .and_then(|entry| entry.outcome)
    }
}

impl<R> Drop for FleetOrchestrator<R> {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

async fn join_entry(entry: &mut FleetEntry, join_timeout: Option<SignedDuration>) {
    let Some(handle) = entry.handle.as_mut() else {
        return;
    };
    let vehicle_id = entry.config.vehicle_id();

    let result = match join_timeout {
        Some(join_timeout) => {
            match tokio::time::timeout(join_timeout.unsigned_abs(), handle).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        vehicle_id,
                        timeout = %join_timeout,
                        "Vehicle driver did not stop in time, abandoning it"
                    );
                    entry.handle = None;
                    entry.outcome = Some(DriverOutcome::Abandoned);
                    return;
                }
            }
        }
        None => handle.await,
    };

    entry.handle = None;
    entry.outcome = Some(driver_outcome(vehicle_id, result));
}

fn driver_outcome(vehicle_id: &str, result: Result<DriverExit, JoinError>) -> DriverOutcome {
    match result {
        Ok(DriverExit::Completed) => DriverOutcome::Completed,
        Ok(DriverExit::Stopped) => DriverOutcome::Stopped,
        Err(err) if err.is_panic() => {
            error!(vehicle_id, "Vehicle driver panicked");
            DriverOutcome::Failed
        }
        Err(err) => {
            error!(vehicle_id, error = %err, "Vehicle driver task failed");
            DriverOutcome::Failed
        }
    }
}
