use std::{path::PathBuf, sync::Arc};

use clap::Args;
use fleet_sim::{
    fleet::FleetOrchestrator, reporter::HttpTelemetryReporter, simulation_params::SimulationParams,
};
use jiff::SignedDuration;
use tracing::info;

use crate::{
    fleet_file::{Preset, load_fleet},
    parsers,
};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Args)]
pub struct RunArgs {
    /// Base URL of the tracking service
    #[arg(short, long, env = "TRACKING_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// JSON fleet file, the built-in preset fleet when omitted
    #[arg(short, long)]
    fleet: Option<PathBuf>,

    /// Built-in fleet used when no fleet file is given
    #[arg(short, long, value_enum, default_value_t, conflicts_with = "fleet")]
    preset: Preset,

    /// Stop the simulation after this long (e.g., "10m", "PT1H")
    #[arg(short = 't', long, value_parser = parsers::parse_duration)]
    duration: Option<SignedDuration>,

    /// Drive every route once instead of looping, exit when all vehicles are done
    #[arg(long)]
    once: bool,

    /// Seed for reproducible GPS noise
    #[arg(long)]
    seed: Option<u64>,
}

pub async fn run(args: RunArgs) -> Result<(), anyhow::Error> {
    let definition = load_fleet(args.fleet.as_deref(), args.preset, args.once)?;
    let finite = definition.is_finite();

    let reporter = Arc::new(HttpTelemetryReporter::from_base_url(args.backend_url)?);
    let params = SimulationParams {
        seed: args.seed,
        ..SimulationParams::default()
    };

    let mut fleet = FleetOrchestrator::new(Arc::clone(&reporter), params);
    for vehicle in definition.vehicles {
        fleet.add_vehicle(vehicle)?;
    }

    for named in &definition.routes {
        info!(
            route = %named.name,
            waypoints = named.route.len(),
            stops = named.stops.len(),
            distance = %named.route.total_distance(),
            "Route loaded"
        );
    }
    info!(
        backend = reporter.client().update_location_url(),
        vehicles = fleet.len(),
        "Simulation running, press Ctrl-C to stop"
    );

    fleet.start()?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Received Ctrl-C");
        }
        _ = sleep_for(args.duration) => {
            info!("Simulation duration elapsed");
        }
        result = fleet.wait(), if finite => {
            result?;
        }
    }

    let summary = fleet.stop().await;
    let statistics = reporter.statistics();

    info!(
        completed = summary.completed,
        stopped = summary.stopped,
        abandoned = summary.abandoned,
        failed = summary.failed,
        delivered_updates = statistics.delivered,
        failed_updates = statistics.failed,
        "Simulation ended"
    );

    Ok(())
}

async fn sleep_for(duration: Option<SignedDuration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration.unsigned_abs()).await,
        None => std::future::pending().await,
    }
}
