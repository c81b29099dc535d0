mod common;

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use common::{quiet_params, short_route};
use fleet_sim::{
    fleet::FleetOrchestrator,
    reporter::{DeliveryStatistics, HttpTelemetryReporter},
    units::kmh::Kmh,
    vehicle::{VehicleConfig, VehicleConfigBuilder},
};
use jiff::SignedDuration;
use tokio::{net::TcpListener, sync::Mutex};

type Received = Arc<Mutex<Vec<serde_json::Value>>>;

async fn spawn_tracking_service(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::default();
    let router = Router::new()
        .route(
            "/update_location",
            post(
                move |State(received): State<Received>, Json(body): Json<serde_json::Value>| async move {
                    received.lock().await.push(body);
                    status
                },
            ),
        )
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

/// Covers the 100 m route in about 100 ms.
fn fast_config(vehicle_id: &str) -> VehicleConfig {
    let mut builder = VehicleConfigBuilder::default();
    builder
        .set_vehicle_id(vehicle_id)
        .set_route(short_route())
        .set_speed(Kmh::new(3600.0))
        .set_update_interval(SignedDuration::from_millis(20))
        .set_should_loop(false);
    builder.build().unwrap()
}

#[tokio::test]
async fn posts_every_sample_to_tracking_service() {
    let (base_url, received) = spawn_tracking_service(StatusCode::OK).await;
    let reporter = Arc::new(HttpTelemetryReporter::from_base_url(base_url).unwrap());
    let mut fleet = FleetOrchestrator::new(reporter.clone(), quiet_params());
    fleet.add_vehicle(fast_config("SHUTTLE-01")).unwrap();

    fleet.start().unwrap();
    let summary = fleet.wait().await.unwrap();

    assert_eq!(summary.completed, 1);
    assert_eq!(
        reporter.statistics(),
        DeliveryStatistics {
            delivered: 7,
            failed: 0
        }
    );

    let received = received.lock().await;
    assert_eq!(received.len(), 7);
    for body in received.iter().take(6) {
        assert_eq!(body["vehicle_id"], "SHUTTLE-01");
        assert_eq!(body["status"], "moving");
        assert_eq!(body["speed"], 3600.0);
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }
    assert_eq!(received[6]["status"], "completed");
    assert_eq!(received[6]["speed"], 0.0);
    assert_eq!(received[6]["longitude"], 0.0009);
}

#[tokio::test]
async fn rejected_updates_are_counted_and_dropped() {
    let (base_url, received) = spawn_tracking_service(StatusCode::SERVICE_UNAVAILABLE).await;
    let reporter = Arc::new(HttpTelemetryReporter::from_base_url(base_url).unwrap());
    let mut fleet = FleetOrchestrator::new(reporter.clone(), quiet_params());
    fleet.add_vehicle(fast_config("BUS-01")).unwrap();

    fleet.start().unwrap();
    let summary = fleet.wait().await.unwrap();

    assert_eq!(summary.completed, 1);
    assert_eq!(reporter.statistics().failed, 7);
    assert_eq!(received.lock().await.len(), 7);
}

#[tokio::test]
async fn unreachable_backend_does_not_stop_the_simulation() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let reporter = Arc::new(HttpTelemetryReporter::from_base_url(format!("http://{addr}")).unwrap());
    let params = fleet_sim::simulation_params::SimulationParams {
        stagger_delay: SignedDuration::from_millis(10),
        ..quiet_params()
    };
    let mut fleet = FleetOrchestrator::new(reporter.clone(), params);
    fleet.add_vehicle(fast_config("BUS-01")).unwrap();
    fleet.add_vehicle(fast_config("BUS-02")).unwrap();

    fleet.start().unwrap();
    let summary = fleet.wait().await.unwrap();

    assert_eq!(summary.completed, 2);
    assert_eq!(
        reporter.statistics(),
        DeliveryStatistics {
            delivered: 0,
            failed: 14
        }
    );
}
