use std::sync::atomic::{AtomicU64, Ordering};

use jiff::Timestamp;
use tracing::{debug, warn};
use tracking_client::{
    location_update::{LocationUpdate, VehicleStatus},
    tracking_client::{TrackingClient, TrackingClientParams, TrackingError},
};

use crate::vehicle::{MotionStatus, PositionSample};

use super::telemetry_reporter::TelemetryReporter;

const MAX_LOGGED_ERROR_LENGTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryStatistics {
    pub delivered: u64,
    pub failed: u64,
}

/// Reports samples to the tracking service, one `POST /update_location` each.
pub struct HttpTelemetryReporter {
    client: TrackingClient,
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl HttpTelemetryReporter {
    pub fn new(client: TrackingClient) -> Self {
        Self {
            client,
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self, TrackingError> {
        let client = TrackingClient::new(TrackingClientParams::new(base_url))?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &TrackingClient {
        &self.client
    }

    pub fn statistics(&self) -> DeliveryStatistics {
        DeliveryStatistics {
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

impl TelemetryReporter for HttpTelemetryReporter {
    async fn report(&self, sample: PositionSample) {
        let update = LocationUpdate {
            vehicle_id: sample.vehicle_id().to_owned(),
            latitude: sample.latitude(),
            longitude: sample.longitude(),
            speed: sample.speed().value(),
            status: sample.status().into(),
            timestamp: Timestamp::now(),
        };

        match self.client.update_location(&update).await {
            Ok(()) => {
                self.delivered.fetch_add(1, Ordering::Relaxed);
                debug!(
                    vehicle_id = %update.vehicle_id,
                    lat = update.latitude,
                    lon = update.longitude,
                    speed = update.speed,
                    status = %update.status,
                    "Sent location update"
                );
            }
            Err(TrackingError::Api { status, .. }) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                warn!(vehicle_id = %update.vehicle_id, status, "Tracking service rejected update");
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                let message = err.to_string();
                warn!(
                    vehicle_id = %update.vehicle_id,
                    error = truncate(&message, MAX_LOGGED_ERROR_LENGTH),
                    "Failed to send location update"
                );
            }
        }
    }
}

impl From<MotionStatus> for VehicleStatus {
    fn from(status: MotionStatus) -> Self {
        match status {
            MotionStatus::Moving => VehicleStatus::Moving,
            MotionStatus::Stopped => VehicleStatus::Stopped,
            MotionStatus::Completed => VehicleStatus::Completed,
        }
    }
}

fn truncate(message: &str, max_chars: usize) -> &str {
    match message.char_indices().nth(max_chars) {
        Some((index, _)) => &message[..index],
        None => message,
    }
}
