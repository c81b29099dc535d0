use std::fmt::Display;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Moving,
    Stopped,
    Completed,
}

impl Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                VehicleStatus::Moving => "moving",
                VehicleStatus::Stopped => "stopped",
                VehicleStatus::Completed => "completed",
            }
        )
    }
}

/// Body of `POST /update_location`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LocationUpdate {
    pub vehicle_id: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Instantaneous speed in km/h
    pub speed: f64,
    pub status: VehicleStatus,

    /// Send time, serialized as RFC 3339 UTC with a trailing `Z`
    pub timestamp: Timestamp,
}
