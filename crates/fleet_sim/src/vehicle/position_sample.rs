use std::{fmt::Display, sync::Arc};

use jiff::Timestamp;

use crate::{geospatial::Coordinate, units::kmh::Kmh};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionStatus {
    Moving,
    Stopped,
    Completed,
}

impl Display for MotionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionStatus::Moving => write!(f, "moving"),
            MotionStatus::Stopped => write!(f, "stopped"),
            MotionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One emitted telemetry record. Built once by the driver and handed over to the
/// reporter by value.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    vehicle_id: Arc<str>,
    position: Coordinate,
    speed: Kmh,
    status: MotionStatus,
    timestamp: Timestamp,
}

impl PositionSample {
    pub fn new(vehicle_id: Arc<str>, position: Coordinate, speed: Kmh, status: MotionStatus) -> Self {
        Self {
            vehicle_id,
            position,
            speed,
            status,
            timestamp: Timestamp::now(),
        }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.lat()
    }

    pub fn longitude(&self) -> f64 {
        self.position.lon()
    }

    pub fn speed(&self) -> Kmh {
        self.speed
    }

    pub fn status(&self) -> MotionStatus {
        self.status
    }

    /// Simulated time the sample was produced at.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
