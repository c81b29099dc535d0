use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FleetError {
    #[error("Route of vehicle {vehicle_id} has {waypoints} waypoint(s), at least 2 are required")]
    MalformedRoute {
        vehicle_id: String,
        waypoints: usize,
    },

    #[error("Vehicle {vehicle_id} has an invalid cruising speed {speed} km/h")]
    InvalidSpeed { vehicle_id: String, speed: f64 },

    #[error("Vehicle {vehicle_id} has an invalid update interval {interval}")]
    InvalidUpdateInterval { vehicle_id: String, interval: String },

    #[error("Vehicle {vehicle_id} has a negative dwell duration {dwell}")]
    InvalidDwell { vehicle_id: String, dwell: String },

    #[error("Vehicle {0} is already registered")]
    DuplicateVehicle(String),

    #[error("Vehicle id must not be empty")]
    EmptyVehicleId,

    #[error("Vehicle {0} has no route")]
    MissingRoute(String),

    #[error("Fleet has already been started")]
    AlreadyStarted,

    #[error("Fleet has not been started")]
    NotStarted,

    #[error("Fleet must be started from within a tokio runtime")]
    NoRuntime,
}
