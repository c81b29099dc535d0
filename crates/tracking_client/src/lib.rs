pub mod location_update;
pub mod tracking_client;
