pub mod http_reporter;
pub mod telemetry_reporter;

pub use http_reporter::{DeliveryStatistics, HttpTelemetryReporter};
pub use telemetry_reporter::TelemetryReporter;
