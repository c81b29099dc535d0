use std::future::Future;

use crate::vehicle::PositionSample;

/// Sink for emitted samples.
///
/// Delivery is best effort: implementations handle their own failures and never
/// hand an error back to the driver.
pub trait TelemetryReporter: Send + Sync + 'static {
    fn report(&self, sample: PositionSample) -> impl Future<Output = ()> + Send;
}
