use std::sync::Arc;

use jiff::SignedDuration;

use crate::{
    fleet::FleetError,
    route::{Route, StopSet},
    units::kmh::Kmh,
};

pub const DEFAULT_SPEED: Kmh = Kmh::new(25.0);
pub const DEFAULT_UPDATE_INTERVAL: SignedDuration = SignedDuration::from_secs(3);
pub const DEFAULT_DWELL: SignedDuration = SignedDuration::from_secs(10);

/// Immutable description of one simulated vehicle. Route and stops are shared
/// so several vehicles can run on the same line.
#[derive(Debug, Clone)]
pub struct VehicleConfig {
    vehicle_id: Arc<str>,
    route: Arc<Route>,
    stops: Arc<StopSet>,
    speed: Kmh,
    update_interval: SignedDuration,
    dwell: SignedDuration,
    should_loop: bool,
}

impl VehicleConfig {
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub(crate) fn shared_vehicle_id(&self) -> Arc<str> {
        Arc::clone(&self.vehicle_id)
    }

    pub(crate) fn shared_route(&self) -> Arc<Route> {
        Arc::clone(&self.route)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn stops(&self) -> &StopSet {
        &self.stops
    }

    pub fn speed(&self) -> Kmh {
        self.speed
    }

    pub fn update_interval(&self) -> SignedDuration {
        self.update_interval
    }

    pub fn dwell(&self) -> SignedDuration {
        self.dwell
    }

    pub fn should_loop(&self) -> bool {
        self.should_loop
    }

    pub fn validate(&self) -> Result<(), FleetError> {
        if self.vehicle_id.is_empty() {
            return Err(FleetError::EmptyVehicleId);
        }

        if self.route.len() < 2 {
            return Err(FleetError::MalformedRoute {
                vehicle_id: self.vehicle_id.to_string(),
                waypoints: self.route.len(),
            });
        }

        if !self.speed.value().is_finite() || self.speed.value() <= 0.0 {
            return Err(FleetError::InvalidSpeed {
                vehicle_id: self.vehicle_id.to_string(),
                speed: self.speed.value(),
            });
        }

        if !self.update_interval.is_positive() {
            return Err(FleetError::InvalidUpdateInterval {
                vehicle_id: self.vehicle_id.to_string(),
                interval: format!("{:#}", self.update_interval),
            });
        }

        if self.dwell.is_negative() {
            return Err(FleetError::InvalidDwell {
                vehicle_id: self.vehicle_id.to_string(),
                dwell: format!("{:#}", self.dwell),
            });
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct VehicleConfigBuilder {
    vehicle_id: Option<String>,
    route: Option<Arc<Route>>,
    stops: Option<Arc<StopSet>>,
    speed: Option<Kmh>,
    update_interval: Option<SignedDuration>,
    dwell: Option<SignedDuration>,
    should_loop: Option<bool>,
}

impl VehicleConfigBuilder {
    pub fn set_vehicle_id(&mut self, vehicle_id: impl Into<String>) -> &mut VehicleConfigBuilder {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    pub fn set_route(&mut self, route: impl Into<Arc<Route>>) -> &mut VehicleConfigBuilder {
        self.route = Some(route.into());
        self
    }

    pub fn set_stops(&mut self, stops: impl Into<Arc<StopSet>>) -> &mut VehicleConfigBuilder {
        self.stops = Some(stops.into());
        self
    }

    pub fn set_speed(&mut self, speed: Kmh) -> &mut VehicleConfigBuilder {
        self.speed = Some(speed);
        self
    }

    pub fn set_update_interval(
        &mut self,
        update_interval: SignedDuration,
    ) -> &mut VehicleConfigBuilder {
        self.update_interval = Some(update_interval);
        self
    }

    pub fn set_dwell(&mut self, dwell: SignedDuration) -> &mut VehicleConfigBuilder {
        self.dwell = Some(dwell);
        self
    }

    pub fn set_should_loop(&mut self, should_loop: bool) -> &mut VehicleConfigBuilder {
        self.should_loop = Some(should_loop);
        self
    }

    pub fn build(self) -> Result<VehicleConfig, FleetError> {
        let vehicle_id = self.vehicle_id.ok_or(FleetError::EmptyVehicleId)?;
        let route = self
            .route
            .ok_or_else(|| FleetError::MissingRoute(vehicle_id.clone()))?;

        let config = VehicleConfig {
            vehicle_id: Arc::from(vehicle_id),
            route,
            stops: self.stops.unwrap_or_default(),
            speed: self.speed.unwrap_or(DEFAULT_SPEED),
            update_interval: self.update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL),
            dwell: self.dwell.unwrap_or(DEFAULT_DWELL),
            should_loop: self.should_loop.unwrap_or(true),
        };

        config.validate()?;

        Ok(config)
    }
}
