use std::sync::Arc;

use fleet_sim::{
    geospatial::Coordinate,
    route::{Route, StopSet},
    units::kmh::Kmh,
    vehicle::VehicleConfigBuilder,
};
use jiff::SignedDuration;

use crate::fleet_file::{FleetDefinition, NamedRoute};

/// Closed loops: the last waypoint returns to the first one.
const ROUTES: [(&str, &[(f64, f64)]); 4] = [
    (
        "bangkok-city",
        &[
            (13.7563, 100.5018),
            (13.7520, 100.5120),
            (13.7467, 100.5345),
            (13.7390, 100.5280),
            (13.7308, 100.5239),
            (13.7245, 100.5312),
            (13.7200, 100.5200),
            (13.7278, 100.5214),
            (13.7350, 100.5150),
            (13.7563, 100.5018),
        ],
    ),
    (
        "campus-shuttle",
        &[
            (13.8000, 100.5500),
            (13.8020, 100.5520),
            (13.8040, 100.5510),
            (13.8050, 100.5530),
            (13.8030, 100.5550),
            (13.8010, 100.5540),
            (13.8000, 100.5500),
        ],
    ),
    (
        "express",
        &[
            (13.7563, 100.5018),
            (13.7467, 100.5345),
            (13.7308, 100.5239),
            (13.7200, 100.5200),
            (13.7563, 100.5018),
        ],
    ),
    (
        "van",
        &[
            (13.7600, 100.5100),
            (13.7580, 100.5200),
            (13.7550, 100.5300),
            (13.7520, 100.5250),
            (13.7500, 100.5150),
            (13.7600, 100.5100),
        ],
    ),
];

/// (id, route, km/h, update interval in seconds, dwell in seconds)
const VEHICLES: [(&str, &str, f64, i64, i64); 5] = [
    ("BUS-01", "bangkok-city", 25.0, 5, 30),
    ("BUS-02", "bangkok-city", 28.0, 5, 25),
    ("SHUTTLE-01", "campus-shuttle", 15.0, 3, 15),
    ("EXPRESS-01", "express", 40.0, 5, 20),
    ("VAN-01", "van", 30.0, 4, 10),
];

fn named_route(name: &str, waypoints: &[(f64, f64)]) -> NamedRoute {
    let route: Route = waypoints.iter().copied().map(Coordinate::from).collect();

    // Every waypoint between the terminals is a stop.
    let stops: StopSet = waypoints[1..waypoints.len() - 1]
        .iter()
        .copied()
        .map(Coordinate::from)
        .collect();

    NamedRoute {
        name: String::from(name),
        route: Arc::new(route),
        stops: Arc::new(stops),
    }
}

/// Four Bangkok lines where vehicles dwell at every intermediate waypoint.
pub fn fleet(should_loop: bool) -> Result<FleetDefinition, anyhow::Error> {
    let routes = ROUTES
        .into_iter()
        .map(|(name, waypoints)| named_route(name, waypoints))
        .collect::<Vec<_>>();

    let mut vehicles = Vec::with_capacity(VEHICLES.len());
    for (vehicle_id, route_name, speed, update_interval, dwell) in VEHICLES {
        let route = routes
            .iter()
            .find(|route| route.name == route_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown built-in route {route_name}"))?;

        let mut builder = VehicleConfigBuilder::default();
        builder
            .set_vehicle_id(vehicle_id)
            .set_route(Arc::clone(&route.route))
            .set_stops(Arc::clone(&route.stops))
            .set_speed(Kmh::new(speed))
            .set_update_interval(SignedDuration::from_secs(update_interval))
            .set_dwell(SignedDuration::from_secs(dwell))
            .set_should_loop(should_loop);
        vehicles.push(builder.build()?);
    }

    Ok(FleetDefinition { routes, vehicles })
}
