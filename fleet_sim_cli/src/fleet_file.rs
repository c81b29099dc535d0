use std::{collections::BTreeMap, path::Path, sync::Arc};

use anyhow::{Context, anyhow};
use fleet_sim::{
    geospatial::Coordinate,
    route::{Route, StopSet},
    units::kmh::Kmh,
    vehicle::{VehicleConfig, VehicleConfigBuilder},
};
use jiff::SignedDuration;
use serde::{Deserialize, Deserializer, de};

use crate::{bangkok, mae_chan, parsers};

/// Fleets compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// One loop through Mae Chan with 22 bus stops and five vehicles
    #[default]
    MaeChan,
    /// Four Bangkok lines, dwelling at every intermediate waypoint
    Bangkok,
}

impl Preset {
    pub fn fleet(self, should_loop: bool) -> Result<FleetDefinition, anyhow::Error> {
        match self {
            Preset::MaeChan => mae_chan::fleet(should_loop),
            Preset::Bangkok => bangkok::fleet(should_loop),
        }
    }
}

/// Routes and vehicles ready to be handed to the orchestrator.
pub struct FleetDefinition {
    pub routes: Vec<NamedRoute>,
    pub vehicles: Vec<VehicleConfig>,
}

pub struct NamedRoute {
    pub name: String,
    pub route: Arc<Route>,
    pub stops: Arc<StopSet>,
}

impl FleetDefinition {
    pub fn is_finite(&self) -> bool {
        self.vehicles.iter().all(|vehicle| !vehicle.should_loop())
    }

    pub fn vehicles_on(&self, route: &NamedRoute) -> usize {
        self.vehicles
            .iter()
            .filter(|vehicle| std::ptr::eq(vehicle.route(), route.route.as_ref()))
            .count()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonFleet {
    routes: BTreeMap<String, JsonRoute>,
    vehicles: Vec<JsonVehicle>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonRoute {
    waypoints: Vec<[f64; 2]>,
    #[serde(default)]
    stops: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonVehicle {
    id: String,
    route: String,
    speed_kmh: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_duration")]
    update_interval: Option<SignedDuration>,
    #[serde(default, deserialize_with = "deserialize_duration")]
    dwell: Option<SignedDuration>,
    #[serde(rename = "loop")]
    should_loop: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDuration {
    Seconds(i64),
    Text(String),
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<SignedDuration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<JsonDuration>::deserialize(deserializer)?
        .map(|duration| match duration {
            JsonDuration::Seconds(seconds) => Ok(SignedDuration::from_secs(seconds)),
            JsonDuration::Text(text) => parsers::parse_duration(&text).map_err(de::Error::custom),
        })
        .transpose()
}

/// The fleet described by `path`, or the `preset` fleet. `force_once` disables
/// looping for every vehicle.
pub fn load_fleet(
    path: Option<&Path>,
    preset: Preset,
    force_once: bool,
) -> Result<FleetDefinition, anyhow::Error> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read fleet file {}", path.display()))?;
            parse_fleet(&content, force_once)
                .with_context(|| format!("Invalid fleet file {}", path.display()))
        }
        None => preset.fleet(!force_once),
    }
}

pub fn parse_fleet(content: &str, force_once: bool) -> Result<FleetDefinition, anyhow::Error> {
    let json: JsonFleet = serde_json::from_str(content)?;

    let routes = json
        .routes
        .into_iter()
        .map(|(name, route)| NamedRoute {
            name,
            route: Arc::new(route.waypoints.into_iter().map(Coordinate::from).collect()),
            stops: Arc::new(route.stops.into_iter().map(Coordinate::from).collect()),
        })
        .collect::<Vec<_>>();

    let mut vehicles = Vec::with_capacity(json.vehicles.len());
    for vehicle in json.vehicles {
        let route = routes
            .iter()
            .find(|route| route.name == vehicle.route)
            .ok_or_else(|| anyhow!("Vehicle {} uses unknown route {}", vehicle.id, vehicle.route))?;

        let mut builder = VehicleConfigBuilder::default();
        builder
            .set_vehicle_id(vehicle.id)
            .set_route(Arc::clone(&route.route))
            .set_stops(Arc::clone(&route.stops));

        if let Some(speed) = vehicle.speed_kmh {
            builder.set_speed(Kmh::new(speed));
        }
        if let Some(update_interval) = vehicle.update_interval {
            builder.set_update_interval(update_interval);
        }
        if let Some(dwell) = vehicle.dwell {
            builder.set_dwell(dwell);
        }
        if force_once {
            builder.set_should_loop(false);
        } else if let Some(should_loop) = vehicle.should_loop {
            builder.set_should_loop(should_loop);
        }

        vehicles.push(builder.build()?);
    }

    Ok(FleetDefinition { routes, vehicles })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLEET: &str = r#"{
        "routes": {
            "campus": {
                "waypoints": [[20.0589569, 99.8997827], [20.0595207, 99.8987364], [20.0600866, 99.8976962]],
                "stops": [[20.0595207, 99.8987364]]
            },
            "market": {
                "waypoints": [[20.1466667, 99.8519444], [20.1358284, 99.8555806]]
            }
        },
        "vehicles": [
            { "id": "SHUTTLE-01", "route": "campus", "speed_kmh": 20, "update_interval": "4s", "dwell": "PT30S", "loop": false },
            { "id": "SHUTTLE-02", "route": "campus", "update_interval": 5 },
            { "id": "VAN-01", "route": "market" }
        ]
    }"#;

    #[test]
    fn test_parse_fleet() {
        let fleet = parse_fleet(FLEET, false).unwrap();

        assert_eq!(fleet.routes.len(), 2);
        assert_eq!(fleet.routes[0].name, "campus");
        assert_eq!(fleet.routes[0].route.len(), 3);
        assert_eq!(fleet.routes[0].stops.len(), 1);
        assert!(fleet.routes[1].stops.is_empty());
        assert_eq!(fleet.vehicles_on(&fleet.routes[0]), 2);
        assert_eq!(fleet.vehicles_on(&fleet.routes[1]), 1);

        let shuttle = &fleet.vehicles[0];
        assert_eq!(shuttle.vehicle_id(), "SHUTTLE-01");
        assert_eq!(shuttle.speed(), Kmh::new(20.0));
        assert_eq!(shuttle.update_interval(), SignedDuration::from_secs(4));
        assert_eq!(shuttle.dwell(), SignedDuration::from_secs(30));
        assert!(!shuttle.should_loop());

        let second = &fleet.vehicles[1];
        assert_eq!(second.update_interval(), SignedDuration::from_secs(5));
        assert_eq!(second.speed(), Kmh::new(25.0));
        assert!(second.should_loop());
        assert!(!fleet.is_finite());
    }

    #[test]
    fn test_force_once() {
        let fleet = parse_fleet(FLEET, true).unwrap();
        assert!(fleet.is_finite());
    }

    #[test]
    fn test_unknown_route() {
        let content = r#"{ "routes": {}, "vehicles": [{ "id": "BUS-01", "route": "nowhere" }] }"#;
        let error = parse_fleet(content, false).err().unwrap();
        assert!(error.to_string().contains("unknown route nowhere"));
    }

    #[test]
    fn test_unknown_field() {
        let content = r#"{ "routes": {}, "vehicles": [], "drivers": [] }"#;
        assert!(parse_fleet(content, false).is_err());
    }

    #[test]
    fn test_malformed_route() {
        let content = r#"{
            "routes": { "short": { "waypoints": [[20.0, 99.9]] } },
            "vehicles": [{ "id": "BUS-01", "route": "short" }]
        }"#;
        let error = parse_fleet(content, false).err().unwrap();
        assert!(error.to_string().contains("at least 2"));
    }

    #[test]
    fn test_builtin_fleet() {
        let fleet = load_fleet(None, Preset::default(), true).unwrap();
        assert_eq!(fleet.vehicles.len(), 5);
        assert_eq!(fleet.routes.len(), 1);
        assert_eq!(fleet.vehicles_on(&fleet.routes[0]), 5);
        assert!(fleet.is_finite());

        let fleet = load_fleet(None, Preset::Bangkok, false).unwrap();
        assert_eq!(fleet.vehicles.len(), 5);
        assert_eq!(fleet.routes.len(), 4);
        assert!(!fleet.is_finite());
    }
}
