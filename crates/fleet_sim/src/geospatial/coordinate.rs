use std::fmt::Display;

use crate::units::kilometers::Kilometers;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS84 latitude/longitude in degrees. Stored as a `geo::Point` with `x = lon`
/// and `y = lat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    point: geo::Point,
}

impl Coordinate {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self {
            point: geo::Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn distance_km(&self, to: &Coordinate) -> Kilometers {
        distance_km(self, to)
    }

    pub fn interpolate(&self, to: &Coordinate, fraction: f64) -> Coordinate {
        interpolate(self, to, fraction)
    }

    /// Shifts the coordinate by raw degree deltas.
    pub fn offset(&self, delta_lat: f64, delta_lon: f64) -> Coordinate {
        Coordinate::from_lat_lon(self.lat() + delta_lat, self.lon() + delta_lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Coordinate::from_lat_lon(lat, lon)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Coordinate::from_lat_lon(lat, lon)
    }
}

impl From<&Coordinate> for geo::Point {
    fn from(coordinate: &Coordinate) -> Self {
        coordinate.point
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat(), self.lon())
    }
}

/// Great-circle distance using the haversine formula.
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> Kilometers {
    let lat1_rad = from.lat().to_radians();
    let lon1_rad = from.lon().to_radians();
    let lat2_rad = to.lat().to_radians();
    let lon2_rad = to.lon().to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Kilometers::new(EARTH_RADIUS_KM * c)
}

/// Linear interpolation in lat/lon space. `fraction` is not clamped.
pub fn interpolate(from: &Coordinate, to: &Coordinate, fraction: f64) -> Coordinate {
    Coordinate::from_lat_lon(
        from.lat() * (1.0 - fraction) + to.lat() * fraction,
        from.lon() * (1.0 - fraction) + to.lon() * fraction,
    )
}
