use crate::{
    geospatial::{Coordinate, distance_km, interpolate},
    units::kilometers::Kilometers,
};

/// Ordered waypoints; insertion order is the direction of travel.
///
/// A route is not validated on construction so that fleet files and tests can
/// build partial routes, the orchestrator rejects routes with fewer than two
/// waypoints when a vehicle is registered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    waypoints: Vec<Coordinate>,
}

impl Route {
    pub fn new(waypoints: Vec<Coordinate>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.waypoints.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.waypoints.last()
    }

    /// Consecutive waypoint pairs in travel order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.waypoints.windows(2).map(|pair| Segment {
            start: pair[0],
            end: pair[1],
        })
    }

    pub fn total_distance(&self) -> Kilometers {
        self.segments().map(|segment| segment.distance()).sum()
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Route::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Segment {
    pub fn distance(&self) -> Kilometers {
        distance_km(&self.start, &self.end)
    }

    pub fn position_at(&self, fraction: f64) -> Coordinate {
        interpolate(&self.start, &self.end, fraction)
    }
}
