use crate::{
    geospatial::Coordinate, units::kilometers::Kilometers, utils::newtype_index::define_index_newtype,
};

define_index_newtype!(StopIdx, Coordinate);

pub const DEFAULT_STOP_THRESHOLD: Kilometers = Kilometers::new(0.03);

/// Designated dwell locations of a route. Membership is tested by proximity,
/// iteration order is insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StopSet {
    stops: Vec<Coordinate>,
}

impl StopSet {
    pub fn new(stops: Vec<Coordinate>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[Coordinate] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, index: StopIdx) -> Option<&Coordinate> {
        self.stops.get(index.get())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StopIdx, &Coordinate)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(index, stop)| (StopIdx::new(index), stop))
    }

    pub fn find_nearby_stop(&self, position: &Coordinate, threshold: Kilometers) -> Option<StopIdx> {
        find_nearby_stop(position, self, threshold)
    }
}

impl FromIterator<Coordinate> for StopSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        StopSet::new(iter.into_iter().collect())
    }
}

/// First stop, in insertion order, lying within `threshold` (inclusive) of
/// `position`.
pub fn find_nearby_stop(
    position: &Coordinate,
    stops: &StopSet,
    threshold: Kilometers,
) -> Option<StopIdx> {
    stops
        .iter()
        .find(|(_, stop)| position.distance_km(stop) <= threshold)
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_stop_in_range() {
        let stops = StopSet::new(vec![Coordinate::from_lat_lon(20.0718, 99.8900)]);
        let position = Coordinate::from_lat_lon(20.0589569, 99.8997827);

        assert_eq!(stops.find_nearby_stop(&position, DEFAULT_STOP_THRESHOLD), None);
    }

    #[test]
    fn test_empty_stop_set() {
        let position = Coordinate::from_lat_lon(20.0589569, 99.8997827);
        assert_eq!(
            find_nearby_stop(&position, &StopSet::default(), DEFAULT_STOP_THRESHOLD),
            None
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Both stops are within 30 m of the position.
        let stops = StopSet::new(vec![
            Coordinate::from_lat_lon(0.0, 0.0001),
            Coordinate::from_lat_lon(0.0, 0.0),
        ]);
        let position = Coordinate::from_lat_lon(0.0, 0.0);

        assert_eq!(
            stops.find_nearby_stop(&position, DEFAULT_STOP_THRESHOLD),
            Some(StopIdx::new(0))
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let stop = Coordinate::from_lat_lon(0.0, 0.0002);
        let position = Coordinate::from_lat_lon(0.0, 0.0);
        let exact = position.distance_km(&stop);
        let stops = StopSet::new(vec![stop]);

        assert_eq!(stops.find_nearby_stop(&position, exact), Some(StopIdx::new(0)));
        assert_eq!(
            stops.find_nearby_stop(&position, Kilometers::new(exact.value() * 0.99)),
            None
        );
    }

    #[test]
    fn test_index_by_stop_idx() {
        let stops = StopSet::new(vec![
            Coordinate::from_lat_lon(20.0, 99.9),
            Coordinate::from_lat_lon(20.1, 99.8),
        ]);

        assert_eq!(stops.stops()[StopIdx::new(1)], Coordinate::from_lat_lon(20.1, 99.8));
        assert_eq!(stops.get(StopIdx::new(2)), None);
    }
}
