pub mod coordinate;

pub use coordinate::{Coordinate, distance_km, interpolate};
