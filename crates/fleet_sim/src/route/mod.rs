#[allow(clippy::module_inception)]
pub mod route;
pub mod stop_set;

pub use route::{Route, Segment};
pub use stop_set::{StopIdx, StopSet, find_nearby_stop};
