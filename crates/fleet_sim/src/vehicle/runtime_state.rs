use fxhash::FxHashSet;

use crate::route::StopIdx;

/// Mutable state of one vehicle, owned by its driver task.
#[derive(Debug, Default)]
pub struct VehicleRuntimeState {
    iteration: u64,
    visited_stops: FxHashSet<StopIdx>,
}

impl VehicleRuntimeState {
    /// Starts a new lap: bumps the counter and forgets the stops visited so far.
    pub fn begin_iteration(&mut self) {
        self.iteration += 1;
        self.visited_stops.clear();
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Returns `false` if the stop was already visited during this lap.
    pub fn mark_visited(&mut self, stop: StopIdx) -> bool {
        self.visited_stops.insert(stop)
    }

    pub fn has_visited(&self, stop: StopIdx) -> bool {
        self.visited_stops.contains(&stop)
    }

    pub fn visited_count(&self) -> usize {
        self.visited_stops.len()
    }
}
