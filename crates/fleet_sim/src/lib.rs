pub mod driver;
pub mod fleet;
pub mod geospatial;
pub mod reporter;
pub mod route;
pub mod simulation_params;
pub mod units;
mod utils;
pub mod vehicle;

#[cfg(test)]
pub(crate) mod test_utils;
