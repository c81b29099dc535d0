use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{geospatial::Coordinate, simulation_params::SimulationParams, units::kmh::Kmh};

/// Receiver jitter applied to emitted positions and speeds.
pub struct TelemetryNoise {
    rng: SmallRng,
    position_amplitude: f64,
    speed_amplitude: f64,
}

impl TelemetryNoise {
    /// `stream` separates the generators of vehicles sharing the same seed.
    pub fn from_params(params: &SimulationParams, stream: u64) -> Self {
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(stream)),
            None => SmallRng::from_os_rng(),
        };

        Self {
            rng,
            position_amplitude: params.position_noise.abs(),
            speed_amplitude: params.speed_jitter.abs(),
        }
    }

    pub fn jitter_position(&mut self, position: Coordinate) -> Coordinate {
        if self.position_amplitude == 0.0 {
            return position;
        }

        let amplitude = self.position_amplitude;
        position.offset(
            self.rng.random_range(-amplitude..=amplitude),
            self.rng.random_range(-amplitude..=amplitude),
        )
    }

    /// Cruising speed plus jitter, never negative.
    pub fn jitter_speed(&mut self, speed: Kmh) -> Kmh {
        if self.speed_amplitude == 0.0 {
            return Kmh::new(speed.value().max(0.0));
        }

        let amplitude = self.speed_amplitude;
        let jittered = speed.value() + self.rng.random_range(-amplitude..=amplitude);
        Kmh::new(jittered.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_params() -> SimulationParams {
        SimulationParams {
            seed: Some(42),
            ..SimulationParams::default()
        }
    }

    #[test]
    fn test_position_stays_within_amplitude() {
        let params = seeded_params();
        let mut noise = TelemetryNoise::from_params(&params, 0);
        let position = Coordinate::from_lat_lon(20.0589569, 99.8997827);

        for _ in 0..1000 {
            let jittered = noise.jitter_position(position);
            assert!((jittered.lat() - position.lat()).abs() <= params.position_noise + 1e-12);
            assert!((jittered.lon() - position.lon()).abs() <= params.position_noise + 1e-12);
        }
    }

    #[test]
    fn test_speed_is_never_negative() {
        let mut noise = TelemetryNoise::from_params(&seeded_params(), 7);

        for _ in 0..1000 {
            let speed = noise.jitter_speed(Kmh::new(1.0));
            assert!(speed.value() >= 0.0);
            assert!(speed.value() <= 4.0);
        }
    }

    #[test]
    fn test_same_seed_and_stream_is_reproducible() {
        let params = seeded_params();
        let mut first = TelemetryNoise::from_params(&params, 3);
        let mut second = TelemetryNoise::from_params(&params, 3);
        let position = Coordinate::from_lat_lon(20.0, 99.9);

        for _ in 0..10 {
            assert_eq!(first.jitter_position(position), second.jitter_position(position));
            assert_eq!(first.jitter_speed(Kmh::new(30.0)), second.jitter_speed(Kmh::new(30.0)));
        }
    }

    #[test]
    fn test_zero_amplitude_is_exact() {
        let params = SimulationParams {
            position_noise: 0.0,
            speed_jitter: 0.0,
            ..SimulationParams::default()
        };
        let mut noise = TelemetryNoise::from_params(&params, 0);
        let position = Coordinate::from_lat_lon(20.0, 99.9);

        assert_eq!(noise.jitter_position(position), position);
        assert_eq!(noise.jitter_speed(Kmh::new(28.0)), Kmh::new(28.0));
    }
}
