use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Div},
};

use jiff::SignedDuration;

use super::kmh::Kmh;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Kilometers(f64);

impl Kilometers {
    pub const ZERO: Kilometers = Kilometers(0.0);

    pub const fn new(value: f64) -> Self {
        Kilometers(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Kilometers {
    fn from(value: f64) -> Self {
        Kilometers::new(value)
    }
}

impl Add for Kilometers {
    type Output = Kilometers;

    fn add(self, other: Kilometers) -> Kilometers {
        Kilometers(self.0 + other.0)
    }
}

impl AddAssign for Kilometers {
    fn add_assign(&mut self, other: Kilometers) {
        self.0 += other.0;
    }
}

/// Time needed to cover the distance at a constant speed, saturating at
/// `SignedDuration::MAX`.
impl Div<Kmh> for Kilometers {
    type Output = SignedDuration;

    fn div(self, speed: Kmh) -> SignedDuration {
        let seconds = self.0 * 3600.0 / speed.value();
        SignedDuration::try_from_secs_f64(seconds).unwrap_or(SignedDuration::MAX)
    }
}

impl Sum for Kilometers {
    fn sum<I: Iterator<Item = Kilometers>>(iter: I) -> Kilometers {
        iter.fold(Kilometers::ZERO, |acc, x| acc + x)
    }
}

impl Display for Kilometers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} km", self.0)
    }
}
