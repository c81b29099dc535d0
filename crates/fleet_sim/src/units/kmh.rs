use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Kmh(f64);

impl Kmh {
    pub const ZERO: Kmh = Kmh(0.0);

    pub const fn new(value: f64) -> Self {
        Kmh(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Kmh {
    fn from(value: f64) -> Self {
        Kmh::new(value)
    }
}

impl Display for Kmh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} km/h", self.0)
    }
}
