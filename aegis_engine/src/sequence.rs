//! Aegis Engine v1: Deterministic Sequence Generator
//!
//! Park-Miller minimal standard LCG. The recurrence and the way the seed
//! is derived from location and temperature are part of the scoring
//! contract: identical telemetry always replays the same jitter stream.

/// LCG multiplier (7^5).
pub const LCG_MULTIPLIER: u64 = 16_807;

/// LCG modulus (2^31 - 1).
pub const LCG_MODULUS: u64 = 2_147_483_647;

/// Derive the scoring seed: `floor(lat * 1000 + lon * 100 + temp * 10)`.
pub fn derive_seed(lat: f64, lon: f64, temp: f64) -> i64 {
    (lat * 1000.0 + lon * 100.0 + temp * 10.0).floor() as i64
}

/// Reproducible stream of values uniformly distributed in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededSequence {
    state: u64,
}

impl SeededSequence {
    /// Seed the stream. The seed is reduced modulo `LCG_MODULUS`
    /// (Euclidean, so negative seeds stay in range) and a zero state is
    /// lifted to 1, since zero is a fixed point of the recurrence.
    pub fn new(seed: i64) -> Self {
        let reduced = seed.rem_euclid(LCG_MODULUS as i64) as u64;
        Self {
            state: if reduced == 0 { 1 } else { reduced },
        }
    }

    /// Seed from a geographic position and the current temperature.
    pub fn from_location(lat: f64, lon: f64, temp: f64) -> Self {
        Self::new(derive_seed(lat, lon, temp))
    }

    /// Advance the recurrence and return `(state - 1) / (LCG_MODULUS - 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = self.state * LCG_MULTIPLIER % LCG_MODULUS;
        (self.state - 1) as f64 / (LCG_MODULUS - 1) as f64
    }

    /// Symmetric perturbation in `[-range / 2, range / 2)`.
    pub fn jitter(&mut self, range: f64) -> f64 {
        (self.next_unit() - 0.5) * range
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}

impl Iterator for SeededSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}
