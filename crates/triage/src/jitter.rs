//! [`JitterSource`] implementations.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::JitterSource;

/// `rand`-backed jitter. Seeded for reproducible runs, entropy-seeded otherwise.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl JitterSource for SeededJitter {
    fn next_unit(&self) -> f64 {
        // Poisoning leaves the generator state intact.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen::<f64>()
    }
}

/// Always returns the same value, clamped into `[0.0, 1.0)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(f64);

impl FixedJitter {
    pub fn new(value: f64) -> Self {
        let v = if value.is_nan() { 0.0 } else { value };
        Self(v.clamp(0.0, 1.0 - f64::EPSILON))
    }

    /// Jitter that always contributes nothing.
    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl JitterSource for FixedJitter {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_jitter_is_reproducible_and_in_range() {
        let a = SeededJitter::from_seed(42);
        let b = SeededJitter::from_seed(42);
        for _ in 0..100 {
            let x = a.next_unit();
            assert_eq!(x, b.next_unit());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn fixed_jitter_stays_below_one() {
        assert!(FixedJitter::new(1.0).next_unit() < 1.0);
        assert_eq!(FixedJitter::new(-2.0).next_unit(), 0.0);
        assert_eq!(FixedJitter::new(0.25).next_unit(), 0.25);
    }
}
