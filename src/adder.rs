//! Compensated summation.
//!
//! Polygon area and arc length integrals add thousands of small angular
//! deltas whose total is tiny relative to the rounding error a naive running
//! sum accumulates. [`Adder`] carries a Neumaier correction term so the error
//! stays on the order of machine epsilon regardless of term count or order.

use std::ops::AddAssign;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Adder {
    sum: f64,
    correction: f64,
}

impl Adder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) -> &mut Self {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.correction += (self.sum - t) + value;
        } else {
            self.correction += (value - t) + self.sum;
        }
        self.sum = t;
        self
    }

    /// The compensated total.
    pub fn value(&self) -> f64 {
        self.sum + self.correction
    }
}

impl AddAssign<f64> for Adder {
    fn add_assign(&mut self, value: f64) {
        self.add(value);
    }
}

impl From<Adder> for f64 {
    fn from(adder: Adder) -> f64 {
        adder.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_small_term_survives_large_sum() {
        let mut adder = Adder::new();
        for _ in 0..10_000_000 {
            adder.add(1.0);
        }
        adder.add(1e-10);
        adder.add(-10_000_000.0);
        assert_relative_eq!(adder.value(), 1e-10, epsilon = 1e-20);

        // A plain running sum drops the small term entirely.
        let mut naive = 0.0_f64;
        for _ in 0..10_000_000 {
            naive += 1.0;
        }
        naive += 1e-10;
        naive -= 10_000_000.0;
        assert_eq!(naive, 0.0);
    }

    #[test]
    fn test_order_independent() {
        let mut forward = Adder::new();
        forward.add(1e-10).add(1e16).add(1.0).add(-1e16);
        assert_relative_eq!(forward.value(), 1.0 + 1e-10, epsilon = 1e-15);
    }

    #[test]
    fn test_add_assign() {
        let mut adder = Adder::default();
        adder += 0.1;
        adder += 0.2;
        assert_relative_eq!(f64::from(adder), 0.3, epsilon = 1e-17);
    }
}
