//! Conversion between salaried and self-employed figures.
//!
//! A self-employed contract carries none of the mandatory salaried
//! benefits (extra monthly salary, paid-leave premium, savings-fund
//! deposits), so the same work needs a higher nominal figure.  The
//! conversion is a single configurable factor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceConverter {
    factor: f64,
}

impl EquivalenceConverter {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Self-employed figure worth the same as `salaried_gross`.
    pub fn to_self_employed(&self, salaried_gross: f64) -> f64 {
        salaried_gross * self.factor
    }

    /// Salaried figure worth the same as `self_employed_value`.
    pub fn to_salaried(&self, self_employed_value: f64) -> f64 {
        self_employed_value / self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn applies_factor() {
        let converter = EquivalenceConverter::new(1.35);
        assert!((converter.to_self_employed(10_000.0) - 13_500.0).abs() < 1e-9);
        assert!((converter.to_salaried(13_500.0) - 10_000.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn round_trip_is_stable(value in 0.0f64..1_000_000.0, factor in 1.0f64..2.0) {
            let converter = EquivalenceConverter::new(factor);
            let back = converter.to_salaried(converter.to_self_employed(value));
            prop_assert!((back - value).abs() <= 1e-9 * value.max(1.0));
        }
    }
}
