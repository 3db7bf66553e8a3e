//! Advice on an amount the company actually proposed.

use crate::compensation::CompensationRange;
use crate::config::NegotiationSettings;
use crate::error::{ensure_amount, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NegotiationAdvice {
    /// Below the minimum acceptable figure; counter with the minimum.
    BelowMinimum { offered: f64, counter_offer: f64 },
    /// Acceptable but short of the ideal.
    WithinRange { offered: f64, counter_offer: f64 },
    /// At or above the ideal.
    Accept { offered: f64 },
}

impl NegotiationAdvice {
    pub fn counter_offer(&self) -> Option<f64> {
        match self {
            NegotiationAdvice::BelowMinimum { counter_offer, .. }
            | NegotiationAdvice::WithinRange { counter_offer, .. } => Some(*counter_offer),
            NegotiationAdvice::Accept { .. } => None,
        }
    }
}

pub fn advise(
    range: &CompensationRange,
    offered: f64,
    settings: &NegotiationSettings,
) -> Result<NegotiationAdvice> {
    ensure_amount("received_offer", offered)?;
    let advice = if offered < range.minimum() {
        NegotiationAdvice::BelowMinimum {
            offered,
            counter_offer: range.minimum(),
        }
    } else if offered < range.ideal() {
        NegotiationAdvice::WithinRange {
            offered,
            counter_offer: (offered * settings.counter_offer_markup).max(range.ideal()),
        }
    } else {
        NegotiationAdvice::Accept { offered }
    };
    Ok(advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> CompensationRange {
        CompensationRange::new(8000.0, 12_000.0, 15_000.0)
    }

    #[test]
    fn below_minimum_counters_with_minimum() {
        let advice = advise(&range(), 7000.0, &NegotiationSettings::default()).unwrap();
        assert_eq!(
            advice,
            NegotiationAdvice::BelowMinimum {
                offered: 7000.0,
                counter_offer: 8000.0
            }
        );
    }

    #[test]
    fn within_range_counters_with_markup_or_ideal() {
        let settings = NegotiationSettings::default();
        let low = advise(&range(), 9000.0, &settings).unwrap();
        assert_eq!(low.counter_offer(), Some(12_000.0));
        let high = advise(&range(), 11_000.0, &settings).unwrap();
        assert!((high.counter_offer().unwrap() - 12_650.0).abs() < 1e-6);
    }

    #[test]
    fn ideal_or_better_is_accepted() {
        let advice = advise(&range(), 12_000.0, &NegotiationSettings::default()).unwrap();
        assert_eq!(advice, NegotiationAdvice::Accept { offered: 12_000.0 });
        assert_eq!(advice.counter_offer(), None);
    }

    #[test]
    fn negative_offer_is_rejected() {
        assert!(advise(&range(), -5.0, &NegotiationSettings::default()).is_err());
    }
}
