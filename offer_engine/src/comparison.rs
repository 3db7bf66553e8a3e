//! Salaried vs self-employed comparison at a given figure.
//!
//! The salaried side is taxed as-is; the self-employed side is first
//! converted with the [`EquivalenceConverter`] so both describe the same
//! work.  Annual totals include the salaried-only benefits.

use crate::config::{AnnualSettings, EngineConfig};
use crate::equivalence::EquivalenceConverter;
use crate::error::Result;
use crate::tax::{SelfEmployedBreakdown, TaxBreakdown, TaxEngine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalariedAnnual {
    pub breakdown: TaxBreakdown,
    /// Net salary times the yearly payments, extra month included.
    pub net_salaries: f64,
    pub paid_leave_premium: f64,
    pub savings_fund: f64,
    pub annual_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfEmployedAnnual {
    pub breakdown: SelfEmployedBreakdown,
    pub annual_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub salaried: SalariedAnnual,
    pub self_employed: SelfEmployedAnnual,
    pub equivalence_factor: f64,
    /// Self-employed net minus salaried net, per month.
    pub monthly_net_difference: f64,
    /// Self-employed annual total minus salaried annual total.
    pub annual_difference: f64,
}

pub struct RegimeComparator<'a> {
    taxes: &'a TaxEngine,
    converter: EquivalenceConverter,
    annual: &'a AnnualSettings,
}

impl<'a> RegimeComparator<'a> {
    pub fn new(taxes: &'a TaxEngine, config: &'a EngineConfig) -> Self {
        Self {
            taxes,
            converter: EquivalenceConverter::new(config.equivalence_factor),
            annual: &config.annual,
        }
    }

    /// Compares `salaried_gross` with its self-employed equivalent.
    pub fn compare(&self, salaried_gross: f64) -> Result<RegimeComparison> {
        let salaried = self.taxes.salaried(salaried_gross)?;
        let self_employed = self
            .taxes
            .self_employed(self.converter.to_self_employed(salaried_gross))?;

        let net_salaries = salaried.net * self.annual.salaried_payments_per_year;
        let paid_leave_premium = salaried_gross * self.annual.paid_leave_premium;
        let savings_fund = salaried_gross * self.annual.savings_fund_rate * 12.0;
        let salaried = SalariedAnnual {
            breakdown: salaried,
            net_salaries,
            paid_leave_premium,
            savings_fund,
            annual_total: net_salaries + paid_leave_premium + savings_fund,
        };
        let self_employed = SelfEmployedAnnual {
            breakdown: self_employed,
            annual_total: self_employed.net_income * self.annual.self_employed_payments_per_year,
        };

        Ok(RegimeComparison {
            monthly_net_difference: self_employed.breakdown.net_income - salaried.breakdown.net,
            annual_difference: self_employed.annual_total - salaried.annual_total,
            equivalence_factor: self.converter.factor(),
            salaried,
            self_employed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_equivalent_figures() {
        let config = EngineConfig::default();
        let taxes = TaxEngine::from_config(&config);
        let comparison = RegimeComparator::new(&taxes, &config).compare(5000.0).unwrap();

        assert_eq!(comparison.salaried.breakdown.gross, 5000.0);
        assert!((comparison.self_employed.breakdown.total_monthly_value - 6750.0).abs() < 1e-9);
        assert!((comparison.salaried.paid_leave_premium - 5000.0 / 3.0).abs() < 1e-9);
        assert!((comparison.salaried.savings_fund - 4800.0).abs() < 1e-9);
        let expected_salaried = comparison.salaried.breakdown.net * 13.0 + 5000.0 / 3.0 + 4800.0;
        assert!((comparison.salaried.annual_total - expected_salaried).abs() < 1e-6);
        assert!(
            (comparison.self_employed.annual_total
                - comparison.self_employed.breakdown.net_income * 12.0)
                .abs()
                < 1e-6
        );
        assert!(
            (comparison.monthly_net_difference
                - (comparison.self_employed.breakdown.net_income - comparison.salaried.breakdown.net))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn rejects_negative_figures() {
        let config = EngineConfig::default();
        let taxes = TaxEngine::from_config(&config);
        assert!(RegimeComparator::new(&taxes, &config).compare(-1.0).is_err());
    }
}
