//! Tax calculation for the two employment regimes.
//!
//! The `tax` module turns a gross monthly figure into a net figure under
//! either regime.  Salaried income pays a social-security style deduction
//! on progressive brackets followed by withheld income tax; self-employed
//! income is split into a labor portion, taxed like a salary, and a
//! corporate revenue portion taxed at a flat rate picked from an annual
//! revenue tier table.  The tables are plain data (see [`TaxTables`]) so
//! they can be loaded from the engine configuration.

use crate::config::{EngineConfig, SelfEmployedSettings};
use crate::error::{ensure_amount, ensure_range, EngineError, Result};
use crate::models::EmploymentClassification;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A slice of income taxed at its own marginal rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginalBracket {
    /// Upper bound of the slice (inclusive).
    pub ceiling: f64,
    pub rate: f64,
}

/// Progressive social-security deduction with a fixed cap once gross
/// exceeds the top bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSecuritySchedule {
    pub brackets: Vec<MarginalBracket>,
    /// Deduction applied to any gross above the last bracket ceiling.
    pub cap: f64,
}

impl SocialSecuritySchedule {
    pub fn deduction(&self, gross: f64) -> f64 {
        let top = self.brackets.last().map_or(0.0, |b| b.ceiling);
        if gross > top {
            return self.cap;
        }
        let mut floor = 0.0;
        let mut total = 0.0;
        for bracket in &self.brackets {
            if gross <= floor {
                break;
            }
            total += (gross.min(bracket.ceiling) - floor) * bracket.rate;
            floor = bracket.ceiling;
        }
        total
    }
}

/// One row of the withholding table, expressed as `rate * base - subtraction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// Upper bound of the taxable base for this row; `None` for the open
    /// top row.
    pub ceiling: Option<f64>,
    pub rate: f64,
    pub subtraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxSchedule {
    pub brackets: Vec<WithholdingBracket>,
}

impl IncomeTaxSchedule {
    /// Tax withheld on `base`, never negative.
    pub fn withheld(&self, base: f64) -> f64 {
        let bracket = self
            .brackets
            .iter()
            .find(|b| b.ceiling.map_or(true, |ceiling| base <= ceiling))
            .or_else(|| self.brackets.last());
        match bracket {
            Some(b) => (base * b.rate - b.subtraction).max(0.0),
            None => 0.0,
        }
    }
}

/// Flat rate for corporate revenue up to an annual ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueTier {
    pub annual_ceiling: f64,
    pub rate: f64,
}

/// All tables used by [`TaxEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTables {
    pub social_security: SocialSecuritySchedule,
    pub income_tax: IncomeTaxSchedule,
    /// Ordered ascending by `annual_ceiling`.
    pub revenue_tiers: Vec<RevenueTier>,
    /// Rate used when annual revenue exceeds every tier.
    pub revenue_top_rate: f64,
}

impl Default for TaxTables {
    fn default() -> Self {
        let marginal = |ceiling, rate| MarginalBracket { ceiling, rate };
        let withholding = |ceiling, rate, subtraction| WithholdingBracket {
            ceiling,
            rate,
            subtraction,
        };
        let tier = |annual_ceiling, rate| RevenueTier {
            annual_ceiling,
            rate,
        };
        TaxTables {
            social_security: SocialSecuritySchedule {
                brackets: vec![
                    marginal(1412.00, 0.075),
                    marginal(2666.68, 0.09),
                    marginal(4000.03, 0.12),
                    marginal(7786.02, 0.14),
                ],
                cap: 908.85,
            },
            income_tax: IncomeTaxSchedule {
                brackets: vec![
                    withholding(Some(2259.20), 0.0, 0.0),
                    withholding(Some(2826.65), 0.075, 169.44),
                    withholding(Some(3751.05), 0.15, 381.44),
                    withholding(Some(4664.68), 0.225, 662.77),
                    withholding(None, 0.275, 896.00),
                ],
            },
            revenue_tiers: vec![
                tier(180_000.0, 0.06),
                tier(360_000.0, 0.112),
                tier(720_000.0, 0.135),
                tier(1_800_000.0, 0.16),
                tier(3_600_000.0, 0.21),
            ],
            revenue_top_rate: 0.33,
        }
    }
}

fn ensure_rate(field: &'static str, rate: f64) -> Result<()> {
    ensure_range(field, rate, 0.0, 1.0)
}

fn ensure_ascending(field: &'static str, ceilings: impl IntoIterator<Item = f64>) -> Result<()> {
    let mut previous = 0.0;
    let mut seen = false;
    for ceiling in ceilings {
        if !ceiling.is_finite() || ceiling <= previous {
            return Err(EngineError::invalid(
                field,
                format!("ceilings must be positive and strictly ascending (got {ceiling} after {previous})"),
            ));
        }
        previous = ceiling;
        seen = true;
    }
    if !seen {
        return Err(EngineError::invalid(field, "table must not be empty"));
    }
    Ok(())
}

impl TaxTables {
    /// Checks the ordering and rate bounds the calculations rely on.
    pub fn validate(&self) -> Result<()> {
        let social = &self.social_security;
        ensure_ascending(
            "tax.social_security.brackets",
            social.brackets.iter().map(|b| b.ceiling),
        )?;
        for bracket in &social.brackets {
            ensure_rate("tax.social_security.brackets.rate", bracket.rate)?;
        }
        ensure_amount("tax.social_security.cap", social.cap)?;

        let withholding = &self.income_tax.brackets;
        // only the last row may leave its ceiling open
        let (open, bounded) = withholding.split_last().ok_or_else(|| {
            EngineError::invalid("tax.income_tax.brackets", "table must not be empty")
        })?;
        let mut ceilings = Vec::with_capacity(withholding.len());
        for bracket in bounded {
            match bracket.ceiling {
                Some(ceiling) => ceilings.push(ceiling),
                None => {
                    return Err(EngineError::invalid(
                        "tax.income_tax.brackets",
                        "only the last row may have an open ceiling",
                    ))
                }
            }
        }
        ceilings.extend(open.ceiling);
        if !ceilings.is_empty() {
            ensure_ascending("tax.income_tax.brackets", ceilings)?;
        }
        for bracket in withholding {
            ensure_rate("tax.income_tax.brackets.rate", bracket.rate)?;
            ensure_amount("tax.income_tax.brackets.subtraction", bracket.subtraction)?;
        }

        ensure_ascending(
            "tax.revenue_tiers",
            self.revenue_tiers.iter().map(|tier| tier.annual_ceiling),
        )?;
        for tier in &self.revenue_tiers {
            ensure_rate("tax.revenue_tiers.rate", tier.rate)?;
        }
        ensure_rate("tax.revenue_top_rate", self.revenue_top_rate)
    }

    /// Flat rate for the given annual revenue.
    pub fn revenue_rate(&self, annual_revenue: f64) -> f64 {
        self.revenue_tiers
            .iter()
            .find(|tier| tier.annual_ceiling >= annual_revenue)
            .map_or(self.revenue_top_rate, |tier| tier.rate)
    }
}

/// Salaried deductions for one gross figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gross: f64,
    /// Social-security style deduction.
    pub regime_deduction: f64,
    pub income_tax_withheld: f64,
    pub net: f64,
    pub total_deductions: f64,
    /// Percentage of gross lost to deductions.
    pub effective_rate: f64,
}

impl TaxBreakdown {
    /// Neutral breakdown for callers that prefer to render zeros instead of
    /// an error.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Self-employed deductions for one total monthly value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfEmployedBreakdown {
    pub total_monthly_value: f64,
    /// Portion paid out as labor compensation and taxed like a salary.
    pub labor_portion: f64,
    pub revenue_portion: f64,
    pub labor_tax: TaxBreakdown,
    pub revenue_tax: f64,
    pub revenue_rate: f64,
    pub accounting_fee: f64,
    pub administrative_fee: f64,
    pub total_deductions: f64,
    pub net_income: f64,
    pub effective_rate: f64,
}

/// Regime-agnostic view of a tax computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeSummary {
    pub regime: EmploymentClassification,
    pub gross: f64,
    pub total_deductions: f64,
    pub net: f64,
    pub effective_rate: f64,
}

fn effective_rate(deductions: f64, gross: f64) -> f64 {
    if gross == 0.0 {
        0.0
    } else {
        deductions / gross * 100.0
    }
}

/// Computes net income under both regimes.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    tables: TaxTables,
    self_employed: SelfEmployedSettings,
}

impl TaxEngine {
    pub fn new(tables: TaxTables, self_employed: SelfEmployedSettings) -> Self {
        Self {
            tables,
            self_employed,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.tax.clone(), config.self_employed.clone())
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Deductions for a salaried gross monthly income.
    pub fn salaried(&self, gross: f64) -> Result<TaxBreakdown> {
        ensure_amount("gross", gross)?;
        if gross == 0.0 {
            return Ok(TaxBreakdown::zeroed());
        }
        let regime_deduction = self.tables.social_security.deduction(gross);
        let income_tax_withheld = self.tables.income_tax.withheld(gross - regime_deduction);
        let total_deductions = regime_deduction + income_tax_withheld;
        let breakdown = TaxBreakdown {
            gross,
            regime_deduction,
            income_tax_withheld,
            net: gross - total_deductions,
            total_deductions,
            effective_rate: effective_rate(total_deductions, gross),
        };
        debug!(gross, net = breakdown.net, "computed salaried tax");
        Ok(breakdown)
    }

    /// Deductions for a self-employed total monthly value.
    pub fn self_employed(&self, total_monthly_value: f64) -> Result<SelfEmployedBreakdown> {
        ensure_amount("total_monthly_value", total_monthly_value)?;
        if total_monthly_value == 0.0 {
            return Ok(SelfEmployedBreakdown::default());
        }
        let settings = &self.self_employed;
        let labor_portion = total_monthly_value * settings.labor_share;
        let revenue_portion = total_monthly_value - labor_portion;
        let labor_tax = self.salaried(labor_portion)?;

        let revenue_rate = self.tables.revenue_rate(revenue_portion * 12.0);
        let revenue_tax = revenue_portion * revenue_rate;

        let total_deductions = labor_tax.total_deductions
            + revenue_tax
            + settings.accounting_fee
            + settings.administrative_fee;
        let breakdown = SelfEmployedBreakdown {
            total_monthly_value,
            labor_portion,
            revenue_portion,
            labor_tax,
            revenue_tax,
            revenue_rate,
            accounting_fee: settings.accounting_fee,
            administrative_fee: settings.administrative_fee,
            total_deductions,
            net_income: total_monthly_value - total_deductions,
            effective_rate: effective_rate(total_deductions, total_monthly_value),
        };
        debug!(
            total_monthly_value,
            revenue_rate,
            net = breakdown.net_income,
            "computed self-employed tax"
        );
        Ok(breakdown)
    }

    /// Calculator for the given regime.
    pub fn calculator(&self, regime: EmploymentClassification) -> Box<dyn TaxCalculator + '_> {
        match regime {
            EmploymentClassification::Salaried => Box::new(SalariedCalculator(self)),
            EmploymentClassification::SelfEmployed => Box::new(SelfEmployedCalculator(self)),
        }
    }
}

/// A tax calculator reduces a gross figure to net income under one
/// employment regime.
///
/// Calculators must be thread-safe (`Send + Sync`) because batch
/// evaluations run concurrently across multiple threads.
pub trait TaxCalculator: Send + Sync {
    fn regime(&self) -> EmploymentClassification;
    fn summarize(&self, gross: f64) -> Result<RegimeSummary>;
}

pub struct SalariedCalculator<'a>(pub &'a TaxEngine);

impl TaxCalculator for SalariedCalculator<'_> {
    fn regime(&self) -> EmploymentClassification {
        EmploymentClassification::Salaried
    }

    fn summarize(&self, gross: f64) -> Result<RegimeSummary> {
        let b = self.0.salaried(gross)?;
        Ok(RegimeSummary {
            regime: self.regime(),
            gross: b.gross,
            total_deductions: b.total_deductions,
            net: b.net,
            effective_rate: b.effective_rate,
        })
    }
}

pub struct SelfEmployedCalculator<'a>(pub &'a TaxEngine);

impl TaxCalculator for SelfEmployedCalculator<'_> {
    fn regime(&self) -> EmploymentClassification {
        EmploymentClassification::SelfEmployed
    }

    fn summarize(&self, gross: f64) -> Result<RegimeSummary> {
        let b = self.0.self_employed(gross)?;
        Ok(RegimeSummary {
            regime: self.regime(),
            gross: b.total_monthly_value,
            total_deductions: b.total_deductions,
            net: b.net_income,
            effective_rate: b.effective_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;

    fn engine() -> TaxEngine {
        TaxEngine::from_config(&EngineConfig::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn zero_gross_yields_all_zeros() {
        let b = engine().salaried(0.0).unwrap();
        assert_eq!(b, TaxBreakdown::zeroed());
        assert_eq!(b.effective_rate, 0.0);
    }

    #[test]
    fn negative_gross_is_rejected() {
        let err = engine().salaried(-10.0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field: "gross", .. }));
        assert!(engine().self_employed(-1.0).is_err());
    }

    #[test]
    fn salaried_mid_bracket() {
        let b = engine().salaried(5000.0).unwrap();
        assert!(close(b.regime_deduction, 518.82), "{b:?}");
        assert!(close(b.income_tax_withheld, 345.50), "{b:?}");
        assert!(close(b.net, 4135.69), "{b:?}");
        assert!(close(b.effective_rate, 17.29), "{b:?}");
    }

    #[test]
    fn salaried_deduction_is_capped_above_top_bracket() {
        let b = engine().salaried(10_000.0).unwrap();
        assert_eq!(b.regime_deduction, 908.85);
        assert!(close(b.income_tax_withheld, 1604.07));
        let higher = engine().salaried(50_000.0).unwrap();
        assert_eq!(higher.regime_deduction, 908.85);
    }

    #[test]
    fn low_income_pays_no_income_tax() {
        let b = engine().salaried(1412.0).unwrap();
        assert!(close(b.regime_deduction, 105.90));
        assert_eq!(b.income_tax_withheld, 0.0);
        assert!(close(b.net, 1306.10));
    }

    #[test]
    fn self_employed_split_and_overheads() {
        let b = engine().self_employed(10_000.0).unwrap();
        assert!(close(b.labor_portion, 4000.0));
        assert!(close(b.revenue_portion, 6000.0));
        assert!(close(b.labor_tax.total_deductions, 540.56), "{b:?}");
        assert_eq!(b.revenue_rate, 0.06);
        assert!(close(b.revenue_tax, 360.0));
        assert_eq!(b.accounting_fee + b.administrative_fee, 380.0);
        assert!(close(b.net_income, 8719.44), "{b:?}");
    }

    #[test]
    fn revenue_tier_ceiling_is_inclusive() {
        let tables = TaxTables::default();
        assert_eq!(tables.revenue_rate(180_000.0), 0.06);
        assert_eq!(tables.revenue_rate(180_000.01), 0.112);
        assert_eq!(tables.revenue_rate(4_800_000.0), 0.33);
    }

    #[test]
    fn zero_total_self_employed_is_neutral() {
        let b = engine().self_employed(0.0).unwrap();
        assert_eq!(b.net_income, 0.0);
        assert_eq!(b.effective_rate, 0.0);
    }

    #[test]
    fn calculators_report_their_regime() {
        let engine = engine();
        let salaried = engine.calculator(EmploymentClassification::Salaried);
        let corporate = engine.calculator(EmploymentClassification::SelfEmployed);
        assert_eq!(salaried.regime(), EmploymentClassification::Salaried);
        assert!(close(salaried.summarize(5000.0).unwrap().net, 4135.69));
        assert!(close(corporate.summarize(10_000.0).unwrap().net, 8719.44));
    }

    proptest! {
        #[test]
        fn net_equals_gross_minus_deductions(gross in 0.0f64..100_000.0) {
            let b = engine().salaried(gross).unwrap();
            prop_assert!(b.regime_deduction >= 0.0);
            prop_assert!(b.income_tax_withheld >= 0.0);
            prop_assert_eq!(b.net, b.gross - b.total_deductions);
        }

        #[test]
        fn net_strictly_increases_with_gross(gross in 0.0f64..60_000.0, step in 0.01f64..5_000.0) {
            let engine = engine();
            let lower = engine.salaried(gross).unwrap();
            let upper = engine.salaried(gross + step).unwrap();
            prop_assert!(lower.net < upper.net, "{} -> {}: {} !< {}", gross, gross + step, lower.net, upper.net);
        }
    }
}
