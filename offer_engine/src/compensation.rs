//! Negotiation range: minimum acceptable, ideal and maximum figures.
//!
//! The minimum starts from today's total monthly compensation, adjusts it
//! for the cost of living at the new location, credits (or charges) the
//! commute time gained (or lost) at a fixed hourly value and spreads the
//! annual bonus over the months.  It never drops below today's total.
//! The ideal applies a multiplier driven by the offer's qualitative
//! scores, nudged once by the values compatibility, and the maximum adds a
//! stretch on top of the ideal.

use crate::compatibility::CompatibilityResult;
use crate::config::{EngineConfig, HourlySettings, RangeSettings};
use crate::models::{CurrentSituation, OfferParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum, ideal and maximum monthly figures.
///
/// The constructor guarantees `minimum <= ideal <= maximum_negotiation`,
/// and deserialisation goes through the same constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RangeFields")]
pub struct CompensationRange {
    minimum: f64,
    ideal: f64,
    maximum_negotiation: f64,
}

#[derive(Deserialize)]
struct RangeFields {
    minimum: f64,
    ideal: f64,
    maximum_negotiation: f64,
}

impl From<RangeFields> for CompensationRange {
    fn from(fields: RangeFields) -> Self {
        CompensationRange::new(fields.minimum, fields.ideal, fields.maximum_negotiation)
    }
}

impl CompensationRange {
    /// Builds a range, raising `ideal` and `maximum_negotiation` where
    /// needed so the ordering holds.
    pub fn new(minimum: f64, ideal: f64, maximum_negotiation: f64) -> Self {
        let ideal = ideal.max(minimum);
        let maximum_negotiation = maximum_negotiation.max(ideal);
        Self {
            minimum,
            ideal,
            maximum_negotiation,
        }
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn ideal(&self) -> f64 {
        self.ideal
    }

    pub fn maximum_negotiation(&self) -> f64 {
        self.maximum_negotiation
    }
}

/// Every intermediate figure of the minimum computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumBreakdown {
    pub current_total_monthly: f64,
    pub cost_of_living_adjusted: f64,
    /// Negative when the new commute is longer.
    pub monthly_hours_saved: f64,
    pub time_value_adjustment: f64,
    pub bonus_monthly_equivalent: f64,
    pub minimum: f64,
}

#[derive(Debug, Clone)]
pub struct CompensationRangeCalculator {
    range: RangeSettings,
    hourly: HourlySettings,
}

impl CompensationRangeCalculator {
    pub fn new(range: RangeSettings, hourly: HourlySettings) -> Self {
        Self { range, hourly }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.range.clone(), config.hourly.clone())
    }

    pub fn minimum_breakdown(
        &self,
        current: &CurrentSituation,
        offer: &OfferParameters,
    ) -> MinimumBreakdown {
        let current_total_monthly = current.total_monthly();
        let cost_of_living_adjusted = current_total_monthly * (1.0 + offer.cost_of_living_ratio());
        let monthly_hours_saved = (current.daily_commute_hours - offer.new_daily_commute_hours)
            * 2.0
            * f64::from(offer.days_on_site_per_week)
            * self.range.weeks_per_month;
        let time_value_adjustment = monthly_hours_saved * self.range.free_time_hourly_rate;
        let bonus_monthly_equivalent = current.annual_bonus / 12.0;
        let minimum = (cost_of_living_adjusted + time_value_adjustment + bonus_monthly_equivalent)
            .max(current_total_monthly);

        MinimumBreakdown {
            current_total_monthly,
            cost_of_living_adjusted,
            monthly_hours_saved,
            time_value_adjustment,
            bonus_monthly_equivalent,
            minimum,
        }
    }

    /// Lowest monthly total worth accepting; never below today's total.
    pub fn minimum(&self, current: &CurrentSituation, offer: &OfferParameters) -> f64 {
        self.minimum_breakdown(current, offer).minimum
    }

    /// Target figure to ask for.
    pub fn ideal(
        &self,
        offer: &OfferParameters,
        minimum: f64,
        compatibility: Option<&CompatibilityResult>,
    ) -> f64 {
        let settings = &self.range;
        let multiplier = settings.base_multiplier
            + f64::from(offer.growth) * settings.growth_weight
            + f64::from(offer.stability) * settings.stability_weight
            + f64::from(offer.benefits_quality) * settings.benefits_weight;
        let mut ideal = minimum * multiplier;

        if let Some(result) = compatibility {
            if result.overall_score > settings.high_compatibility {
                ideal *= settings.high_compatibility_factor;
            } else if result.overall_score < settings.low_compatibility {
                ideal *= settings.low_compatibility_factor;
            }
        }
        ideal
    }

    pub fn range(
        &self,
        current: &CurrentSituation,
        offer: &OfferParameters,
        compatibility: Option<&CompatibilityResult>,
    ) -> CompensationRange {
        self.range_from_minimum(offer, self.minimum(current, offer), compatibility)
    }

    /// Builds the range around an already computed minimum.
    pub fn range_from_minimum(
        &self,
        offer: &OfferParameters,
        minimum: f64,
        compatibility: Option<&CompatibilityResult>,
    ) -> CompensationRange {
        let ideal = self.ideal(offer, minimum, compatibility);
        let maximum = ideal * self.range.stretch_factor;
        debug!(minimum, ideal, maximum, "computed compensation range");
        CompensationRange::new(minimum, ideal, maximum)
    }

    /// Current compensation per hour spent working or commuting.
    pub fn hourly_value(&self, current: &CurrentSituation) -> f64 {
        let commute_hours =
            current.daily_commute_hours.max(0.0) * 2.0 * self.hourly.workdays_per_month;
        let hours = self.hourly.standard_monthly_work_hours + commute_hours;
        if hours <= 0.0 {
            return 0.0;
        }
        current.total_monthly() / hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoScenario;
    use crate::models::EmploymentClassification;
    use proptest::prelude::*;

    fn calculator() -> CompensationRangeCalculator {
        CompensationRangeCalculator::from_config(&EngineConfig::default())
    }

    fn compatibility(score: f64) -> CompatibilityResult {
        CompatibilityResult {
            overall_score: score,
            ..CompatibilityResult::neutral()
        }
    }

    #[test]
    fn reference_scenario_minimum() {
        let demo = DemoScenario::default();
        let b = calculator().minimum_breakdown(&demo.current, &demo.offer);
        assert_eq!(b.current_total_monthly, 6000.0);
        assert!((b.cost_of_living_adjusted - 6600.0).abs() < 1e-6);
        assert!((b.monthly_hours_saved - 25.98).abs() < 1e-9);
        assert!((b.time_value_adjustment - 779.4).abs() < 1e-6);
        assert!((b.bonus_monthly_equivalent - 416.666_666).abs() < 1e-5);
        assert!((b.minimum - 7796.066_666).abs() < 1e-5);
        assert!(b.minimum >= 6000.0);
    }

    #[test]
    fn minimum_never_drops_below_current_total() {
        let demo = DemoScenario::default();
        let mut offer = demo.offer.clone();
        offer.cost_of_living_delta_pct = -50.0;
        offer.new_daily_commute_hours = 4.0;
        offer.days_on_site_per_week = 5;
        let mut current = demo.current.clone();
        current.annual_bonus = 0.0;
        assert_eq!(calculator().minimum(&current, &offer), current.total_monthly());
    }

    #[test]
    fn ideal_applies_score_multiplier_and_compatibility_once() {
        let offer = DemoScenario::default().offer;
        let calc = calculator();
        // 1.3 + 7*0.02 + 6*0.015 + 7*0.015
        let base = calc.ideal(&offer, 10_000.0, None);
        assert!((base - 16_350.0).abs() < 1e-6);
        assert!((calc.ideal(&offer, 10_000.0, Some(&compatibility(66.0))) - base).abs() < 1e-9);
        assert!((calc.ideal(&offer, 10_000.0, Some(&compatibility(80.5))) - base * 0.95).abs() < 1e-6);
        assert!((calc.ideal(&offer, 10_000.0, Some(&compatibility(80.0))) - base).abs() < 1e-9);
        assert!((calc.ideal(&offer, 10_000.0, Some(&compatibility(49.9))) - base * 1.10).abs() < 1e-6);
    }

    #[test]
    fn range_stretches_ideal() {
        let demo = DemoScenario::default();
        let range = calculator().range(&demo.current, &demo.offer, None);
        assert!((range.ideal() - range.minimum() * 1.635).abs() < 1e-6);
        assert!((range.maximum_negotiation() - range.ideal() * 1.25).abs() < 1e-6);
    }

    #[test]
    fn constructor_enforces_ordering() {
        let range = CompensationRange::new(100.0, 90.0, 50.0);
        assert_eq!(range.minimum(), 100.0);
        assert_eq!(range.ideal(), 100.0);
        assert_eq!(range.maximum_negotiation(), 100.0);

        let parsed: CompensationRange =
            serde_json::from_str(r#"{"minimum": 10, "ideal": 5, "maximum_negotiation": 1}"#).unwrap();
        assert_eq!(parsed.ideal(), 10.0);
    }

    #[test]
    fn hourly_value_counts_commute() {
        let current = DemoScenario::default().current;
        let value = calculator().hourly_value(&current);
        assert!((value - 6000.0 / 286.0).abs() < 1e-9);

        let mut remote = current.clone();
        remote.daily_commute_hours = -1.0;
        assert!((calculator().hourly_value(&remote) - 6000.0 / 220.0).abs() < 1e-9);
    }

    #[test]
    fn hourly_value_guards_zero_hours() {
        let calc = CompensationRangeCalculator::new(
            RangeSettings::default(),
            HourlySettings {
                standard_monthly_work_hours: 0.0,
                workdays_per_month: 22.0,
            },
        );
        let mut current = DemoScenario::default().current;
        current.daily_commute_hours = 0.0;
        assert_eq!(calc.hourly_value(&current), 0.0);
    }

    proptest! {
        #[test]
        fn range_is_ordered(
            gross in 0.0f64..50_000.0,
            benefits in 0.0f64..5_000.0,
            bonus in 0.0f64..100_000.0,
            commute in 0.0f64..4.0,
            col in -50.0f64..=100.0,
            days in 0u8..=5,
            new_commute in 0.0f64..=4.0,
            scores in (1u8..=10, 1u8..=10, 1u8..=10),
            overall in proptest::option::of(0.0f64..=100.0),
        ) {
            let current = CurrentSituation {
                gross_monthly_salary: gross,
                monthly_benefits_total: benefits,
                benefits_breakdown: None,
                annual_bonus: bonus,
                vacation_days: 30,
                daily_commute_hours: commute,
            };
            let offer = OfferParameters {
                cost_of_living_delta_pct: col,
                days_on_site_per_week: days,
                new_daily_commute_hours: new_commute,
                monthly_transport_cost: 0.0,
                growth: scores.0,
                stability: scores.1,
                benefits_quality: scores.2,
                culture: 5,
                innovation: 5,
                employment_classification: EmploymentClassification::Salaried,
            };
            let compat = overall.map(compatibility);
            let range = calculator().range(&current, &offer, compat.as_ref());
            prop_assert!(range.minimum() >= current.total_monthly());
            prop_assert!(range.minimum() <= range.ideal());
            prop_assert!(range.ideal() <= range.maximum_negotiation());
        }
    }
}
