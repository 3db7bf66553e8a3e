//! Offer evaluation pipeline.
//!
//! The `engine` module turns an [`EvaluationInput`] into an
//! [`Evaluation`]: values compatibility first (it feeds the ideal figure),
//! then the negotiation range, the regime comparison at the ideal figure,
//! the checklist and, when the company already named a figure,
//! negotiation advice.  Batch evaluations use the [`rayon`] crate to
//! evaluate several offers across CPU cores.

use crate::checklist::{self, ChecklistResult};
use crate::comparison::{RegimeComparator, RegimeComparison};
use crate::compatibility::{CompatibilityResult, ValuesCompatibilityScorer};
use crate::compensation::{CompensationRange, CompensationRangeCalculator, MinimumBreakdown};
use crate::config::EngineConfig;
use crate::equivalence::EquivalenceConverter;
use crate::error::Result;
use crate::models::{BatchInput, EmploymentClassification, EvaluationInput};
use crate::negotiation::{self, NegotiationAdvice};
use crate::tax::{RegimeSummary, TaxEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything the engine derives for one offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub employment_classification: EmploymentClassification,
    pub minimum_breakdown: MinimumBreakdown,
    pub range: CompensationRange,
    /// The ideal figure expressed as a self-employed amount.
    pub self_employed_equivalent: f64,
    /// Ideal over today's total monthly compensation, in percent.
    pub increase_over_current_pct: f64,
    /// Today's compensation per hour worked or commuted.
    pub hourly_value: f64,
    pub compatibility: CompatibilityResult,
    pub regime_comparison: RegimeComparison,
    /// Take-home pay at the ideal figure under the offer's own
    /// classification.
    pub offer_take_home: RegimeSummary,
    pub checklist: ChecklistResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation: Option<NegotiationAdvice>,
}

/// Stateless evaluator; every call recomputes from its input.
#[derive(Debug, Clone)]
pub struct OfferEngine {
    config: EngineConfig,
    taxes: TaxEngine,
    ranges: CompensationRangeCalculator,
    scorer: ValuesCompatibilityScorer,
    converter: EquivalenceConverter,
}

impl Default for OfferEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl OfferEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            taxes: TaxEngine::from_config(&config),
            ranges: CompensationRangeCalculator::from_config(&config),
            scorer: ValuesCompatibilityScorer::new(config.compatibility.clone()),
            converter: EquivalenceConverter::new(config.equivalence_factor),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn taxes(&self) -> &TaxEngine {
        &self.taxes
    }

    pub fn evaluate(&self, input: &EvaluationInput) -> Result<Evaluation> {
        input.validate()?;
        let EvaluationInput {
            current,
            offer,
            profile,
            received_offer,
        } = input;

        let compatibility = self.scorer.score(profile, offer);
        let minimum_breakdown = self.ranges.minimum_breakdown(current, offer);
        let range =
            self.ranges
                .range_from_minimum(offer, minimum_breakdown.minimum, Some(&compatibility));
        let ideal = range.ideal();

        let regime_comparison = RegimeComparator::new(&self.taxes, &self.config).compare(ideal)?;
        let self_employed_equivalent = self.converter.to_self_employed(ideal);
        let take_home_gross = match offer.employment_classification {
            EmploymentClassification::Salaried => ideal,
            EmploymentClassification::SelfEmployed => self_employed_equivalent,
        };
        let offer_take_home = self
            .taxes
            .calculator(offer.employment_classification)
            .summarize(take_home_gross)?;

        let current_total = current.total_monthly();
        let increase_over_current_pct = if current_total > 0.0 {
            (ideal - current_total) / current_total * 100.0
        } else {
            0.0
        };

        let checklist = checklist::evaluate(offer, profile, &compatibility);
        let negotiation = received_offer
            .map(|amount| negotiation::advise(&range, amount, &self.config.negotiation))
            .transpose()?;

        debug!(
            minimum = range.minimum(),
            ideal,
            compatibility = compatibility.overall_score,
            passed = checklist.pass_count,
            "evaluated offer"
        );

        Ok(Evaluation {
            employment_classification: offer.employment_classification,
            minimum_breakdown,
            range,
            self_employed_equivalent,
            increase_over_current_pct,
            hourly_value: self.ranges.hourly_value(current),
            compatibility,
            regime_comparison,
            offer_take_home,
            checklist,
            negotiation,
        })
    }

    /// Evaluates every offer against the same situation and profile.
    /// Results keep the order of `batch.offers`; the first invalid offer
    /// fails the whole batch.
    pub fn evaluate_offers(&self, batch: &BatchInput) -> Result<Vec<Evaluation>> {
        info!(offers = batch.offers.len(), "evaluating offer batch");
        batch
            .offers
            .par_iter()
            .map(|offer| {
                self.evaluate(&EvaluationInput {
                    current: batch.current.clone(),
                    offer: offer.clone(),
                    profile: batch.profile.clone(),
                    received_offer: None,
                })
            })
            .collect()
    }
}
