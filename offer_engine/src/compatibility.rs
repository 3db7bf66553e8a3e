//! Personal values compatibility.
//!
//! Each scored dimension compares how much the user cares about a value
//! with how well the offer delivers it, producing 0..=100.  The overall
//! score is a weighted mean where the user's top-3 priorities count more.

use crate::config::CompatibilitySettings;
use crate::models::{OfferParameters, PersonalValuesProfile, ValueDimension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Dimensions the offer attributes can speak to.
pub const SCORED_DIMENSIONS: [ValueDimension; 6] = [
    ValueDimension::FinancialStability,
    ValueDimension::TimeFlexibility,
    ValueDimension::CareerGrowth,
    ValueDimension::WorkLifeBalance,
    ValueDimension::TechInnovation,
    ValueDimension::CompanyCulture,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Weighted mean of `per_dimension`, 0..=100.
    pub overall_score: f64,
    pub per_dimension: BTreeMap<ValueDimension, f64>,
    /// Scored dimensions left out because the profile has no importance
    /// for them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<ValueDimension>,
}

impl CompatibilityResult {
    /// Result used when no profile data is usable.
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Score for on-site days per week: fewer days, more flexibility.
pub fn on_site_flexibility(days_on_site: u8) -> f64 {
    match days_on_site {
        0 | 1 => 100.0,
        2 => 80.0,
        3 => 60.0,
        4 => 40.0,
        _ => 20.0,
    }
}

/// Score for one-way commute hours: shorter commute, better balance.
pub fn commute_balance(hours: f64) -> f64 {
    if hours <= 0.5 {
        100.0
    } else if hours <= 1.0 {
        80.0
    } else if hours <= 1.5 {
        60.0
    } else if hours <= 2.0 {
        40.0
    } else {
        20.0
    }
}

#[derive(Debug, Clone)]
pub struct ValuesCompatibilityScorer {
    settings: CompatibilitySettings,
}

impl ValuesCompatibilityScorer {
    pub fn new(settings: CompatibilitySettings) -> Self {
        Self { settings }
    }

    /// Weight of `dimension` in the overall mean.
    pub fn weight(&self, profile: &PersonalValuesProfile, dimension: ValueDimension) -> f64 {
        if profile.is_priority(dimension) {
            self.settings.priority_weight
        } else {
            self.settings.default_weight
        }
    }

    /// Compatibility for one dimension, or `None` when the offer has no
    /// attribute for it.
    pub fn dimension_score(
        dimension: ValueDimension,
        importance: u8,
        offer: &OfferParameters,
    ) -> Option<f64> {
        // the weaker side limits the match
        let direct = |attribute: u8| f64::from(importance.min(attribute)) * 10.0;
        let capped = |step: f64| (f64::from(importance) * 10.0).min(step);
        let score = match dimension {
            ValueDimension::FinancialStability => direct(offer.stability),
            ValueDimension::CareerGrowth => direct(offer.growth),
            ValueDimension::TechInnovation => direct(offer.innovation),
            ValueDimension::CompanyCulture => direct(offer.culture),
            ValueDimension::TimeFlexibility => {
                capped(on_site_flexibility(offer.days_on_site_per_week))
            }
            ValueDimension::WorkLifeBalance => {
                capped(commute_balance(offer.new_daily_commute_hours))
            }
            _ => return None,
        };
        Some(score.clamp(0.0, 100.0))
    }

    pub fn score(&self, profile: &PersonalValuesProfile, offer: &OfferParameters) -> CompatibilityResult {
        for priority in &profile.priorities {
            if !profile.importance.contains_key(priority) {
                warn!(dimension = %priority, "priority has no importance score; it will not match");
            }
        }

        let mut result = CompatibilityResult::neutral();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for dimension in SCORED_DIMENSIONS {
            let importance = match profile.importance_of(dimension) {
                Ok(importance) => importance,
                Err(err) => {
                    debug!(%err, "skipping dimension");
                    result.skipped.push(dimension);
                    continue;
                }
            };
            let Some(score) = Self::dimension_score(dimension, importance, offer) else {
                continue;
            };
            let weight = self.weight(profile, dimension);
            weighted_sum += score * weight;
            total_weight += weight;
            result.per_dimension.insert(dimension, score);
        }

        if total_weight > 0.0 {
            result.overall_score = (weighted_sum / total_weight).clamp(0.0, 100.0);
        }
        debug!(overall = result.overall_score, "scored values compatibility");
        result
    }
}
