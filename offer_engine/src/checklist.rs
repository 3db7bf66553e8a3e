//! Decision checklist.
//!
//! A fixed, ordered list of yes/no criteria summarised into a pass count
//! and a verdict.

use crate::compatibility::CompatibilityResult;
use crate::models::{EmploymentClassification, OfferParameters, PersonalValuesProfile, ValueDimension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    GrowthPotential,
    Stability,
    OnSiteDays,
    Commute,
    BenefitsQuality,
    CostOfLiving,
    ValuesCompatibility,
    TopPriorities,
}

impl Criterion {
    pub const ALL: [Criterion; 8] = [
        Criterion::GrowthPotential,
        Criterion::Stability,
        Criterion::OnSiteDays,
        Criterion::Commute,
        Criterion::BenefitsQuality,
        Criterion::CostOfLiving,
        Criterion::ValuesCompatibility,
        Criterion::TopPriorities,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Criterion::GrowthPotential => "Growth potential >= 7",
            Criterion::Stability => "Stability >= 6",
            Criterion::OnSiteDays => "At most 3 on-site days per week",
            Criterion::Commute => "Commute <= 1h per day",
            Criterion::BenefitsQuality => "Benefits quality >= 7",
            Criterion::CostOfLiving => "Cost of living increase <= 20%",
            Criterion::ValuesCompatibility => "Values compatibility >= 70%",
            Criterion::TopPriorities => "At least 2 of 3 top priorities met",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    EvaluateTradeoffs,
    ConsiderAlternatives,
}

impl Verdict {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.7 {
            Verdict::Excellent
        } else if ratio >= 0.5 {
            Verdict::EvaluateTradeoffs
        } else {
            Verdict::ConsiderAlternatives
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Excellent => "This opportunity looks excellent",
            Verdict::EvaluateTradeoffs => "Evaluate the trade-offs carefully",
            Verdict::ConsiderAlternatives => "Consider other opportunities",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub criterion: Criterion,
    pub label: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistResult {
    pub items: Vec<ChecklistItem>,
    pub pass_count: usize,
    pub total: usize,
    pub verdict: Verdict,
}

impl ChecklistResult {
    pub fn pass_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.pass_count as f64 / self.total as f64
        }
    }
}

/// Whether the offer satisfies a priority on its own terms.
pub fn priority_satisfied(dimension: ValueDimension, offer: &OfferParameters) -> bool {
    match dimension {
        ValueDimension::FinancialStability => offer.stability >= 7,
        ValueDimension::TimeFlexibility => offer.days_on_site_per_week <= 2,
        ValueDimension::CareerGrowth => offer.growth >= 7,
        ValueDimension::WorkLifeBalance => offer.new_daily_commute_hours <= 1.0,
        ValueDimension::SocialImpact => offer.culture >= 8,
        ValueDimension::TechInnovation => offer.innovation >= 7,
        ValueDimension::CompanyCulture => offer.culture >= 7,
        ValueDimension::ContinuousLearning => offer.growth >= 6 && offer.innovation >= 6,
        ValueDimension::Recognition => offer.culture >= 6 && offer.growth >= 6,
        ValueDimension::Autonomy => offer.days_on_site_per_week <= 2,
        ValueDimension::JobSecurity => {
            offer.employment_classification == EmploymentClassification::Salaried
                && offer.stability >= 6
        }
        ValueDimension::NonMonetaryBenefits => offer.benefits_quality >= 7,
    }
}

/// Evaluates every criterion in order.
pub fn evaluate(
    offer: &OfferParameters,
    profile: &PersonalValuesProfile,
    compatibility: &CompatibilityResult,
) -> ChecklistResult {
    let priorities_met = profile
        .priorities
        .iter()
        .filter(|dimension| profile.importance.contains_key(*dimension))
        .filter(|dimension| priority_satisfied(**dimension, offer))
        .count();

    let items: Vec<ChecklistItem> = Criterion::ALL
        .into_iter()
        .map(|criterion| {
            let passed = match criterion {
                Criterion::GrowthPotential => offer.growth >= 7,
                Criterion::Stability => offer.stability >= 6,
                Criterion::OnSiteDays => offer.days_on_site_per_week <= 3,
                Criterion::Commute => offer.new_daily_commute_hours <= 1.0,
                Criterion::BenefitsQuality => offer.benefits_quality >= 7,
                Criterion::CostOfLiving => offer.cost_of_living_delta_pct <= 20.0,
                Criterion::ValuesCompatibility => compatibility.overall_score >= 70.0,
                Criterion::TopPriorities => priorities_met >= 2,
            };
            ChecklistItem {
                criterion,
                label: criterion.label().to_string(),
                passed,
            }
        })
        .collect();

    let pass_count = items.iter().filter(|item| item.passed).count();
    let total = items.len();
    let verdict = Verdict::from_ratio(pass_count as f64 / total as f64);
    ChecklistResult {
        items,
        pass_count,
        total,
        verdict,
    }
}
