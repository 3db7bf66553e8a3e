//! Default inputs for demos and tests.
//!
//! These are the values a fresh form starts from.  They live here rather
//! than in any front end so every collaborator (and the test suite) starts
//! from the same scenario.

use crate::models::{
    CurrentSituation, EmploymentClassification, EvaluationInput, OfferParameters,
    PersonalValuesProfile, ValueDimension,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct DemoScenario {
    pub current: CurrentSituation,
    pub offer: OfferParameters,
    pub profile: PersonalValuesProfile,
}

impl Default for DemoScenario {
    fn default() -> Self {
        let current = CurrentSituation {
            gross_monthly_salary: 5000.0,
            monthly_benefits_total: 1000.0,
            benefits_breakdown: None,
            annual_bonus: 5000.0,
            vacation_days: 30,
            daily_commute_hours: 1.5,
        };
        let offer = OfferParameters {
            cost_of_living_delta_pct: 10.0,
            days_on_site_per_week: 3,
            new_daily_commute_hours: 0.5,
            monthly_transport_cost: 200.0,
            growth: 7,
            stability: 6,
            benefits_quality: 7,
            culture: 7,
            innovation: 6,
            employment_classification: EmploymentClassification::Salaried,
        };
        let importance: BTreeMap<ValueDimension, u8> = [
            (ValueDimension::FinancialStability, 8),
            (ValueDimension::TimeFlexibility, 7),
            (ValueDimension::CareerGrowth, 9),
            (ValueDimension::WorkLifeBalance, 8),
            (ValueDimension::SocialImpact, 5),
            (ValueDimension::TechInnovation, 7),
            (ValueDimension::CompanyCulture, 6),
            (ValueDimension::ContinuousLearning, 8),
            (ValueDimension::Recognition, 6),
            (ValueDimension::Autonomy, 7),
            (ValueDimension::JobSecurity, 7),
            (ValueDimension::NonMonetaryBenefits, 5),
        ]
        .into_iter()
        .collect();
        let profile = PersonalValuesProfile {
            importance,
            priorities: vec![
                ValueDimension::CareerGrowth,
                ValueDimension::WorkLifeBalance,
                ValueDimension::FinancialStability,
            ],
        };
        Self {
            current,
            offer,
            profile,
        }
    }
}

impl DemoScenario {
    pub fn input(&self) -> EvaluationInput {
        EvaluationInput {
            current: self.current.clone(),
            offer: self.offer.clone(),
            profile: self.profile.clone(),
            received_offer: None,
        }
    }
}
