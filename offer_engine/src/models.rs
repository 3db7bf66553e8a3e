//! Data models for the Offer Engine.
//!
//! The `models` module defines the serialisable input structures the
//! engine consumes: the user's current situation, the parameters of a
//! prospective offer and a personal values profile.  The surrounding UI
//! owns these values and hands them to the engine by value on every
//! evaluation; the engine never keeps them between calls.

use crate::error::{ensure_amount, ensure_range, EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Itemised monthly benefits.  When present the items must add up to
/// [`CurrentSituation::monthly_benefits_total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitsBreakdown {
    pub food_allowance: f64,
    pub transport_allowance: f64,
    pub health_copay: f64,
    pub other: f64,
}

impl BenefitsBreakdown {
    pub fn total(&self) -> f64 {
        self.food_allowance + self.transport_allowance + self.health_copay + self.other
    }
}

/// What the user earns today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSituation {
    /// Gross monthly salary before any withholding.
    pub gross_monthly_salary: f64,
    /// Monthly value of all benefits (meal vouchers, transport, health
    /// plan and so on).
    pub monthly_benefits_total: f64,
    /// Optional itemisation of `monthly_benefits_total`.
    #[serde(default)]
    pub benefits_breakdown: Option<BenefitsBreakdown>,
    /// Annual bonus or profit sharing.
    pub annual_bonus: f64,
    pub vacation_days: u32,
    /// One-way commute time in hours per working day.
    pub daily_commute_hours: f64,
}

/// Tolerance used when comparing itemised benefits with their total.
const BENEFITS_TOLERANCE: f64 = 0.005;

impl CurrentSituation {
    /// Salary plus benefits, per month.
    pub fn total_monthly(&self) -> f64 {
        self.gross_monthly_salary + self.monthly_benefits_total
    }

    pub fn validate(&self) -> Result<()> {
        ensure_amount("gross_monthly_salary", self.gross_monthly_salary)?;
        ensure_amount("monthly_benefits_total", self.monthly_benefits_total)?;
        ensure_amount("annual_bonus", self.annual_bonus)?;
        ensure_range("daily_commute_hours", self.daily_commute_hours, 0.0, 24.0)?;
        if let Some(items) = &self.benefits_breakdown {
            ensure_amount("benefits_breakdown.food_allowance", items.food_allowance)?;
            ensure_amount("benefits_breakdown.transport_allowance", items.transport_allowance)?;
            ensure_amount("benefits_breakdown.health_copay", items.health_copay)?;
            ensure_amount("benefits_breakdown.other", items.other)?;
            if (items.total() - self.monthly_benefits_total).abs() > BENEFITS_TOLERANCE {
                return Err(EngineError::invalid(
                    "benefits_breakdown",
                    format!(
                        "items sum to {:.2} but monthly_benefits_total is {:.2}",
                        items.total(),
                        self.monthly_benefits_total
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Employment classification of the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentClassification {
    /// Payroll employment with withholding and mandatory benefits (extra
    /// monthly salary, paid-leave premium, savings-fund deposits).
    Salaried,
    /// Compensation invoiced through the worker's own company.
    SelfEmployed,
}

impl fmt::Display for EmploymentClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentClassification::Salaried => f.write_str("salaried"),
            EmploymentClassification::SelfEmployed => f.write_str("self-employed"),
        }
    }
}

/// Parameters describing the prospective offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferParameters {
    /// Signed change in cost of living at the new location, in percent
    /// (`10.0` means 10% more expensive).
    pub cost_of_living_delta_pct: f64,
    pub days_on_site_per_week: u8,
    /// One-way commute time in hours per on-site day.
    pub new_daily_commute_hours: f64,
    pub monthly_transport_cost: f64,
    pub growth: u8,
    pub stability: u8,
    pub benefits_quality: u8,
    pub culture: u8,
    pub innovation: u8,
    pub employment_classification: EmploymentClassification,
}

impl OfferParameters {
    /// The cost-of-living delta as a fraction.
    pub fn cost_of_living_ratio(&self) -> f64 {
        self.cost_of_living_delta_pct / 100.0
    }

    pub fn validate(&self) -> Result<()> {
        ensure_range(
            "cost_of_living_delta_pct",
            self.cost_of_living_delta_pct,
            -50.0,
            100.0,
        )?;
        ensure_range(
            "days_on_site_per_week",
            f64::from(self.days_on_site_per_week),
            0.0,
            5.0,
        )?;
        ensure_range("new_daily_commute_hours", self.new_daily_commute_hours, 0.0, 4.0)?;
        ensure_amount("monthly_transport_cost", self.monthly_transport_cost)?;
        for (field, score) in [
            ("growth", self.growth),
            ("stability", self.stability),
            ("benefits_quality", self.benefits_quality),
            ("culture", self.culture),
            ("innovation", self.innovation),
        ] {
            ensure_range(field, f64::from(score), 1.0, 10.0)?;
        }
        Ok(())
    }
}

/// A personal value the user can weigh when comparing opportunities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDimension {
    #[serde(alias = "Financial Stability")]
    FinancialStability,
    #[serde(alias = "Time Flexibility")]
    TimeFlexibility,
    #[serde(alias = "Career Growth")]
    CareerGrowth,
    #[serde(alias = "Work-Life Balance")]
    WorkLifeBalance,
    #[serde(alias = "Social Impact")]
    SocialImpact,
    #[serde(alias = "Tech Innovation")]
    TechInnovation,
    #[serde(alias = "Company Culture")]
    CompanyCulture,
    #[serde(alias = "Continuous Learning")]
    ContinuousLearning,
    #[serde(alias = "Recognition")]
    Recognition,
    #[serde(alias = "Autonomy")]
    Autonomy,
    #[serde(alias = "Job Security")]
    JobSecurity,
    #[serde(alias = "Non-Monetary Benefits")]
    NonMonetaryBenefits,
}

impl ValueDimension {
    pub const ALL: [ValueDimension; 12] = [
        ValueDimension::FinancialStability,
        ValueDimension::TimeFlexibility,
        ValueDimension::CareerGrowth,
        ValueDimension::WorkLifeBalance,
        ValueDimension::SocialImpact,
        ValueDimension::TechInnovation,
        ValueDimension::CompanyCulture,
        ValueDimension::ContinuousLearning,
        ValueDimension::Recognition,
        ValueDimension::Autonomy,
        ValueDimension::JobSecurity,
        ValueDimension::NonMonetaryBenefits,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ValueDimension::FinancialStability => "Financial Stability",
            ValueDimension::TimeFlexibility => "Time Flexibility",
            ValueDimension::CareerGrowth => "Career Growth",
            ValueDimension::WorkLifeBalance => "Work-Life Balance",
            ValueDimension::SocialImpact => "Social Impact",
            ValueDimension::TechInnovation => "Tech Innovation",
            ValueDimension::CompanyCulture => "Company Culture",
            ValueDimension::ContinuousLearning => "Continuous Learning",
            ValueDimension::Recognition => "Recognition",
            ValueDimension::Autonomy => "Autonomy",
            ValueDimension::JobSecurity => "Job Security",
            ValueDimension::NonMonetaryBenefits => "Non-Monetary Benefits",
        }
    }
}

impl fmt::Display for ValueDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValueDimension {
    type Err = EngineError;

    /// Accepts either the label (`"Career Growth"`) or the snake_case name
    /// (`"career_growth"`), ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ValueDimension::ALL
            .into_iter()
            .find(|dim| {
                dim.label().eq_ignore_ascii_case(wanted)
                    || dim
                        .label()
                        .replace(['-', ' '], "_")
                        .eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| EngineError::invalid("value_dimension", format!("unknown dimension `{s}`")))
    }
}

/// How much each value matters to the user, plus their three top
/// priorities in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalValuesProfile {
    /// Importance on a 1..=10 scale.  Dimensions may be absent; the
    /// engine then leaves them out of the compatibility score.
    pub importance: BTreeMap<ValueDimension, u8>,
    /// Exactly three distinct dimensions, most important first.
    pub priorities: Vec<ValueDimension>,
}

impl PersonalValuesProfile {
    pub fn importance_of(&self, dimension: ValueDimension) -> Result<u8> {
        self.importance
            .get(&dimension)
            .copied()
            .ok_or(EngineError::MissingProfileData(dimension))
    }

    pub fn is_priority(&self, dimension: ValueDimension) -> bool {
        self.priorities.contains(&dimension)
    }

    pub fn validate(&self) -> Result<()> {
        for (dimension, score) in &self.importance {
            if !(1..=10).contains(score) {
                return Err(EngineError::invalid(
                    "importance",
                    format!("{dimension} must be between 1 and 10 (got {score})"),
                ));
            }
        }
        if self.priorities.len() != 3 {
            return Err(EngineError::invalid(
                "priorities",
                format!("exactly 3 priorities are required (got {})", self.priorities.len()),
            ));
        }
        let distinct: BTreeSet<_> = self.priorities.iter().collect();
        if distinct.len() != self.priorities.len() {
            return Err(EngineError::invalid("priorities", "priorities must be distinct"));
        }
        Ok(())
    }
}

/// Everything needed for one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub current: CurrentSituation,
    pub offer: OfferParameters,
    pub profile: PersonalValuesProfile,
    /// Monthly amount the company actually proposed, if any.  When set the
    /// evaluation includes negotiation advice.
    #[serde(default)]
    pub received_offer: Option<f64>,
}

impl EvaluationInput {
    pub fn validate(&self) -> Result<()> {
        self.current.validate()?;
        self.offer.validate()?;
        self.profile.validate()?;
        if let Some(amount) = self.received_offer {
            ensure_amount("received_offer", amount)?;
        }
        Ok(())
    }
}

/// Several offers evaluated against the same situation and profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub current: CurrentSituation,
    pub profile: PersonalValuesProfile,
    pub offers: Vec<OfferParameters>,
}
