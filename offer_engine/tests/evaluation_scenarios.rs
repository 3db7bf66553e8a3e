use offer_engine::checklist::{Criterion, Verdict};
use offer_engine::config::EngineConfig;
use offer_engine::demo::DemoScenario;
use offer_engine::models::{EvaluationInput, ValueDimension};
use offer_engine::negotiation::NegotiationAdvice;
use offer_engine::OfferEngine;

fn demo_input() -> EvaluationInput {
    DemoScenario::default().input()
}

#[test]
fn excellent_fit_lowers_the_ideal() {
    let engine = OfferEngine::default();
    let baseline = engine.evaluate(&demo_input()).expect("baseline evaluates");

    let mut input = demo_input();
    for value in input.profile.importance.values_mut() {
        *value = 10;
    }
    input.offer.growth = 10;
    input.offer.stability = 10;
    input.offer.culture = 10;
    input.offer.innovation = 10;
    input.offer.days_on_site_per_week = 1;
    let great_fit = engine.evaluate(&input).expect("great fit evaluates");

    assert!(great_fit.compatibility.overall_score > 80.0);
    let multiplier = 1.3 + 10.0 * 0.02 + 10.0 * 0.015 + 7.0 * 0.015;
    assert!(
        (great_fit.range.ideal() - great_fit.range.minimum() * multiplier * 0.95).abs() < 1e-6,
        "ideal should carry the 0.95 discount"
    );
    assert!(great_fit.range.minimum() < baseline.range.minimum());
    assert_eq!(great_fit.checklist.verdict, Verdict::Excellent);
}

#[test]
fn poor_fit_raises_the_ideal() {
    let engine = OfferEngine::default();
    let mut input = demo_input();
    input.offer.growth = 2;
    input.offer.stability = 2;
    input.offer.culture = 2;
    input.offer.innovation = 2;
    input.offer.days_on_site_per_week = 5;
    input.offer.new_daily_commute_hours = 3.0;
    let evaluation = engine.evaluate(&input).expect("evaluates");

    assert!(evaluation.compatibility.overall_score < 50.0);
    let multiplier = 1.3 + 2.0 * 0.02 + 2.0 * 0.015 + 7.0 * 0.015;
    assert!((evaluation.range.ideal() - evaluation.range.minimum() * multiplier * 1.10).abs() < 1e-6);
    assert_eq!(evaluation.checklist.verdict, Verdict::ConsiderAlternatives);
}

#[test]
fn missing_priority_dimension_does_not_fail() {
    let engine = OfferEngine::default();
    let mut input = demo_input();
    input.profile.importance.remove(&ValueDimension::FinancialStability);
    let evaluation = engine.evaluate(&input).expect("missing data is not fatal");
    assert_eq!(evaluation.compatibility.skipped, vec![ValueDimension::FinancialStability]);
    assert!(evaluation.compatibility.overall_score > 0.0);
    let top_priorities = |evaluation: &offer_engine::Evaluation| {
        evaluation
            .checklist
            .items
            .iter()
            .find(|item| item.criterion == Criterion::TopPriorities)
            .map(|item| item.passed)
            .expect("top priorities item")
    };
    assert!(top_priorities(&evaluation));

    // career growth is one of the two priorities the demo offer satisfies
    input.profile.importance.remove(&ValueDimension::CareerGrowth);
    let evaluation = engine.evaluate(&input).expect("missing data is not fatal");
    assert!(!top_priorities(&evaluation));
}

#[test]
fn generous_offer_is_accepted() {
    let engine = OfferEngine::default();
    let mut input = demo_input();
    input.received_offer = Some(20_000.0);
    let evaluation = engine.evaluate(&input).expect("evaluates");
    assert_eq!(
        evaluation.negotiation,
        Some(NegotiationAdvice::Accept { offered: 20_000.0 })
    );
}

#[test]
fn alternative_constants_change_the_split() {
    let config = EngineConfig::from_json_str(
        r#"{"equivalence_factor": 1.45, "self_employed": {"labor_share": 0.3}}"#,
    )
    .expect("config parses");
    let engine = OfferEngine::new(config);
    let evaluation = engine.evaluate(&demo_input()).expect("evaluates");
    let corporate = evaluation.regime_comparison.self_employed.breakdown;
    assert!((evaluation.self_employed_equivalent - evaluation.range.ideal() * 1.45).abs() < 1e-6);
    assert!((corporate.labor_portion - corporate.total_monthly_value * 0.3).abs() < 1e-6);
}
