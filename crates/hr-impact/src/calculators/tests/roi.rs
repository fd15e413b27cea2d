use super::common::*;
use crate::calculators::roi::QualityProgramInputs;
use crate::calculators::{CalculatorKind, RoiProgram, RoiProgramKind, SharedInputsPatch};

#[test]
fn seeded_programs_follow_calculator_inputs() {
    let suite = lenient_suite();
    suite
        .set_input(CalculatorKind::Turnover, "leavers", "20")
        .expect("leavers accepted");
    suite
        .set_input(CalculatorKind::Turnover, "replacement_cost_percentage", "50")
        .expect("replacement cost accepted");

    let program = RoiProgram::from_store(
        RoiProgramKind::RetentionProgram,
        suite.store(),
        suite.registry(),
    );
    let outcome = program.evaluate();

    // 20 departures at £20,000 each; five avoided.
    assert_eq!(outcome.annual_loss, 400_000.0);
    assert_eq!(outcome.annual_savings, 100_000.0);
    assert_eq!(outcome.roi_pct, Some(0.0));
    assert_eq!(outcome.payback_months, Some(12.0));
}

#[test]
fn communication_training_tracks_shared_headcount() {
    let suite = lenient_suite();
    suite.update_shared(SharedInputsPatch {
        total_employees: Some(200),
        avg_salary: None,
    });

    let outcome = RoiProgram::from_store(
        RoiProgramKind::CommunicationTraining,
        suite.store(),
        suite.registry(),
    )
    .evaluate();

    assert_close(outcome.annual_loss, 960_000.0);
    assert_close(outcome.annual_savings, 240_000.0);
    assert_close(outcome.total_investment, 63_333.33);
}

#[test]
fn quality_program_uses_service_defaults() {
    let suite = lenient_suite();
    let outcome = RoiProgram::from_store(
        RoiProgramKind::QualityProgram,
        suite.store(),
        suite.registry(),
    )
    .evaluate();

    assert_eq!(outcome.annual_loss, 456_250.0);
    assert_close(outcome.annual_savings, 159_687.5);
    assert_eq!(outcome.total_investment, 50_000.0);
    assert_close(outcome.roi_pct.expect("roi"), 219.38);
}

#[test]
fn explicit_programs_deserialize_from_tagged_json() {
    let program: RoiProgram = serde_json::from_value(serde_json::json!({
        "program": "quality_program",
        "lost_customers_per_day": 4.0,
        "locations": 2.0,
        "avg_revenue_per_customer": 25.0,
        "working_days_per_year": 300.0,
        "quality_failure_rate": 0.0,
        "rework_cost_per_incident": 0.0,
        "program_cost": 10_000.0,
        "target_reduction": 50.0
    }))
    .expect("tagged program");

    assert_eq!(program.kind(), RoiProgramKind::QualityProgram);
    assert!(matches!(
        &program,
        RoiProgram::QualityProgram(QualityProgramInputs { locations, .. }) if *locations == 2.0
    ));

    let outcome = program.evaluate();
    assert_eq!(outcome.annual_loss, 60_000.0);
    assert_eq!(outcome.annual_savings, 30_000.0);
    assert_eq!(outcome.roi_pct, Some(200.0));
    assert_eq!(outcome.payback_months, Some(4.0));
}

#[test]
fn zero_savings_leave_payback_undefined() {
    let program: RoiProgram = serde_json::from_value(serde_json::json!({
        "program": "engagement_program",
        "employees": 100.0,
        "avg_salary": 40_000.0,
        "engagement_rate": 60.0,
        "target_engagement_rate": 60.0,
        "program_cost": 75_000.0
    }))
    .expect("tagged program");

    let outcome = program.evaluate();
    assert_eq!(outcome.annual_savings, 0.0);
    assert_eq!(outcome.payback_months, None);
    assert_eq!(outcome.roi_pct, Some(-100.0));
}
