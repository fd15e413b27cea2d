use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::common::*;
use crate::calculators::{
    CalculatorKind, CalculatorRecord, DashboardSummary, DataSource, FinancialSummary,
    ImpactReport, SharedInputsPatch,
};

fn record(kind: CalculatorKind, result: f64) -> CalculatorRecord {
    CalculatorRecord::new(kind, result, BTreeMap::new(), BTreeMap::new())
}

#[test]
fn total_excludes_profit_per_employee() {
    let records = vec![
        record(CalculatorKind::Communication, 480_000.0),
        record(CalculatorKind::Turnover, 400_000.0),
        record(CalculatorKind::Profit, 20_000.0),
    ];
    let summary = DashboardSummary::from_records(&records);

    assert_eq!(summary.total_annual_cost, 880_000.0);
    assert_eq!(summary.profit_per_employee, Some(20_000.0));
    assert_eq!(summary.calculators_reporting, 3);
    assert_eq!(summary.cost_breakdown.len(), 2);
    assert!(summary.entry(CalculatorKind::Profit).is_none());
}

#[test]
fn breakdown_shares_and_bar_widths() {
    let records = vec![
        record(CalculatorKind::Communication, 300_000.0),
        record(CalculatorKind::Absence, 100_000.0),
    ];
    let summary = DashboardSummary::from_records(&records);

    let communication = summary
        .entry(CalculatorKind::Communication)
        .expect("communication entry");
    assert_eq!(communication.share_of_total_pct, 75.0);
    assert_eq!(communication.bar_width_pct, 100.0);
    assert_eq!(communication.source, DataSource::Calculator);

    let absence = summary.entry(CalculatorKind::Absence).expect("absence entry");
    assert_eq!(absence.share_of_total_pct, 25.0);
    assert_close(absence.bar_width_pct, 33.33);
}

#[test]
fn empty_registry_yields_empty_dashboard() {
    let summary = DashboardSummary::from_records(&[]);
    assert_eq!(summary.total_annual_cost, 0.0);
    assert!(summary.cost_breakdown.is_empty());
    assert!(summary.top_cost_drivers.is_empty());

    let insights = summary.insights(&[]);
    assert!(insights.highest_impact.is_none());
    assert!(insights.recommended_actions.is_empty());
    assert_eq!(insights.improvement_potential, 0.0);
}

#[test]
fn benchmarks_fill_missing_calculators() {
    let records = vec![record(CalculatorKind::Turnover, 150_000.0)];
    let summary = DashboardSummary::with_benchmarks(&records);

    assert_eq!(summary.cost_breakdown.len(), 5);
    let turnover = summary.entry(CalculatorKind::Turnover).expect("turnover entry");
    assert_eq!(turnover.annual_cost, 150_000.0);
    assert_eq!(turnover.source, DataSource::Calculator);

    let engagement = summary
        .entry(CalculatorKind::Engagement)
        .expect("engagement entry");
    assert_eq!(engagement.annual_cost, 670_000.0);
    assert_eq!(engagement.source, DataSource::Benchmark);

    assert_eq!(summary.total_annual_cost, 1_574_807.0);
    assert_eq!(summary.profit_per_employee, Some(20_000.0));
}

#[test]
fn default_suite_dashboard_ranks_top_drivers() {
    let suite = activated_suite();
    let summary = suite.dashboard();

    assert_eq!(summary.calculators_reporting, 6);
    assert_close(summary.total_annual_cost, 2_536_557.69);
    assert_eq!(summary.profit_per_employee, Some(10_000.0));

    let top: Vec<_> = summary
        .top_cost_drivers
        .iter()
        .map(|entry| entry.kind)
        .collect();
    assert_eq!(
        top,
        vec![
            CalculatorKind::Service,
            CalculatorKind::Engagement,
            CalculatorKind::Communication,
        ]
    );
}

#[test]
fn insights_describe_the_biggest_cost() {
    let suite = activated_suite();
    let records = suite.records();
    let insights = suite.dashboard().insights(&records);

    assert_eq!(
        insights.highest_impact.as_deref(),
        Some("Service Loss is costing £894,250 annually - your biggest opportunity for improvement")
    );
    assert_close(insights.absence_quick_win.expect("absence quick win"), 15_384.62);
    assert_close(insights.improvement_potential, 634_139.42);
    assert_eq!(insights.recommended_actions.len(), 4);
    assert!(insights
        .observations
        .iter()
        .any(|line| line == "6 of 6 calculators completed"));
}

#[test]
fn financial_summary_caps_productivity_loss() {
    let suite = activated_suite();
    let summary = suite.financial_summary();

    assert_eq!(summary.total_employees, 100);
    assert_eq!(summary.turnover_rate_pct, 10.0);
    assert_eq!(summary.engagement_rate_pct, 33.0);
    assert_eq!(summary.productivity_loss_pct, 30.0);
}

#[test]
fn financial_summary_defaults_without_payroll() {
    let suite = lenient_suite();
    suite.update_shared(SharedInputsPatch {
        total_employees: Some(0),
        avg_salary: None,
    });
    let summary = suite.financial_summary();

    assert_eq!(summary.productivity_loss_pct, 14.0);
    assert_eq!(summary.turnover_rate_pct, 20.0);

    let empty = FinancialSummary::from_records(&shared_inputs(50, 30_000.0), &[]);
    assert_eq!(empty.total_annual_cost, 0.0);
    assert_eq!(empty.productivity_loss_pct, 0.0);
}

#[test]
fn fresh_suite_reports_from_benchmarks() {
    let suite = lenient_suite();
    assert!(suite.dashboard().cost_breakdown.is_empty());

    let generated_on = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
    let report = ImpactReport::build(&suite, None, generated_on);

    assert_eq!(report.dashboard.calculators_reporting, 0);
    assert!(report.records.is_empty());
    assert_eq!(report.dashboard.cost_breakdown.len(), 5);
    assert!(report
        .dashboard
        .cost_breakdown
        .iter()
        .all(|entry| entry.source == DataSource::Benchmark));
    assert_eq!(report.dashboard.total_annual_cost, 1_824_807.0);
    assert_eq!(report.priority_areas[0].kind, CalculatorKind::Engagement);
    assert!(report
        .insights
        .observations
        .iter()
        .any(|line| line.starts_with("5 cost area(s) use industry benchmarks")));
}

#[test]
fn touched_calculators_replace_their_benchmark() {
    let suite = lenient_suite();
    suite
        .set_input(CalculatorKind::Turnover, "leavers", "20")
        .expect("leavers accepted");

    let generated_on = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
    let report = ImpactReport::build(&suite, None, generated_on);

    assert_eq!(report.dashboard.calculators_reporting, 1);
    let turnover = report
        .dashboard
        .entry(CalculatorKind::Turnover)
        .expect("turnover entry");
    assert_eq!(turnover.source, DataSource::Calculator);
    assert_eq!(turnover.annual_cost, 800_000.0);
    let benchmarked = report
        .dashboard
        .cost_breakdown
        .iter()
        .filter(|entry| entry.source == DataSource::Benchmark)
        .count();
    assert_eq!(benchmarked, 4);
    assert!(report
        .insights
        .observations
        .iter()
        .any(|line| line == "1 of 6 calculators completed"));
}
