use super::views::{format_currency, DashboardInsights, DashboardSummary, DataSource};
use crate::calculators::domain::CalculatorKind;
use crate::calculators::input::ratio;
use crate::calculators::registry::CalculatorRecord;

/// Share of the total cost a focused people strategy is expected to recover.
pub const IMPROVEMENT_TARGET: f64 = 0.25;

pub(crate) fn generate_insights(
    summary: &DashboardSummary,
    records: &[CalculatorRecord],
) -> DashboardInsights {
    let find = |kind: CalculatorKind| records.iter().find(|record| record.kind == kind);

    let highest_impact = summary
        .top_cost_drivers
        .first()
        .filter(|entry| entry.annual_cost > 0.0)
        .map(|entry| {
            format!(
                "{} is costing {} annually - your biggest opportunity for improvement",
                entry.label,
                format_currency(entry.annual_cost)
            )
        });

    let absence_quick_win = find(CalculatorKind::Absence).and_then(|record| {
        let days = record.input("avg_absence_days").unwrap_or(0.0);
        ratio(record.result, days)
    });

    let improvement_potential = summary.total_annual_cost * IMPROVEMENT_TARGET;

    let mut observations = Vec::new();
    observations.push(format!(
        "{} of {} calculators completed",
        summary.calculators_reporting,
        CalculatorKind::ordered().len()
    ));

    let top_total: f64 = summary
        .top_cost_drivers
        .iter()
        .map(|entry| entry.annual_cost)
        .sum();
    if let Some(share) = ratio(top_total * 100.0, summary.total_annual_cost) {
        observations.push(format!(
            "Top {} cost drivers account for {:.0}% of the total impact",
            summary.top_cost_drivers.len(),
            share
        ));
    }

    let benchmarked = summary
        .cost_breakdown
        .iter()
        .filter(|entry| entry.source == DataSource::Benchmark)
        .count();
    if benchmarked > 0 {
        observations.push(format!(
            "{benchmarked} cost area(s) use industry benchmarks until their calculator is completed"
        ));
    }

    if let Some(change) = find(CalculatorKind::Profit).and_then(|record| record.detail("change")) {
        if change < 0.0 {
            observations.push(format!(
                "Profit per employee is down {} on the previous period",
                format_currency(change.abs())
            ));
        } else if change > 0.0 {
            observations.push(format!(
                "Profit per employee is up {} on the previous period",
                format_currency(change)
            ));
        }
    }

    if let Some(saving) = absence_quick_win {
        observations.push(format!(
            "Reducing absence by just 1 day per employee could save {} annually",
            format_currency(saving)
        ));
    }

    let mut recommended_actions: Vec<String> = summary
        .top_cost_drivers
        .iter()
        .filter(|entry| entry.annual_cost > 0.0)
        .map(|entry| format!("{}: {}", entry.action, entry.action_detail))
        .collect();

    if improvement_potential > 0.0 {
        recommended_actions.push(format!(
            "A {:.0}% improvement across all areas could save {}",
            IMPROVEMENT_TARGET * 100.0,
            format_currency(improvement_potential)
        ));
    }

    DashboardInsights {
        highest_impact,
        absence_quick_win,
        improvement_potential,
        observations,
        recommended_actions,
    }
}
