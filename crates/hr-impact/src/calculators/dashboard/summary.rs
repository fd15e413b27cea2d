use std::collections::BTreeMap;

use super::views::{CostEntry, DashboardInsights, DashboardSummary, DataSource};
use crate::calculators::domain::CalculatorKind;
use crate::calculators::registry::CalculatorRecord;

const TOP_DRIVER_COUNT: usize = 3;

impl DashboardSummary {
    /// Summarises only the calculators that have published a record.
    pub fn from_records(records: &[CalculatorRecord]) -> Self {
        let present = latest_by_kind(records);
        let figures = CalculatorKind::ordered()
            .into_iter()
            .filter_map(|kind| {
                present
                    .get(&kind)
                    .map(|record| (kind, record.result, DataSource::Calculator))
            })
            .collect();

        Self::build(figures, present.len())
    }

    /// Fills calculators without a record from benchmark figures.
    pub fn with_benchmarks(records: &[CalculatorRecord]) -> Self {
        let present = latest_by_kind(records);
        let figures = CalculatorKind::ordered()
            .into_iter()
            .map(|kind| match present.get(&kind) {
                Some(record) => (kind, record.result, DataSource::Calculator),
                None => (kind, kind.benchmark(), DataSource::Benchmark),
            })
            .collect();

        Self::build(figures, present.len())
    }

    pub fn insights(&self, records: &[CalculatorRecord]) -> DashboardInsights {
        super::generate_insights(self, records)
    }

    pub fn entry(&self, kind: CalculatorKind) -> Option<&CostEntry> {
        self.cost_breakdown.iter().find(|entry| entry.kind == kind)
    }

    fn build(figures: Vec<(CalculatorKind, f64, DataSource)>, calculators_reporting: usize) -> Self {
        let profit_per_employee = figures
            .iter()
            .find(|(kind, _, _)| !kind.is_cost())
            .map(|(_, value, _)| *value);

        let costs: Vec<_> = figures
            .into_iter()
            .filter(|(kind, _, _)| kind.is_cost())
            .collect();

        let total_annual_cost: f64 = costs.iter().map(|(_, value, _)| value).sum();
        let max_cost = costs
            .iter()
            .map(|(_, value, _)| *value)
            .fold(0.0_f64, f64::max);

        let cost_breakdown: Vec<CostEntry> = costs
            .into_iter()
            .map(|(kind, annual_cost, source)| CostEntry {
                kind,
                label: kind.label(),
                annual_cost,
                share_of_total_pct: percentage_of(annual_cost, total_annual_cost),
                bar_width_pct: percentage_of(annual_cost, max_cost),
                source,
                action: kind.action(),
                action_detail: kind.action_detail(),
            })
            .collect();

        let mut top_cost_drivers = cost_breakdown.clone();
        top_cost_drivers.sort_by(|a, b| b.annual_cost.total_cmp(&a.annual_cost));
        top_cost_drivers.truncate(TOP_DRIVER_COUNT);

        Self {
            total_annual_cost,
            cost_breakdown,
            top_cost_drivers,
            profit_per_employee,
            calculators_reporting,
        }
    }
}

fn latest_by_kind(records: &[CalculatorRecord]) -> BTreeMap<CalculatorKind, &CalculatorRecord> {
    let mut latest: BTreeMap<CalculatorKind, &CalculatorRecord> = BTreeMap::new();
    for record in records {
        match latest.get(&record.kind) {
            Some(existing) if existing.timestamp > record.timestamp => {}
            _ => {
                latest.insert(record.kind, record);
            }
        }
    }
    latest
}

fn percentage_of(value: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        value / whole * 100.0
    } else {
        0.0
    }
}
