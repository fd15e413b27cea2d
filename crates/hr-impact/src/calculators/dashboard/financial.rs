use serde::Serialize;

use crate::calculators::domain::{CalculatorKind, SharedInputs};
use crate::calculators::input::ratio;
use crate::calculators::registry::CalculatorRecord;

const DEFAULT_TURNOVER_RATE_PCT: f64 = 20.0;
const DEFAULT_ENGAGEMENT_RATE_PCT: f64 = 33.0;
const DEFAULT_PRODUCTIVITY_LOSS_PCT: f64 = 14.0;
const PRODUCTIVITY_LOSS_CAP_PCT: f64 = 30.0;

/// Headline figures used when translating HR issues into business language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_annual_cost: f64,
    pub total_employees: u32,
    pub avg_salary: f64,
    pub turnover_rate_pct: f64,
    pub engagement_rate_pct: f64,
    /// Total cost as a share of payroll, capped at 30%.
    pub productivity_loss_pct: f64,
}

impl FinancialSummary {
    pub fn from_records(shared: &SharedInputs, records: &[CalculatorRecord]) -> Self {
        let find = |kind: CalculatorKind| records.iter().find(|record| record.kind == kind);

        let total_annual_cost: f64 = records
            .iter()
            .filter(|record| record.kind.is_cost())
            .map(|record| record.result)
            .sum();

        let turnover_rate_pct = find(CalculatorKind::Turnover)
            .and_then(|record| record.detail("turnover_rate_pct"))
            .unwrap_or(DEFAULT_TURNOVER_RATE_PCT);

        let engagement_rate_pct = find(CalculatorKind::Engagement)
            .and_then(|record| record.input("engagement_rate"))
            .unwrap_or(DEFAULT_ENGAGEMENT_RATE_PCT);

        let payroll = shared.headcount() * shared.avg_salary;
        let productivity_loss_pct = ratio(total_annual_cost * 100.0, payroll)
            .map(|pct| pct.min(PRODUCTIVITY_LOSS_CAP_PCT))
            .unwrap_or(DEFAULT_PRODUCTIVITY_LOSS_PCT);

        Self {
            total_annual_cost,
            total_employees: shared.total_employees,
            avg_salary: shared.avg_salary,
            turnover_rate_pct,
            engagement_rate_pct,
            productivity_loss_pct,
        }
    }
}
