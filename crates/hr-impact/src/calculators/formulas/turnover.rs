use serde::{Deserialize, Serialize};

use super::{Calculator, Evaluation};
use crate::calculators::domain::{CalculatorKind, SharedField, SharedInputs};
use crate::calculators::input::ratio;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverInputs {
    pub leavers: f64,
    pub avg_salary: f64,
    pub replacement_cost_percentage: f64,
    pub employees: f64,
}

/// Annual cost of replacing `leavers` at a share of their salary.
pub fn turnover_cost(leavers: f64, avg_salary: f64, replacement_cost_percentage: f64) -> f64 {
    leavers * avg_salary * (replacement_cost_percentage / 100.0)
}

pub struct TurnoverCalculator;

impl Calculator for TurnoverCalculator {
    const KIND: CalculatorKind = CalculatorKind::Turnover;
    const SHARED_FIELDS: &'static [(&'static str, SharedField)] = &[
        ("employees", SharedField::TotalEmployees),
        ("avg_salary", SharedField::AvgSalary),
    ];

    type Inputs = TurnoverInputs;

    fn defaults(shared: &SharedInputs) -> Self::Inputs {
        TurnoverInputs {
            leavers: 10.0,
            avg_salary: shared.avg_salary,
            replacement_cost_percentage: 100.0,
            employees: shared.headcount(),
        }
    }

    fn sync_shared(inputs: &mut Self::Inputs, shared: &SharedInputs) {
        inputs.employees = shared.headcount();
        inputs.avg_salary = shared.avg_salary;
    }

    fn evaluate(inputs: &Self::Inputs) -> Evaluation {
        let turnover_rate = ratio(inputs.leavers * 100.0, inputs.employees);

        Evaluation::new(turnover_cost(
            inputs.leavers,
            inputs.avg_salary,
            inputs.replacement_cost_percentage,
        ))
        .with_optional_detail("turnover_rate_pct", turnover_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_leavers_at_full_replacement_cost() {
        let inputs = TurnoverCalculator::defaults(&SharedInputs::default());
        let evaluation = TurnoverCalculator::evaluate(&inputs);
        assert_eq!(evaluation.result, 400_000.0);
        assert_eq!(evaluation.details.get("turnover_rate_pct"), Some(&10.0));
    }

    #[test]
    fn zero_headcount_omits_turnover_rate() {
        let mut inputs = TurnoverCalculator::defaults(&SharedInputs::default());
        inputs.employees = 0.0;
        let evaluation = TurnoverCalculator::evaluate(&inputs);
        assert_eq!(evaluation.result, 400_000.0);
        assert!(!evaluation.details.contains_key("turnover_rate_pct"));
    }
}
