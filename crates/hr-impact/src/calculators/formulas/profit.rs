use serde::{Deserialize, Serialize};

use super::{Calculator, Evaluation};
use crate::calculators::domain::{CalculatorKind, SharedField, SharedInputs};
use crate::calculators::input::ratio;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitInputs {
    pub net_profit: f64,
    pub total_employees: f64,
    pub previous_net_profit: f64,
    pub previous_employees: f64,
}

/// Current and prior profit per head. Periods without staff have no figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitComparison {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
}

pub fn profit_per_employee(inputs: &ProfitInputs) -> ProfitComparison {
    let current = ratio(inputs.net_profit, inputs.total_employees);
    let previous = ratio(inputs.previous_net_profit, inputs.previous_employees);
    let change = current.zip(previous).map(|(now, before)| now - before);
    let change_pct = change
        .zip(previous)
        .and_then(|(delta, before)| ratio(delta * 100.0, before.abs()));

    ProfitComparison {
        current,
        previous,
        change,
        change_pct,
    }
}

pub struct ProfitCalculator;

impl Calculator for ProfitCalculator {
    const KIND: CalculatorKind = CalculatorKind::Profit;
    const SHARED_FIELDS: &'static [(&'static str, SharedField)] =
        &[("total_employees", SharedField::TotalEmployees)];

    type Inputs = ProfitInputs;

    fn defaults(shared: &SharedInputs) -> Self::Inputs {
        ProfitInputs {
            net_profit: 1_000_000.0,
            total_employees: shared.headcount(),
            previous_net_profit: 800_000.0,
            previous_employees: 45.0,
        }
    }

    fn sync_shared(inputs: &mut Self::Inputs, shared: &SharedInputs) {
        inputs.total_employees = shared.headcount();
    }

    fn evaluate(inputs: &Self::Inputs) -> Evaluation {
        let comparison = profit_per_employee(inputs);

        Evaluation::new(comparison.current.unwrap_or(0.0))
            .with_optional_detail("previous_profit_per_employee", comparison.previous)
            .with_optional_detail("change", comparison.change)
            .with_optional_detail("change_pct", comparison.change_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_against_prior_period() {
        let inputs = ProfitInputs {
            net_profit: 1_200_000.0,
            total_employees: 100.0,
            previous_net_profit: 800_000.0,
            previous_employees: 80.0,
        };
        let comparison = profit_per_employee(&inputs);
        assert_eq!(comparison.current, Some(12_000.0));
        assert_eq!(comparison.previous, Some(10_000.0));
        assert_eq!(comparison.change, Some(2_000.0));
        assert_eq!(comparison.change_pct, Some(20.0));
    }

    #[test]
    fn zero_headcount_has_no_profit_figure() {
        let mut inputs = ProfitCalculator::defaults(&SharedInputs::default());
        inputs.total_employees = 0.0;
        let evaluation = ProfitCalculator::evaluate(&inputs);
        assert_eq!(evaluation.result, 0.0);
        assert!(evaluation.result.is_finite());
        assert!(!evaluation.details.contains_key("change"));
        assert!(evaluation.details.contains_key("previous_profit_per_employee"));
    }
}
