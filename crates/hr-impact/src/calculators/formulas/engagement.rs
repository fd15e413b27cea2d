use serde::{Deserialize, Serialize};

use super::{Calculator, Evaluation};
use crate::calculators::domain::{CalculatorKind, SharedField, SharedInputs};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementInputs {
    pub total_employees: f64,
    pub avg_salary: f64,
    /// Percentage of the workforce that is engaged (Gallup UK average: 33%).
    pub engagement_rate: f64,
    /// Productivity lost by each disengaged employee, as a percentage.
    pub productivity_loss: f64,
}

/// Disengaged headcount, rounded half away from zero.
pub fn disengaged_employees(total_employees: f64, engagement_rate: f64) -> f64 {
    (total_employees * (100.0 - engagement_rate) / 100.0).round()
}

pub fn engagement_loss(
    total_employees: f64,
    avg_salary: f64,
    engagement_rate: f64,
    productivity_loss: f64,
) -> f64 {
    disengaged_employees(total_employees, engagement_rate) * avg_salary * (productivity_loss / 100.0)
}

pub struct EngagementCalculator;

impl Calculator for EngagementCalculator {
    const KIND: CalculatorKind = CalculatorKind::Engagement;
    const SHARED_FIELDS: &'static [(&'static str, SharedField)] = &[
        ("total_employees", SharedField::TotalEmployees),
        ("avg_salary", SharedField::AvgSalary),
    ];

    type Inputs = EngagementInputs;

    fn defaults(shared: &SharedInputs) -> Self::Inputs {
        EngagementInputs {
            total_employees: shared.headcount(),
            avg_salary: shared.avg_salary,
            engagement_rate: 33.0,
            productivity_loss: 25.0,
        }
    }

    fn sync_shared(inputs: &mut Self::Inputs, shared: &SharedInputs) {
        inputs.total_employees = shared.headcount();
        inputs.avg_salary = shared.avg_salary;
    }

    fn evaluate(inputs: &Self::Inputs) -> Evaluation {
        let disengaged = disengaged_employees(inputs.total_employees, inputs.engagement_rate);
        let loss = disengaged * inputs.avg_salary * (inputs.productivity_loss / 100.0);

        Evaluation::new(loss).with_detail("disengaged_employees", disengaged)
    }
}
