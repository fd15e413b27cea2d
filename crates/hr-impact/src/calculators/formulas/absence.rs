use serde::{Deserialize, Serialize};

use super::{Calculator, Evaluation};
use crate::calculators::domain::{CalculatorKind, SharedField, SharedInputs};
use crate::calculators::input::ratio;

/// Working days in a UK year once weekends are removed.
pub const DEFAULT_WORKING_DAYS: f64 = 260.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceInputs {
    pub employees: f64,
    pub avg_salary: f64,
    pub avg_absence_days: f64,
    pub working_days: f64,
}

/// `(salary / working_days) × absence_days × staff`, or `None` without working days.
pub fn absence_cost(
    employees: f64,
    avg_salary: f64,
    avg_absence_days: f64,
    working_days: f64,
) -> Option<f64> {
    ratio(avg_salary, working_days).map(|daily_rate| daily_rate * avg_absence_days * employees)
}

pub struct AbsenceCalculator;

impl Calculator for AbsenceCalculator {
    const KIND: CalculatorKind = CalculatorKind::Absence;
    const SHARED_FIELDS: &'static [(&'static str, SharedField)] = &[
        ("employees", SharedField::TotalEmployees),
        ("avg_salary", SharedField::AvgSalary),
    ];

    type Inputs = AbsenceInputs;

    fn defaults(shared: &SharedInputs) -> Self::Inputs {
        AbsenceInputs {
            employees: shared.headcount(),
            avg_salary: shared.avg_salary,
            avg_absence_days: 6.0,
            working_days: DEFAULT_WORKING_DAYS,
        }
    }

    fn sync_shared(inputs: &mut Self::Inputs, shared: &SharedInputs) {
        inputs.employees = shared.headcount();
        inputs.avg_salary = shared.avg_salary;
    }

    fn evaluate(inputs: &Self::Inputs) -> Evaluation {
        let daily_rate = ratio(inputs.avg_salary, inputs.working_days);
        let cost = absence_cost(
            inputs.employees,
            inputs.avg_salary,
            inputs.avg_absence_days,
            inputs.working_days,
        );

        Evaluation::new(cost.unwrap_or(0.0))
            .with_optional_detail("daily_salary_rate", daily_rate)
            .with_detail("days_lost", inputs.avg_absence_days * inputs.employees)
    }
}
