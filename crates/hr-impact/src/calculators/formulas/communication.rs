use serde::{Deserialize, Serialize};

use super::{Calculator, Evaluation};
use crate::calculators::domain::{CalculatorKind, SharedField, SharedInputs};

/// Share of salary cost lost to poor communication (Gallup/Holmes: 10-18%).
pub const DEFAULT_LOSS_PERCENTAGE: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationInputs {
    pub employees: f64,
    pub avg_salary: f64,
    pub loss_percentage: f64,
}

pub fn communication_loss(employees: f64, avg_salary: f64, loss_percentage: f64) -> f64 {
    employees * avg_salary * (loss_percentage / 100.0)
}

pub struct CommunicationCalculator;

impl Calculator for CommunicationCalculator {
    const KIND: CalculatorKind = CalculatorKind::Communication;
    const SHARED_FIELDS: &'static [(&'static str, SharedField)] = &[
        ("employees", SharedField::TotalEmployees),
        ("avg_salary", SharedField::AvgSalary),
    ];

    type Inputs = CommunicationInputs;

    fn defaults(shared: &SharedInputs) -> Self::Inputs {
        CommunicationInputs {
            employees: shared.headcount(),
            avg_salary: shared.avg_salary,
            loss_percentage: DEFAULT_LOSS_PERCENTAGE,
        }
    }

    fn sync_shared(inputs: &mut Self::Inputs, shared: &SharedInputs) {
        inputs.employees = shared.headcount();
        inputs.avg_salary = shared.avg_salary;
    }

    fn evaluate(inputs: &Self::Inputs) -> Evaluation {
        Evaluation::new(communication_loss(
            inputs.employees,
            inputs.avg_salary,
            inputs.loss_percentage,
        ))
    }
}
