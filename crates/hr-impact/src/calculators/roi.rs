//! Return on investment for the four improvement programs.
//!
//! Programs can be built explicitly or seeded from whatever the calculators
//! have already captured, falling back to the landing page defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::domain::{CalculatorKind, SharedInputs};
use super::formulas::{communication_loss, ServiceLossInputs};
use super::input::ratio;
use super::registry::{CalculatorRecord, ResultsRegistry};
use super::store::SharedInputStore;

/// Annual hours used to turn a salary into an hourly rate.
const WORKING_HOURS_PER_YEAR: f64 = 1_920.0;
const TRAINING_HOURS_PER_EMPLOYEE: f64 = 8.0;
/// Productivity lost by each employee who is not fully engaged.
const NON_ENGAGED_PRODUCTIVITY_LOSS: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiProgramKind {
    CommunicationTraining,
    EngagementProgram,
    RetentionProgram,
    QualityProgram,
}

impl RoiProgramKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::CommunicationTraining,
            Self::EngagementProgram,
            Self::RetentionProgram,
            Self::QualityProgram,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::CommunicationTraining => "communication_training",
            Self::EngagementProgram => "engagement_program",
            Self::RetentionProgram => "retention_program",
            Self::QualityProgram => "quality_program",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CommunicationTraining => "Communication Training",
            Self::EngagementProgram => "Engagement Program",
            Self::RetentionProgram => "Retention Program",
            Self::QualityProgram => "Quality & Service Program",
        }
    }
}

impl fmt::Display for RoiProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RoiProgramKind {
    type Err = RoiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| RoiError::UnknownProgram(value.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RoiError {
    #[error("unknown ROI program '{0}'")]
    UnknownProgram(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationTrainingInputs {
    pub employees: f64,
    pub avg_salary: f64,
    pub productivity_loss: f64,
    pub training_cost: f64,
    pub improvement_target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementProgramInputs {
    pub employees: f64,
    pub avg_salary: f64,
    pub engagement_rate: f64,
    pub target_engagement_rate: f64,
    pub program_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionProgramInputs {
    pub annual_departures: f64,
    pub replacement_cost: f64,
    pub program_cost: f64,
    /// Departures the program is expected to prevent each year.
    pub target_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityProgramInputs {
    pub lost_customers_per_day: f64,
    pub locations: f64,
    pub avg_revenue_per_customer: f64,
    pub working_days_per_year: f64,
    pub quality_failure_rate: f64,
    pub rework_cost_per_incident: f64,
    pub program_cost: f64,
    /// Percentage of the annual loss the program is expected to remove.
    pub target_reduction: f64,
}

/// A program and its inputs, tagged by `program` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "program", rename_all = "snake_case")]
pub enum RoiProgram {
    CommunicationTraining(CommunicationTrainingInputs),
    EngagementProgram(EngagementProgramInputs),
    RetentionProgram(RetentionProgramInputs),
    QualityProgram(QualityProgramInputs),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiOutcome {
    pub program: RoiProgramKind,
    pub program_label: &'static str,
    pub annual_loss: f64,
    pub total_investment: f64,
    pub annual_savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<f64>,
}

impl RoiProgram {
    pub fn kind(&self) -> RoiProgramKind {
        match self {
            Self::CommunicationTraining(_) => RoiProgramKind::CommunicationTraining,
            Self::EngagementProgram(_) => RoiProgramKind::EngagementProgram,
            Self::RetentionProgram(_) => RoiProgramKind::RetentionProgram,
            Self::QualityProgram(_) => RoiProgramKind::QualityProgram,
        }
    }

    /// Builds a program from the shared inputs and the latest calculator records.
    pub fn seeded(kind: RoiProgramKind, shared: &SharedInputs, records: &[CalculatorRecord]) -> Self {
        let input = |calculator: CalculatorKind, field: &str, fallback: f64| {
            records
                .iter()
                .find(|record| record.kind == calculator)
                .and_then(|record| record.input(field))
                .unwrap_or(fallback)
        };
        let service = ServiceLossInputs::default();

        match kind {
            RoiProgramKind::CommunicationTraining => {
                Self::CommunicationTraining(CommunicationTrainingInputs {
                    employees: shared.headcount(),
                    avg_salary: shared.avg_salary,
                    productivity_loss: input(CalculatorKind::Communication, "loss_percentage", 12.0),
                    training_cost: 30_000.0,
                    improvement_target: 25.0,
                })
            }
            RoiProgramKind::EngagementProgram => Self::EngagementProgram(EngagementProgramInputs {
                employees: shared.headcount(),
                avg_salary: shared.avg_salary,
                engagement_rate: input(CalculatorKind::Engagement, "engagement_rate", 33.0),
                target_engagement_rate: 60.0,
                program_cost: 75_000.0,
            }),
            RoiProgramKind::RetentionProgram => {
                let replacement_pct =
                    input(CalculatorKind::Turnover, "replacement_cost_percentage", 100.0);
                Self::RetentionProgram(RetentionProgramInputs {
                    annual_departures: input(CalculatorKind::Turnover, "leavers", 10.0),
                    replacement_cost: shared.avg_salary * replacement_pct / 100.0,
                    program_cost: 100_000.0,
                    target_reduction: 5.0,
                })
            }
            RoiProgramKind::QualityProgram => Self::QualityProgram(QualityProgramInputs {
                lost_customers_per_day: input(
                    CalculatorKind::Service,
                    "lost_customers_per_day",
                    service.lost_customers_per_day,
                ),
                locations: input(CalculatorKind::Service, "locations", service.locations),
                avg_revenue_per_customer: input(
                    CalculatorKind::Service,
                    "avg_revenue_per_customer",
                    service.avg_revenue_per_customer,
                ),
                working_days_per_year: input(
                    CalculatorKind::Service,
                    "working_days_per_year",
                    service.working_days_per_year,
                ),
                quality_failure_rate: input(
                    CalculatorKind::Service,
                    "quality_failure_rate",
                    service.quality_failure_rate,
                ),
                rework_cost_per_incident: input(
                    CalculatorKind::Service,
                    "rework_cost_per_incident",
                    service.rework_cost_per_incident,
                ),
                program_cost: 50_000.0,
                target_reduction: 35.0,
            }),
        }
    }

    pub fn from_store(kind: RoiProgramKind, store: &SharedInputStore, registry: &ResultsRegistry) -> Self {
        Self::seeded(kind, &store.read(), &registry.all())
    }

    pub fn evaluate(&self) -> RoiOutcome {
        let (annual_loss, total_investment, annual_savings) = match self {
            Self::CommunicationTraining(inputs) => {
                let annual_loss =
                    communication_loss(inputs.employees, inputs.avg_salary, inputs.productivity_loss);
                let employee_time_cost = inputs.employees
                    * TRAINING_HOURS_PER_EMPLOYEE
                    * (inputs.avg_salary / WORKING_HOURS_PER_YEAR);
                let investment = inputs.training_cost + employee_time_cost;
                let savings = annual_loss * inputs.improvement_target / 100.0;
                (annual_loss, investment, savings)
            }
            Self::EngagementProgram(inputs) => {
                let current = non_engaged_loss(inputs.employees, inputs.avg_salary, inputs.engagement_rate);
                let target = non_engaged_loss(
                    inputs.employees,
                    inputs.avg_salary,
                    inputs.target_engagement_rate,
                );
                (current, inputs.program_cost, current - target)
            }
            Self::RetentionProgram(inputs) => (
                inputs.annual_departures * inputs.replacement_cost,
                inputs.program_cost,
                inputs.target_reduction * inputs.replacement_cost,
            ),
            Self::QualityProgram(inputs) => {
                let daily_revenue_loss = inputs.lost_customers_per_day
                    * inputs.locations
                    * inputs.avg_revenue_per_customer;
                let daily_quality_loss =
                    inputs.quality_failure_rate * inputs.locations * inputs.rework_cost_per_incident;
                let annual_loss =
                    (daily_revenue_loss + daily_quality_loss) * inputs.working_days_per_year;
                let savings = annual_loss * inputs.target_reduction / 100.0;
                (annual_loss, inputs.program_cost, savings)
            }
        };

        let kind = self.kind();
        RoiOutcome {
            program: kind,
            program_label: kind.label(),
            annual_loss,
            total_investment,
            annual_savings,
            roi_pct: ratio((annual_savings - total_investment) * 100.0, total_investment),
            payback_months: ratio(total_investment * 12.0, annual_savings),
        }
    }
}

fn non_engaged_loss(employees: f64, avg_salary: f64, engagement_rate: f64) -> f64 {
    let fully_engaged = (employees * engagement_rate / 100.0).round();
    (employees - fully_engaged) * avg_salary * NON_ENGAGED_PRODUCTIVITY_LOSS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_outcome(
        kind: RoiProgramKind,
        shared: &SharedInputs,
        records: &[CalculatorRecord],
    ) -> RoiOutcome {
        RoiProgram::seeded(kind, shared, records).evaluate()
    }

    #[test]
    fn communication_training_defaults() {
        let outcome = seeded_outcome(
            RoiProgramKind::CommunicationTraining,
            &SharedInputs::default(),
            &[],
        );
        assert_eq!(outcome.annual_loss, 480_000.0);
        // 100 staff × 8h × (40 000 / 1 920) = 16 666.67 of paid time.
        assert!((outcome.total_investment - 46_666.67).abs() < 0.01);
        assert_eq!(outcome.annual_savings, 120_000.0);
        let roi = outcome.roi_pct.expect("investment is positive");
        assert!((roi - 157.14).abs() < 0.01);
        let payback = outcome.payback_months.expect("savings are positive");
        assert!((payback - 4.67).abs() < 0.01);
    }

    #[test]
    fn engagement_program_compares_current_and_target() {
        let outcome = seeded_outcome(
            RoiProgramKind::EngagementProgram,
            &SharedInputs::default(),
            &[],
        );
        // 67 non-engaged today, 40 at the 60% target.
        assert_eq!(outcome.annual_loss, 670_000.0);
        assert_eq!(outcome.annual_savings, 270_000.0);
        assert_eq!(outcome.roi_pct, Some(260.0));
    }

    #[test]
    fn retention_program_uses_turnover_inputs() {
        let outcome = seeded_outcome(
            RoiProgramKind::RetentionProgram,
            &SharedInputs::default(),
            &[],
        );
        assert_eq!(outcome.annual_loss, 400_000.0);
        assert_eq!(outcome.annual_savings, 200_000.0);
        assert_eq!(outcome.roi_pct, Some(100.0));
        assert_eq!(outcome.payback_months, Some(6.0));
    }

    #[test]
    fn zero_cost_program_has_no_roi_figure() {
        let program = RoiProgram::RetentionProgram(RetentionProgramInputs {
            annual_departures: 0.0,
            replacement_cost: 0.0,
            program_cost: 0.0,
            target_reduction: 0.0,
        });
        let outcome = program.evaluate();
        assert_eq!(outcome.roi_pct, None);
        assert_eq!(outcome.payback_months, None);
    }

    #[test]
    fn program_ids_parse_with_dashes() {
        assert_eq!(
            "quality-program".parse::<RoiProgramKind>().expect("known program"),
            RoiProgramKind::QualityProgram
        );
        assert!("bonus_scheme".parse::<RoiProgramKind>().is_err());
    }
}
