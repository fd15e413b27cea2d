use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::input::InputError;

/// Calculators offered on the impact lab, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Communication,
    Engagement,
    Turnover,
    Absence,
    Service,
    Profit,
}

impl CalculatorKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Communication,
            Self::Engagement,
            Self::Turnover,
            Self::Absence,
            Self::Service,
            Self::Profit,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Communication => "communication",
            Self::Engagement => "engagement",
            Self::Turnover => "turnover",
            Self::Absence => "absence",
            Self::Service => "service",
            Self::Profit => "profit",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Communication => "Communication Cost",
            Self::Engagement => "Engagement Loss",
            Self::Turnover => "Turnover Cost",
            Self::Absence => "Absence Cost",
            Self::Service => "Service Loss",
            Self::Profit => "Profit per Employee",
        }
    }

    /// Profit per employee is a performance figure, not a cost, so it never
    /// contributes to dashboard totals.
    pub const fn is_cost(self) -> bool {
        !matches!(self, Self::Profit)
    }

    /// Figure shown when a calculator has not been used yet.
    pub const fn benchmark(self) -> f64 {
        match self {
            Self::Communication => 480_000.0,
            Self::Engagement => 670_000.0,
            Self::Turnover => 400_000.0,
            Self::Absence => 92_307.0,
            Self::Service => 182_500.0,
            Self::Profit => 20_000.0,
        }
    }

    pub const fn action(self) -> &'static str {
        match self {
            Self::Communication => "Improve Communication",
            Self::Engagement => "Address Engagement Crisis",
            Self::Turnover => "Retention Strategy",
            Self::Absence => "Reduce Absenteeism",
            Self::Service => "Quality Improvement",
            Self::Profit => "Track Profit per Head",
        }
    }

    pub const fn action_detail(self) -> &'static str {
        match self {
            Self::Communication => "Implement clear communication standards and training",
            Self::Engagement => "Start with pulse surveys and manager training",
            Self::Turnover => "Focus on career development and recognition programs",
            Self::Absence => "Implement wellness programs and flexible working",
            Self::Service => "Enhance training and service standards",
            Self::Profit => "Compare before and after each intervention",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalculatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| CalculatorError::UnknownCalculator(value.to_string()))
    }
}

/// Headcount and salary defaulted into every calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedInputs {
    pub total_employees: u32,
    pub avg_salary: f64,
}

impl Default for SharedInputs {
    fn default() -> Self {
        Self {
            total_employees: 100,
            avg_salary: 40_000.0,
        }
    }
}

impl SharedInputs {
    /// Merges the populated fields of `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: &SharedInputsPatch) {
        if let Some(total_employees) = patch.total_employees {
            self.total_employees = total_employees;
        }
        if let Some(avg_salary) = patch.avg_salary {
            self.avg_salary = avg_salary;
        }
    }

    pub fn headcount(&self) -> f64 {
        f64::from(self.total_employees)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedInputsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_employees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_salary: Option<f64>,
}

impl SharedInputsPatch {
    pub fn is_empty(&self) -> bool {
        self.total_employees.is_none() && self.avg_salary.is_none()
    }
}

/// The two store-backed fields a calculator input can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedField {
    TotalEmployees,
    AvgSalary,
}

impl SharedField {
    /// Headcounts are whole people; salaries pass through untouched.
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Self::TotalEmployees => value.max(0.0).round().min(f64::from(u32::MAX)),
            Self::AvgSalary => value,
        }
    }

    pub fn patch(self, value: f64) -> SharedInputsPatch {
        match self {
            Self::TotalEmployees => SharedInputsPatch {
                total_employees: Some(self.normalize(value) as u32),
                avg_salary: None,
            },
            Self::AvgSalary => SharedInputsPatch {
                total_employees: None,
                avg_salary: Some(value),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalculatorError {
    #[error("unknown calculator '{0}'")]
    UnknownCalculator(String),
    #[error("{calculator} calculator has no input named '{field}'")]
    UnknownField {
        calculator: CalculatorKind,
        field: String,
    },
    #[error("invalid value for {calculator}.{field}: {source}")]
    InvalidInput {
        calculator: CalculatorKind,
        field: String,
        #[source]
        source: InputError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_ids() {
        for kind in CalculatorKind::ordered() {
            let parsed: CalculatorKind = kind.id().parse().expect("known id parses");
            assert_eq!(parsed, kind);
        }
        assert_eq!(
            " Turnover ".parse::<CalculatorKind>().expect("case insensitive"),
            CalculatorKind::Turnover
        );
        assert!(matches!(
            "payroll".parse::<CalculatorKind>(),
            Err(CalculatorError::UnknownCalculator(name)) if name == "payroll"
        ));
    }

    #[test]
    fn only_profit_is_excluded_from_costs() {
        let costs: Vec<_> = CalculatorKind::ordered()
            .into_iter()
            .filter(|kind| kind.is_cost())
            .collect();
        assert_eq!(costs.len(), 5);
        assert!(!costs.contains(&CalculatorKind::Profit));
    }

    #[test]
    fn merge_leaves_absent_fields_untouched() {
        let mut shared = SharedInputs::default();
        shared.merge(&SharedInputsPatch {
            total_employees: Some(250),
            avg_salary: None,
        });
        assert_eq!(shared.total_employees, 250);
        assert_eq!(shared.avg_salary, 40_000.0);
    }

    #[test]
    fn headcount_patches_round_to_whole_people() {
        let patch = SharedField::TotalEmployees.patch(12.6);
        assert_eq!(patch.total_employees, Some(13));
        assert_eq!(SharedField::TotalEmployees.normalize(-4.0), 0.0);
    }
}
