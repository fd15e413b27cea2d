//! The downloadable impact plan: benchmark-filled dashboard, priority areas,
//! common root causes and the raw calculator records.

mod export;

pub use export::{write_csv, ExportError, ReportFormat};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dashboard::{DashboardInsights, DashboardSummary, DataSource};
use super::domain::CalculatorKind;
use super::registry::CalculatorRecord;
use super::suite::CalculatorSuite;

/// Who the plan was prepared for. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRecipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityArea {
    pub rank: usize,
    pub kind: CalculatorKind,
    pub label: &'static str,
    pub annual_cost: f64,
    pub source: DataSource,
    pub action: &'static str,
    pub action_detail: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RootCause {
    pub kind: CalculatorKind,
    pub area: &'static str,
    pub cause: &'static str,
    pub fix: &'static str,
    pub impact: &'static str,
}

impl RootCause {
    pub fn for_kind(kind: CalculatorKind) -> Self {
        let (area, cause, fix, impact) = match kind {
            CalculatorKind::Communication => (
                "Communication Issues",
                "Managers lack communication training and clear processes.",
                "Train managers on clear communication standards, implement weekly 1-on-1s.",
                "Reduces communication costs by 60-80%",
            ),
            CalculatorKind::Engagement => (
                "Low Engagement",
                "Employees don't understand their impact or see career progression.",
                "Create clear career pathways and regular recognition systems.",
                "Increases productivity 20-35%",
            ),
            CalculatorKind::Turnover => (
                "High Turnover",
                "Poor onboarding and lack of manager support.",
                "90-day structured onboarding with manager check-ins.",
                "Reduces turnover by 40-60%",
            ),
            CalculatorKind::Absence => (
                "Excessive Absence",
                "Work-life balance issues and unclear absence policies.",
                "Flexible working options and wellness support.",
                "Reduces unplanned absence 30-50%",
            ),
            CalculatorKind::Service => (
                "Service Quality Issues",
                "Insufficient training and unclear service standards.",
                "Regular skills training and customer service protocols.",
                "Improves service quality 40-70%",
            ),
            CalculatorKind::Profit => (
                "Low Profitability per Employee",
                "Misaligned goals and inefficient processes.",
                "Align individual goals with business outcomes.",
                "Increases profit per employee 15-25%",
            ),
        };

        Self {
            kind,
            area,
            cause,
            fix,
            impact,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    pub generated_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ReportRecipient>,
    pub dashboard: DashboardSummary,
    pub insights: DashboardInsights,
    pub priority_areas: Vec<PriorityArea>,
    pub root_causes: Vec<RootCause>,
    pub records: Vec<CalculatorRecord>,
}

impl ImpactReport {
    pub fn build(
        suite: &CalculatorSuite,
        recipient: Option<ReportRecipient>,
        generated_on: NaiveDate,
    ) -> Self {
        Self::from_records(suite.records(), recipient, generated_on)
    }

    pub fn from_records(
        records: Vec<CalculatorRecord>,
        recipient: Option<ReportRecipient>,
        generated_on: NaiveDate,
    ) -> Self {
        let dashboard = DashboardSummary::with_benchmarks(&records);
        let insights = dashboard.insights(&records);

        let priority_areas = dashboard
            .top_cost_drivers
            .iter()
            .enumerate()
            .map(|(index, entry)| PriorityArea {
                rank: index + 1,
                kind: entry.kind,
                label: entry.label,
                annual_cost: entry.annual_cost,
                source: entry.source,
                action: entry.action,
                action_detail: entry.action_detail,
            })
            .collect();

        let root_causes = CalculatorKind::ordered()
            .into_iter()
            .map(RootCause::for_kind)
            .collect();

        Self {
            generated_on,
            recipient,
            dashboard,
            insights,
            priority_areas,
            root_causes,
            records,
        }
    }

    pub fn company(&self) -> Option<&str> {
        self.recipient
            .as_ref()
            .and_then(|recipient| recipient.company.as_deref())
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }

    /// `HR_Impact_Plan_<company>`, or `HR_Impact_Plan_Report` when unnamed.
    pub fn file_stem(&self) -> String {
        format!("HR_Impact_Plan_{}", self.company().unwrap_or("Report"))
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(ExportError::from)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, ExportError> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => {
                let mut buffer = Vec::new();
                write_csv(self, &mut buffer)?;
                String::from_utf8(buffer).map_err(|err| ExportError::Encoding(err.to_string()))
            }
        }
    }
}
