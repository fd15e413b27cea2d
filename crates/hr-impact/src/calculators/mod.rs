//! HR cost calculators sharing headcount and salary through one store.
//!
//! Widgets recompute on every input change and publish their latest result
//! to the [`ResultsRegistry`]; the dashboard, ROI projections and the impact
//! report all read from that registry.

pub mod dashboard;
pub mod domain;
pub mod formulas;
pub mod input;
pub mod registry;
pub mod report;
pub mod roi;
pub mod router;
pub mod store;
pub mod suite;
pub mod widget;

#[cfg(test)]
mod tests;

pub use dashboard::{
    format_currency, CostEntry, DashboardInsights, DashboardSummary, DataSource, FinancialSummary,
};
pub use domain::{CalculatorError, CalculatorKind, SharedField, SharedInputs, SharedInputsPatch};
pub use formulas::{Calculator, Evaluation};
pub use input::{parse_amount, ratio, InputError, InputPolicy};
pub use registry::{CalculatorRecord, ResultsRegistry};
pub use report::{ExportError, ImpactReport, PriorityArea, ReportFormat, ReportRecipient, RootCause};
pub use roi::{RoiError, RoiOutcome, RoiProgram, RoiProgramKind};
pub use router::calculator_router;
pub use store::{SharedInputStore, SubscriptionId};
pub use suite::CalculatorSuite;
pub use widget::CalculatorWidget;
