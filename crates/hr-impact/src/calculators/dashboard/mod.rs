mod financial;
mod insights;
mod summary;
pub mod views;

pub use financial::FinancialSummary;
pub use views::{format_currency, CostEntry, DashboardInsights, DashboardSummary, DataSource};

pub(crate) use insights::generate_insights;
