use serde::Serialize;

use crate::calculators::domain::CalculatorKind;

/// Whether a dashboard figure came from a calculator or a benchmark fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Calculator,
    Benchmark,
}

impl DataSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calculator => "Your figures",
            Self::Benchmark => "Industry benchmark",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CostEntry {
    pub kind: CalculatorKind,
    pub label: &'static str,
    pub annual_cost: f64,
    pub share_of_total_pct: f64,
    /// Bar length relative to the largest cost on the dashboard.
    pub bar_width_pct: f64,
    pub source: DataSource,
    pub action: &'static str,
    pub action_detail: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_annual_cost: f64,
    pub cost_breakdown: Vec<CostEntry>,
    pub top_cost_drivers: Vec<CostEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_per_employee: Option<f64>,
    pub calculators_reporting: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absence_quick_win: Option<f64>,
    pub improvement_potential: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

/// Whole pounds with thousands separators, e.g. `£1,234,567`.
pub fn format_currency(amount: f64) -> String {
    let rounded = if amount.is_finite() {
        amount.round()
    } else {
        0.0
    };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("-£{grouped}")
    } else {
        format!("£{grouped}")
    }
}
