use serde::{Deserialize, Serialize};

use super::{Calculator, Evaluation};
use crate::calculators::domain::{CalculatorKind, SharedField, SharedInputs};

/// Retention rate the service calculator treats as best practice.
pub const RETENTION_BENCHMARK_PCT: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLossInputs {
    pub lost_customers_per_day: f64,
    pub locations: f64,
    pub avg_revenue_per_customer: f64,
    pub working_days_per_year: f64,
    /// Quality failures per location per day.
    pub quality_failure_rate: f64,
    pub rework_cost_per_incident: f64,
    pub customer_retention_rate: f64,
    pub avg_customer_lifetime_value: f64,
}

impl Default for ServiceLossInputs {
    fn default() -> Self {
        Self {
            lost_customers_per_day: 10.0,
            locations: 1.0,
            avg_revenue_per_customer: 50.0,
            working_days_per_year: 365.0,
            quality_failure_rate: 5.0,
            rework_cost_per_incident: 150.0,
            customer_retention_rate: 85.0,
            avg_customer_lifetime_value: 1_200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceLossBreakdown {
    pub daily_revenue_loss: f64,
    pub annual_revenue_loss: f64,
    pub annual_quality_loss: f64,
    pub annual_retention_loss: f64,
    pub total_annual_loss: f64,
}

pub fn service_loss(inputs: &ServiceLossInputs) -> ServiceLossBreakdown {
    let days = inputs.working_days_per_year;
    let daily_revenue_loss =
        inputs.lost_customers_per_day * inputs.locations * inputs.avg_revenue_per_customer;
    let annual_revenue_loss = daily_revenue_loss * days;

    let daily_quality_loss =
        inputs.quality_failure_rate * inputs.locations * inputs.rework_cost_per_incident;
    let annual_quality_loss = daily_quality_loss * days;

    let retention_gap = (RETENTION_BENCHMARK_PCT - inputs.customer_retention_rate).max(0.0);
    let annual_retention_loss = retention_gap
        * inputs.avg_customer_lifetime_value
        * inputs.lost_customers_per_day
        * days
        / 100.0;

    ServiceLossBreakdown {
        daily_revenue_loss,
        annual_revenue_loss,
        annual_quality_loss,
        annual_retention_loss,
        total_annual_loss: annual_revenue_loss + annual_quality_loss + annual_retention_loss,
    }
}

pub struct ServiceLossCalculator;

impl Calculator for ServiceLossCalculator {
    const KIND: CalculatorKind = CalculatorKind::Service;
    const SHARED_FIELDS: &'static [(&'static str, SharedField)] = &[];

    type Inputs = ServiceLossInputs;

    fn defaults(_shared: &SharedInputs) -> Self::Inputs {
        ServiceLossInputs::default()
    }

    fn sync_shared(_inputs: &mut Self::Inputs, _shared: &SharedInputs) {}

    fn evaluate(inputs: &Self::Inputs) -> Evaluation {
        let breakdown = service_loss(inputs);

        Evaluation::new(breakdown.total_annual_loss)
            .with_detail("daily_revenue_loss", breakdown.daily_revenue_loss)
            .with_detail("annual_revenue_loss", breakdown.annual_revenue_loss)
            .with_detail("annual_quality_loss", breakdown.annual_quality_loss)
            .with_detail("annual_retention_loss", breakdown.annual_retention_loss)
    }
}
