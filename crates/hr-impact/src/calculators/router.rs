use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::dashboard::{DashboardInsights, DashboardSummary};
use super::domain::{CalculatorError, CalculatorKind, SharedInputsPatch};
use super::report::{ImpactReport, ReportRecipient};
use super::roi::{RoiProgram, RoiProgramKind};
use super::suite::CalculatorSuite;

/// Router builder exposing the calculators, dashboard, ROI and report endpoints.
pub fn calculator_router(suite: Arc<CalculatorSuite>) -> Router {
    Router::new()
        .route(
            "/api/v1/shared-inputs",
            get(shared_inputs_handler).patch(update_shared_inputs_handler),
        )
        .route("/api/v1/calculators", get(records_handler))
        .route("/api/v1/calculators/:kind", get(record_handler))
        .route("/api/v1/calculators/:kind/inputs", put(set_inputs_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        .route("/api/v1/financial-summary", get(financial_summary_handler))
        .route("/api/v1/roi", post(roi_handler))
        .route("/api/v1/roi/:program", get(seeded_roi_handler))
        .route("/api/v1/report", post(report_handler))
        .with_state(suite)
}

/// Form values arrive either as raw text or as JSON numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    fn as_raw(&self) -> Cow<'_, str> {
        match self {
            Self::Number(value) => Cow::Owned(value.to_string()),
            Self::Text(raw) => Cow::Borrowed(raw),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub benchmarks: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub insights: DashboardInsights,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub recipient: Option<ReportRecipient>,
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

pub(crate) async fn shared_inputs_handler(State(suite): State<Arc<CalculatorSuite>>) -> Response {
    (StatusCode::OK, axum::Json(suite.shared_inputs())).into_response()
}

pub(crate) async fn update_shared_inputs_handler(
    State(suite): State<Arc<CalculatorSuite>>,
    axum::Json(patch): axum::Json<SharedInputsPatch>,
) -> Response {
    if let Some(avg_salary) = patch.avg_salary {
        if !avg_salary.is_finite() || avg_salary < 0.0 {
            let payload = json!({
                "error": format!("avg_salary must be a non-negative number (got {avg_salary})"),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    }

    let shared = suite.update_shared(patch);
    (StatusCode::OK, axum::Json(shared)).into_response()
}

pub(crate) async fn records_handler(State(suite): State<Arc<CalculatorSuite>>) -> Response {
    (StatusCode::OK, axum::Json(suite.records())).into_response()
}

pub(crate) async fn record_handler(
    State(suite): State<Arc<CalculatorSuite>>,
    Path(kind): Path<String>,
) -> Response {
    let kind = match kind.parse::<CalculatorKind>() {
        Ok(kind) => kind,
        Err(error) => return calculator_error_response(error),
    };

    // Calculators that have not reported yet still answer with their current result.
    let record = suite.record(kind).unwrap_or_else(|| suite.snapshot(kind));
    (StatusCode::OK, axum::Json(record)).into_response()
}

pub(crate) async fn set_inputs_handler(
    State(suite): State<Arc<CalculatorSuite>>,
    Path(kind): Path<String>,
    axum::Json(values): axum::Json<BTreeMap<String, InputValue>>,
) -> Response {
    let kind = match kind.parse::<CalculatorKind>() {
        Ok(kind) => kind,
        Err(error) => return calculator_error_response(error),
    };

    let raws = values
        .iter()
        .map(|(field, value)| (field.as_str(), value.as_raw()));
    match suite.set_inputs(kind, raws) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => calculator_error_response(error),
    }
}

pub(crate) async fn dashboard_handler(
    State(suite): State<Arc<CalculatorSuite>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let records = suite.records();
    let summary = if query.benchmarks {
        DashboardSummary::with_benchmarks(&records)
    } else {
        DashboardSummary::from_records(&records)
    };
    let insights = summary.insights(&records);

    (
        StatusCode::OK,
        axum::Json(DashboardResponse { summary, insights }),
    )
        .into_response()
}

pub(crate) async fn financial_summary_handler(
    State(suite): State<Arc<CalculatorSuite>>,
) -> Response {
    (StatusCode::OK, axum::Json(suite.financial_summary())).into_response()
}

pub(crate) async fn seeded_roi_handler(
    State(suite): State<Arc<CalculatorSuite>>,
    Path(program): Path<String>,
) -> Response {
    match program.parse::<RoiProgramKind>() {
        Ok(kind) => {
            let program = RoiProgram::from_store(kind, suite.store(), suite.registry());
            (StatusCode::OK, axum::Json(program.evaluate())).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn roi_handler(axum::Json(program): axum::Json<RoiProgram>) -> Response {
    (StatusCode::OK, axum::Json(program.evaluate())).into_response()
}

pub(crate) async fn report_handler(
    State(suite): State<Arc<CalculatorSuite>>,
    request: Option<axum::Json<ReportRequest>>,
) -> Response {
    let ReportRequest {
        recipient,
        generated_on,
    } = request.map(|axum::Json(request)| request).unwrap_or_default();
    let generated_on = generated_on.unwrap_or_else(|| Local::now().date_naive());

    let report = ImpactReport::build(&suite, recipient, generated_on);
    (StatusCode::OK, axum::Json(report)).into_response()
}

fn calculator_error_response(error: CalculatorError) -> Response {
    let status = match error {
        CalculatorError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
        CalculatorError::UnknownField { .. } | CalculatorError::InvalidInput { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
