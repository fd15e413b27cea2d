use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::calculators::{
    calculator_router, CalculatorKind, CalculatorSuite, InputPolicy, SharedInputs,
};

pub(super) fn shared_inputs(total_employees: u32, avg_salary: f64) -> SharedInputs {
    SharedInputs {
        total_employees,
        avg_salary,
    }
}

pub(super) fn lenient_suite() -> CalculatorSuite {
    CalculatorSuite::new(SharedInputs::default(), InputPolicy::Lenient)
}

/// Lenient suite with every calculator opened once.
pub(super) fn activated_suite() -> CalculatorSuite {
    let suite = lenient_suite();
    for kind in CalculatorKind::ordered() {
        suite.activate(kind);
    }
    suite
}

pub(super) fn strict_suite() -> CalculatorSuite {
    CalculatorSuite::new(SharedInputs::default(), InputPolicy::Strict)
}

pub(super) fn router_with_suite(suite: CalculatorSuite) -> (Arc<CalculatorSuite>, Router) {
    let suite = Arc::new(suite);
    let router = calculator_router(Arc::clone(&suite));
    (suite, router)
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}
