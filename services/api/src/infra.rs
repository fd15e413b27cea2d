use chrono::NaiveDate;
use hr_impact::calculators::{CalculatorKind, CalculatorSuite, SharedInputsPatch};
use hr_impact::config::CalculatorConfig;
use hr_impact::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One `kind.field=value` override from the command line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assignment {
    pub(crate) kind: CalculatorKind,
    pub(crate) field: String,
    pub(crate) value: String,
}

pub(crate) fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected kind.field=value, got '{raw}'"))?;
    let (kind, field) = target
        .split_once('.')
        .ok_or_else(|| format!("expected kind.field=value, got '{raw}'"))?;

    let kind = kind.parse::<CalculatorKind>().map_err(|err| err.to_string())?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }

    Ok(Assignment {
        kind,
        field: field.to_string(),
        value: value.trim().to_string(),
    })
}

pub(crate) fn parse_kind(raw: &str) -> Result<CalculatorKind, String> {
    raw.trim()
        .parse::<CalculatorKind>()
        .map_err(|err| err.to_string())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Builds a suite from configuration, then applies shared overrides before
/// per-calculator assignments so the assignments win. Calculators that are
/// neither assigned nor opened stay unreported.
pub(crate) fn build_suite(
    config: &CalculatorConfig,
    patch: SharedInputsPatch,
    assignments: &[Assignment],
    opened: &[CalculatorKind],
) -> Result<CalculatorSuite, AppError> {
    if let Some(avg_salary) = patch.avg_salary {
        if !avg_salary.is_finite() || avg_salary < 0.0 {
            return Err(AppError::Usage(format!(
                "--avg-salary must be a non-negative number (got {avg_salary})"
            )));
        }
    }

    let suite = CalculatorSuite::from_config(config);
    if !patch.is_empty() {
        suite.update_shared(patch);
    }

    for assignment in assignments {
        suite.set_input(assignment.kind, &assignment.field, &assignment.value)?;
    }
    for kind in opened {
        suite.activate(*kind);
    }

    Ok(suite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_impact::calculators::InputPolicy;

    #[test]
    fn assignments_split_kind_field_and_value() {
        let assignment = parse_assignment("Service.locations = 3").expect("valid assignment");
        assert_eq!(assignment.kind, CalculatorKind::Service);
        assert_eq!(assignment.field, "locations");
        assert_eq!(assignment.value, "3");

        assert!(parse_assignment("service.locations").is_err());
        assert!(parse_assignment("payroll.total=1").is_err());
        assert!(parse_assignment("service.=1").is_err());
    }

    #[test]
    fn assignments_override_shared_patch() {
        let config = CalculatorConfig::default();
        let patch = SharedInputsPatch {
            total_employees: Some(80),
            avg_salary: None,
        };
        let assignments = vec![parse_assignment("turnover.employees=120").expect("valid")];

        let suite = build_suite(&config, patch, &assignments, &[]).expect("suite builds");
        assert_eq!(suite.shared_inputs().total_employees, 120);
        assert!(suite.record(CalculatorKind::Turnover).is_some());
        assert!(suite.record(CalculatorKind::Absence).is_none());
    }

    #[test]
    fn strict_config_surfaces_bad_assignments() {
        let config = CalculatorConfig {
            input_policy: InputPolicy::Strict,
            ..CalculatorConfig::default()
        };
        let assignments = vec![parse_assignment("absence.working_days=soon").expect("valid")];

        let err = build_suite(&config, SharedInputsPatch::default(), &assignments, &[])
            .err()
            .expect("strict policy rejects text");
        assert!(matches!(err, AppError::Calculator(_)));
    }

    #[test]
    fn opened_calculators_report_without_assignments() {
        let opened = [CalculatorKind::Service, CalculatorKind::Absence];
        let suite = build_suite(
            &CalculatorConfig::default(),
            SharedInputsPatch::default(),
            &[],
            &opened,
        )
        .expect("suite builds");

        assert_eq!(suite.records().len(), 2);
        assert!(suite.record(CalculatorKind::Communication).is_none());
        assert_eq!(parse_kind(" service "), Ok(CalculatorKind::Service));
        assert!(parse_kind("payroll").is_err());
    }

    #[test]
    fn dates_use_iso_format() {
        assert_eq!(
            parse_date("2025-03-14").expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
        );
        assert!(parse_date("14/03/2025").is_err());
    }
}
