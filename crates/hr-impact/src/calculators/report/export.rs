use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use super::ImpactReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported report format '{0}'")]
    UnknownFormat(String),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("report is not valid utf-8: {0}")]
    Encoding(String),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct CostRow<'a> {
    rank: Option<usize>,
    calculator: &'a str,
    label: &'a str,
    annual_cost: f64,
    share_of_total_pct: f64,
    source: &'a str,
    action: &'a str,
}

/// Writes the cost breakdown, one row per cost area, followed by a total row.
pub fn write_csv<W: Write>(report: &ImpactReport, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    for entry in &report.dashboard.cost_breakdown {
        let rank = report
            .priority_areas
            .iter()
            .find(|area| area.kind == entry.kind)
            .map(|area| area.rank);

        csv.serialize(CostRow {
            rank,
            calculator: entry.kind.id(),
            label: entry.label,
            annual_cost: entry.annual_cost.round(),
            share_of_total_pct: (entry.share_of_total_pct * 10.0).round() / 10.0,
            source: entry.source.label(),
            action: entry.action,
        })?;
    }

    csv.serialize(CostRow {
        rank: None,
        calculator: "total",
        label: "Total Annual Cost",
        annual_cost: report.dashboard.total_annual_cost.round(),
        share_of_total_pct: 100.0,
        source: "",
        action: "",
    })?;

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn csv_lists_each_cost_area_and_total() {
        let report = ImpactReport::from_records(
            Vec::new(),
            None,
            NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        );
        let mut buffer = Vec::new();
        write_csv(&report, &mut buffer).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf-8");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "rank,calculator,label,annual_cost,share_of_total_pct,source,action"
        );
        // Five cost areas plus the total row.
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("2,communication,Communication Cost,480000"));
        assert!(lines[6].starts_with(",total,Total Annual Cost,1824807"));
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("CSV".parse::<ReportFormat>().expect("csv"), ReportFormat::Csv);
        assert!(matches!(
            "pdf".parse::<ReportFormat>(),
            Err(ExportError::UnknownFormat(format)) if format == "pdf"
        ));
    }
}
