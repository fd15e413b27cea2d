//! Boundary between raw form text and calculator numbers.
//!
//! Every calculator field is a non-negative finite number. Raw text that
//! fails that contract is either coerced to zero (`Lenient`, the behaviour
//! users of the landing page expect while typing) or rejected (`Strict`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CalculatorError, CalculatorKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("value is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("value must be finite")]
    NotFinite,
    #[error("value must not be negative (got {0})")]
    Negative(String),
}

/// Parses a raw form value into a calculator amount.
pub fn parse_amount(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(InputError::NotFinite);
    }
    if value < 0.0 {
        return Err(InputError::Negative(trimmed.to_string()));
    }

    Ok(value)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Invalid input counts as zero.
    #[default]
    Lenient,
    /// Invalid input is reported back to the caller.
    Strict,
}

impl InputPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" | "zero" => Some(Self::Lenient),
            "strict" | "reject" => Some(Self::Strict),
            _ => None,
        }
    }

    pub fn resolve(
        self,
        calculator: CalculatorKind,
        field: &str,
        raw: &str,
    ) -> Result<f64, CalculatorError> {
        match (parse_amount(raw), self) {
            (Ok(value), _) => Ok(value),
            (Err(error), Self::Lenient) => {
                debug!(%calculator, field, %error, "input coerced to zero");
                Ok(0.0)
            }
            (Err(source), Self::Strict) => Err(CalculatorError::InvalidInput {
                calculator,
                field: field.to_string(),
                source,
            }),
        }
    }
}

/// `numerator / denominator`, or `None` when the denominator cannot divide.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        let value = numerator / denominator;
        value.is_finite().then_some(value)
    } else {
        None
    }
}
