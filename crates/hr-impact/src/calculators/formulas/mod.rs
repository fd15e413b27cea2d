//! The six cost formulas behind the impact lab calculators.
//!
//! Each formula is a pure function of its inputs. The [`Calculator`] trait
//! binds a formula to its input struct, its defaults and the inputs it
//! shares with the [`SharedInputStore`](super::SharedInputStore).

mod absence;
mod communication;
mod engagement;
mod profit;
mod service;
mod turnover;

pub use absence::{absence_cost, AbsenceCalculator, AbsenceInputs};
pub use communication::{communication_loss, CommunicationCalculator, CommunicationInputs};
pub use engagement::{
    disengaged_employees, engagement_loss, EngagementCalculator, EngagementInputs,
};
pub use profit::{profit_per_employee, ProfitCalculator, ProfitComparison, ProfitInputs};
pub use service::{service_loss, ServiceLossBreakdown, ServiceLossCalculator, ServiceLossInputs};
pub use turnover::{turnover_cost, TurnoverCalculator, TurnoverInputs};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::domain::{CalculatorError, CalculatorKind, SharedField, SharedInputs};
use super::registry::CalculatorRecord;

/// A calculator formula together with the shape of its inputs.
pub trait Calculator: Send + Sync + 'static {
    const KIND: CalculatorKind;

    /// Input fields mirrored from the shared store.
    const SHARED_FIELDS: &'static [(&'static str, SharedField)];

    type Inputs: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn defaults(shared: &SharedInputs) -> Self::Inputs;

    fn sync_shared(inputs: &mut Self::Inputs, shared: &SharedInputs);

    fn evaluate(inputs: &Self::Inputs) -> Evaluation;

    fn shared_field(field: &str) -> Option<SharedField> {
        Self::SHARED_FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, shared)| *shared)
    }

    fn record(inputs: &Self::Inputs) -> CalculatorRecord {
        let evaluation = Self::evaluate(inputs);
        CalculatorRecord::new(
            Self::KIND,
            evaluation.result,
            input_map(inputs),
            evaluation.details,
        )
    }
}

/// Headline result plus any secondary figures worth displaying.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    pub result: f64,
    pub details: BTreeMap<String, f64>,
}

impl Evaluation {
    /// Non-finite results collapse to zero so records stay displayable.
    pub fn new(result: f64) -> Self {
        Self {
            result: if result.is_finite() { result } else { 0.0 },
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, name: &str, value: f64) -> Self {
        if value.is_finite() {
            self.details.insert(name.to_string(), value);
        }
        self
    }

    pub fn with_optional_detail(self, name: &str, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.with_detail(name, value),
            None => self,
        }
    }
}

pub(crate) fn input_map<T: Serialize>(inputs: &T) -> BTreeMap<String, f64> {
    match serde_json::to_value(inputs) {
        Ok(Value::Object(fields)) => fields
            .into_iter()
            .filter_map(|(name, value)| value.as_f64().map(|number| (name, number)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// Overwrites one named field of a calculator's input struct.
pub(crate) fn set_field<T>(
    kind: CalculatorKind,
    inputs: &mut T,
    field: &str,
    value: f64,
) -> Result<(), CalculatorError>
where
    T: Serialize + DeserializeOwned,
{
    let unknown = || CalculatorError::UnknownField {
        calculator: kind,
        field: field.to_string(),
    };

    let mut fields = match serde_json::to_value(&*inputs) {
        Ok(Value::Object(fields)) => fields,
        _ => return Err(unknown()),
    };

    match fields.get_mut(field) {
        Some(slot) => *slot = Value::from(value),
        None => return Err(unknown()),
    }

    *inputs = serde_json::from_value(Value::Object(fields)).map_err(|_| unknown())?;
    Ok(())
}

/// Field names accepted by a calculator, sorted by name.
pub fn field_names<C: Calculator>() -> Vec<String> {
    match serde_json::to_value(C::defaults(&SharedInputs::default())) {
        Ok(Value::Object(fields)) => fields.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
