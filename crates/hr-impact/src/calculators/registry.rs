use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::CalculatorKind;

/// Latest published output of one calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorRecord {
    pub id: CalculatorKind,
    pub result: f64,
    pub inputs: BTreeMap<String, f64>,
    #[serde(rename = "type")]
    pub kind: CalculatorKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, f64>,
    pub timestamp: DateTime<Utc>,
}

impl CalculatorRecord {
    pub fn new(
        kind: CalculatorKind,
        result: f64,
        inputs: BTreeMap<String, f64>,
        details: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            id: kind,
            result,
            inputs,
            kind,
            details,
            timestamp: Utc::now(),
        }
    }

    pub fn input(&self, field: &str) -> Option<f64> {
        self.inputs.get(field).copied()
    }

    pub fn detail(&self, name: &str) -> Option<f64> {
        self.details.get(name).copied()
    }
}

/// Calculator id → latest record. Last write wins; entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct ResultsRegistry {
    records: Arc<RwLock<BTreeMap<CalculatorKind, CalculatorRecord>>>,
}

impl ResultsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, record: CalculatorRecord) {
        debug!(calculator = %record.kind, result = record.result, "calculator result published");
        self.records
            .write()
            .expect("registry lock poisoned")
            .insert(record.kind, record);
    }

    pub fn get(&self, kind: CalculatorKind) -> Option<CalculatorRecord> {
        self.records
            .read()
            .expect("registry lock poisoned")
            .get(&kind)
            .cloned()
    }

    /// Every record currently present, in dashboard order.
    pub fn all(&self) -> Vec<CalculatorRecord> {
        self.records
            .read()
            .expect("registry lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
