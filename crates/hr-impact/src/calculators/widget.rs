use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::domain::{CalculatorError, SharedInputs};
use super::formulas::{set_field, Calculator, Evaluation};
use super::input::{InputError, InputPolicy};
use super::registry::{CalculatorRecord, ResultsRegistry};
use super::store::{SharedInputStore, SubscriptionId};

/// One calculator's local inputs, bound to the shared store and the registry.
///
/// A widget stays out of the registry until it is first touched (`set_input`,
/// `set_value` or `publish`). From then on every change republishes its record.
/// Edits to shared fields go through the store instead, which resyncs every
/// subscribed widget (this one included); only active widgets republish.
pub struct CalculatorWidget<C: Calculator> {
    inputs: Arc<Mutex<C::Inputs>>,
    active: Arc<AtomicBool>,
    store: SharedInputStore,
    registry: ResultsRegistry,
    policy: InputPolicy,
    subscription: SubscriptionId,
    _calculator: PhantomData<C>,
}

impl<C: Calculator> CalculatorWidget<C> {
    pub fn new(store: SharedInputStore, registry: ResultsRegistry, policy: InputPolicy) -> Self {
        let inputs = Arc::new(Mutex::new(C::defaults(&store.read())));
        let active = Arc::new(AtomicBool::new(false));

        let subscription = {
            let inputs = Arc::clone(&inputs);
            let active = Arc::clone(&active);
            let registry = registry.clone();
            store.subscribe(move |shared: &SharedInputs| {
                let mut guard = inputs.lock().expect("widget inputs mutex poisoned");
                C::sync_shared(&mut guard, shared);
                if active.load(Ordering::Acquire) {
                    registry.publish(C::record(&guard));
                }
            })
        };

        Self {
            inputs,
            active,
            store,
            registry,
            policy,
            subscription,
            _calculator: PhantomData,
        }
    }

    pub fn inputs(&self) -> C::Inputs {
        self.inputs
            .lock()
            .expect("widget inputs mutex poisoned")
            .clone()
    }

    pub fn evaluation(&self) -> Evaluation {
        C::evaluate(&self.inputs())
    }

    /// Whether this widget publishes to the registry.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// The record the current inputs produce, without publishing it.
    pub fn snapshot(&self) -> CalculatorRecord {
        C::record(&self.inputs())
    }

    /// Parses `raw` under the widget's input policy and applies it.
    pub fn set_input(&self, field: &str, raw: &str) -> Result<CalculatorRecord, CalculatorError> {
        let value = self.policy.resolve(C::KIND, field, raw)?;
        self.set_value(field, value)
    }

    pub fn set_value(&self, field: &str, value: f64) -> Result<CalculatorRecord, CalculatorError> {
        if !value.is_finite() {
            return Err(CalculatorError::InvalidInput {
                calculator: C::KIND,
                field: field.to_string(),
                source: InputError::NotFinite,
            });
        }

        let shared = C::shared_field(field);
        let value = shared.map_or(value, |shared| shared.normalize(value));

        {
            let mut guard = self.inputs.lock().expect("widget inputs mutex poisoned");
            set_field(C::KIND, &mut *guard, field, value)?;
        }

        match shared {
            Some(shared) => {
                self.active.store(true, Ordering::Release);
                self.store.update(shared.patch(value));
                Ok(self
                    .registry
                    .get(C::KIND)
                    .unwrap_or_else(|| self.publish()))
            }
            None => Ok(self.publish()),
        }
    }

    /// Recomputes from the current inputs and overwrites the registry entry.
    ///
    /// The inputs stay locked until the registry holds the new record, so
    /// concurrent publishes land in the order their inputs were written.
    pub fn publish(&self) -> CalculatorRecord {
        let guard = self.inputs.lock().expect("widget inputs mutex poisoned");
        self.active.store(true, Ordering::Release);
        let record = C::record(&guard);
        self.registry.publish(record.clone());
        record
    }
}

impl<C: Calculator> Drop for CalculatorWidget<C> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
