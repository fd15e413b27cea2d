use super::dashboard::{DashboardSummary, FinancialSummary};
use super::domain::{CalculatorError, CalculatorKind, SharedInputs, SharedInputsPatch};
use super::formulas::{
    field_names, AbsenceCalculator, CommunicationCalculator, EngagementCalculator,
    ProfitCalculator, ServiceLossCalculator, TurnoverCalculator,
};
use super::input::InputPolicy;
use super::registry::{CalculatorRecord, ResultsRegistry};
use super::store::SharedInputStore;
use super::widget::CalculatorWidget;
use crate::config::CalculatorConfig;

/// All six calculators wired to one shared store and one results registry.
///
/// The registry starts empty; a calculator reports once it is activated or edited.
pub struct CalculatorSuite {
    store: SharedInputStore,
    registry: ResultsRegistry,
    policy: InputPolicy,
    communication: CalculatorWidget<CommunicationCalculator>,
    engagement: CalculatorWidget<EngagementCalculator>,
    turnover: CalculatorWidget<TurnoverCalculator>,
    absence: CalculatorWidget<AbsenceCalculator>,
    service: CalculatorWidget<ServiceLossCalculator>,
    profit: CalculatorWidget<ProfitCalculator>,
}

impl Default for CalculatorSuite {
    fn default() -> Self {
        Self::new(SharedInputs::default(), InputPolicy::default())
    }
}

impl CalculatorSuite {
    pub fn new(defaults: SharedInputs, policy: InputPolicy) -> Self {
        let store = SharedInputStore::new(defaults);
        let registry = ResultsRegistry::new();

        Self {
            communication: CalculatorWidget::new(store.clone(), registry.clone(), policy),
            engagement: CalculatorWidget::new(store.clone(), registry.clone(), policy),
            turnover: CalculatorWidget::new(store.clone(), registry.clone(), policy),
            absence: CalculatorWidget::new(store.clone(), registry.clone(), policy),
            service: CalculatorWidget::new(store.clone(), registry.clone(), policy),
            profit: CalculatorWidget::new(store.clone(), registry.clone(), policy),
            store,
            registry,
            policy,
        }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(config.defaults, config.input_policy)
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn store(&self) -> &SharedInputStore {
        &self.store
    }

    pub fn registry(&self) -> &ResultsRegistry {
        &self.registry
    }

    pub fn shared_inputs(&self) -> SharedInputs {
        self.store.read()
    }

    pub fn update_shared(&self, patch: SharedInputsPatch) -> SharedInputs {
        self.store.update(patch)
    }

    /// Applies raw form text to one calculator field.
    pub fn set_input(
        &self,
        kind: CalculatorKind,
        field: &str,
        raw: &str,
    ) -> Result<CalculatorRecord, CalculatorError> {
        match kind {
            CalculatorKind::Communication => self.communication.set_input(field, raw),
            CalculatorKind::Engagement => self.engagement.set_input(field, raw),
            CalculatorKind::Turnover => self.turnover.set_input(field, raw),
            CalculatorKind::Absence => self.absence.set_input(field, raw),
            CalculatorKind::Service => self.service.set_input(field, raw),
            CalculatorKind::Profit => self.profit.set_input(field, raw),
        }
    }

    pub fn set_value(
        &self,
        kind: CalculatorKind,
        field: &str,
        value: f64,
    ) -> Result<CalculatorRecord, CalculatorError> {
        match kind {
            CalculatorKind::Communication => self.communication.set_value(field, value),
            CalculatorKind::Engagement => self.engagement.set_value(field, value),
            CalculatorKind::Turnover => self.turnover.set_value(field, value),
            CalculatorKind::Absence => self.absence.set_value(field, value),
            CalculatorKind::Service => self.service.set_value(field, value),
            CalculatorKind::Profit => self.profit.set_value(field, value),
        }
    }

    /// Applies several raw fields to one calculator as a unit.
    ///
    /// Every name and value is checked before the first one is applied, so an
    /// error leaves the calculator as it was. An empty set activates it.
    pub fn set_inputs<I, F, R>(
        &self,
        kind: CalculatorKind,
        values: I,
    ) -> Result<CalculatorRecord, CalculatorError>
    where
        I: IntoIterator<Item = (F, R)>,
        F: AsRef<str>,
        R: AsRef<str>,
    {
        let fields = Self::fields(kind);
        let mut resolved = Vec::new();
        for (field, raw) in values {
            let field = field.as_ref();
            if !fields.iter().any(|known| known == field) {
                return Err(CalculatorError::UnknownField {
                    calculator: kind,
                    field: field.to_string(),
                });
            }
            let value = self.policy.resolve(kind, field, raw.as_ref())?;
            resolved.push((field.to_string(), value));
        }

        let mut latest = None;
        for (field, value) in &resolved {
            latest = Some(self.set_value(kind, field, *value)?);
        }

        Ok(match latest {
            Some(record) => record,
            None => self.activate(kind),
        })
    }

    /// Publishes a calculator's current result, as opening it would.
    pub fn activate(&self, kind: CalculatorKind) -> CalculatorRecord {
        match kind {
            CalculatorKind::Communication => self.communication.publish(),
            CalculatorKind::Engagement => self.engagement.publish(),
            CalculatorKind::Turnover => self.turnover.publish(),
            CalculatorKind::Absence => self.absence.publish(),
            CalculatorKind::Service => self.service.publish(),
            CalculatorKind::Profit => self.profit.publish(),
        }
    }

    pub fn is_active(&self, kind: CalculatorKind) -> bool {
        match kind {
            CalculatorKind::Communication => self.communication.is_active(),
            CalculatorKind::Engagement => self.engagement.is_active(),
            CalculatorKind::Turnover => self.turnover.is_active(),
            CalculatorKind::Absence => self.absence.is_active(),
            CalculatorKind::Service => self.service.is_active(),
            CalculatorKind::Profit => self.profit.is_active(),
        }
    }

    /// Current result for any calculator, published or not.
    pub fn snapshot(&self, kind: CalculatorKind) -> CalculatorRecord {
        match kind {
            CalculatorKind::Communication => self.communication.snapshot(),
            CalculatorKind::Engagement => self.engagement.snapshot(),
            CalculatorKind::Turnover => self.turnover.snapshot(),
            CalculatorKind::Absence => self.absence.snapshot(),
            CalculatorKind::Service => self.service.snapshot(),
            CalculatorKind::Profit => self.profit.snapshot(),
        }
    }

    pub fn fields(kind: CalculatorKind) -> Vec<String> {
        match kind {
            CalculatorKind::Communication => field_names::<CommunicationCalculator>(),
            CalculatorKind::Engagement => field_names::<EngagementCalculator>(),
            CalculatorKind::Turnover => field_names::<TurnoverCalculator>(),
            CalculatorKind::Absence => field_names::<AbsenceCalculator>(),
            CalculatorKind::Service => field_names::<ServiceLossCalculator>(),
            CalculatorKind::Profit => field_names::<ProfitCalculator>(),
        }
    }

    /// Published result, `None` until the calculator has been activated.
    pub fn record(&self, kind: CalculatorKind) -> Option<CalculatorRecord> {
        self.registry.get(kind)
    }

    pub fn records(&self) -> Vec<CalculatorRecord> {
        self.registry.all()
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_records(&self.registry.all())
    }

    pub fn financial_summary(&self) -> FinancialSummary {
        FinancialSummary::from_records(&self.store.read(), &self.registry.all())
    }

    pub fn communication(&self) -> &CalculatorWidget<CommunicationCalculator> {
        &self.communication
    }

    pub fn engagement(&self) -> &CalculatorWidget<EngagementCalculator> {
        &self.engagement
    }

    pub fn turnover(&self) -> &CalculatorWidget<TurnoverCalculator> {
        &self.turnover
    }

    pub fn absence(&self) -> &CalculatorWidget<AbsenceCalculator> {
        &self.absence
    }

    pub fn service(&self) -> &CalculatorWidget<ServiceLossCalculator> {
        &self.service
    }

    pub fn profit(&self) -> &CalculatorWidget<ProfitCalculator> {
        &self.profit
    }
}
