use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use super::domain::{SharedInputs, SharedInputsPatch};

type Listener = Arc<dyn Fn(&SharedInputs) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Handle to the headcount/salary values every calculator defaults from.
///
/// Clones share the same state. `update` notifies subscribers synchronously,
/// after the write lock is released, so a listener may call `read`. Updates are
/// serialized from merge through dispatch: listeners see changes in the order
/// they were applied. A listener must not call `update`.
#[derive(Clone)]
pub struct SharedInputStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    values: RwLock<SharedInputs>,
    dispatch: Mutex<()>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl Default for SharedInputStore {
    fn default() -> Self {
        Self::new(SharedInputs::default())
    }
}

impl std::fmt::Debug for SharedInputStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedInputStore")
            .field("values", &self.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl SharedInputStore {
    pub fn new(initial: SharedInputs) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                values: RwLock::new(initial),
                dispatch: Mutex::new(()),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn read(&self) -> SharedInputs {
        *self.inner.values.read().expect("shared inputs lock poisoned")
    }

    /// Merges `patch` and notifies every subscriber with the merged values.
    pub fn update(&self, patch: SharedInputsPatch) -> SharedInputs {
        let _dispatch = self.inner.dispatch.lock().expect("dispatch mutex poisoned");
        let merged = {
            let mut guard = self.inner.values.write().expect("shared inputs lock poisoned");
            guard.merge(&patch);
            *guard
        };

        debug!(
            total_employees = merged.total_employees,
            avg_salary = merged.avg_salary,
            "shared inputs updated"
        );

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .expect("listener mutex poisoned")
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&merged);
        }

        merged
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SharedInputs) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .expect("listener mutex poisoned")
            .push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.inner.listeners.lock().expect("listener mutex poisoned");
        let before = guard.len();
        guard.retain(|(existing, _)| *existing != id);
        guard.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .expect("listener mutex poisoned")
            .len()
    }
}
