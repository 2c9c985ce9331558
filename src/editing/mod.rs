//! Debounced field editing
//!
//! An editing surface pushes every keystroke into an [`EditDebouncer`]. Once
//! a field has been quiet for the configured period its latest value is
//! delivered, once, on the debouncer's channel; `flush` delivers it early
//! (e.g. on blur). The consumer applies deliveries with [`commit`].

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::PlanError;
use crate::store::{PlanStore, ScalarField};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// The latest value of one field, ready to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit<K> {
    pub key: K,
    pub value: String,
}

/// A scalar field of a specific plan
pub type FieldKey = (String, ScalarField);

struct Pending {
    value: String,
    generation: u64,
    timer: JoinHandle<()>,
}

struct Shared<K> {
    pending: HashMap<K, Pending>,
    next_generation: u64,
}

type SharedState<K> = Arc<Mutex<Shared<K>>>;

fn lock<K>(state: &SharedState<K>) -> MutexGuard<'_, Shared<K>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Coalesces rapid edits per key; last write wins.
///
/// Timers run on the ambient tokio runtime, so `push` must be called from
/// within one.
pub struct EditDebouncer<K> {
    quiet: Duration,
    state: SharedState<K>,
    tx: mpsc::UnboundedSender<FieldEdit<K>>,
}

impl<K> EditDebouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<FieldEdit<K>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            state: Arc::new(Mutex::new(Shared {
                pending: HashMap::new(),
                next_generation: 0,
            })),
            tx,
        };
        (debouncer, rx)
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record a new value for `key` and restart its quiet period
    pub fn push(&self, key: K, value: impl Into<String>) {
        let mut shared = lock(&self.state);
        shared.next_generation += 1;
        let generation = shared.next_generation;

        let timer = tokio::spawn(deliver_after(
            self.quiet,
            key.clone(),
            generation,
            Arc::clone(&self.state),
            self.tx.clone(),
        ));
        let previous = shared.pending.insert(
            key,
            Pending {
                value: value.into(),
                generation,
                timer,
            },
        );
        if let Some(previous) = previous {
            previous.timer.abort();
        }
    }

    /// Deliver the pending value for `key` now. Returns false if nothing was
    /// pending.
    pub fn flush(&self, key: &K) -> bool {
        let pending = lock(&self.state).pending.remove(key);
        match pending {
            Some(pending) => {
                pending.timer.abort();
                self.send(key.clone(), pending.value);
                true
            }
            None => false,
        }
    }

    /// Deliver every pending value now; returns how many were delivered
    pub fn flush_all(&self) -> usize {
        let drained: Vec<(K, Pending)> = lock(&self.state).pending.drain().collect();
        let count = drained.len();
        for (key, pending) in drained {
            pending.timer.abort();
            self.send(key, pending.value);
        }
        count
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.state).pending.len()
    }

    fn send(&self, key: K, value: String) {
        if self.tx.send(FieldEdit { key, value }).is_err() {
            tracing::warn!("edit receiver dropped, discarding flushed value");
        }
    }
}

impl<K> Drop for EditDebouncer<K> {
    fn drop(&mut self) {
        for (_, pending) in lock(&self.state).pending.drain() {
            pending.timer.abort();
        }
    }
}

async fn deliver_after<K>(
    quiet: Duration,
    key: K,
    generation: u64,
    state: SharedState<K>,
    tx: mpsc::UnboundedSender<FieldEdit<K>>,
) where
    K: Eq + Hash,
{
    tokio::time::sleep(quiet).await;

    let value = {
        let mut shared = lock(&state);
        // a newer push or a flush owns this key now
        let current = shared.pending.get(&key).map(|p| p.generation) == Some(generation);
        if current {
            shared.pending.remove(&key).map(|p| p.value)
        } else {
            None
        }
    };
    if let Some(value) = value {
        if tx.send(FieldEdit { key, value }).is_err() {
            tracing::warn!("edit receiver dropped, discarding debounced value");
        }
    }
}

/// Apply a delivered edit to its plan
pub fn commit(store: &mut PlanStore, edit: FieldEdit<FieldKey>) -> Result<(), PlanError> {
    let (plan_id, field) = edit.key;
    store.plan_mut(&plan_id)?.apply_field(field, &edit.value)
}
