//! Thread-safe handle for one producer and any number of snapshot readers

use super::engine::{EngineError, FeatureEngine};
use super::snapshot::Snapshot;
use crate::keyboard::KeyEvent;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Engine shared between the event-consuming thread and the display.
///
/// Every `update` and `snapshot` holds the lock for its whole duration, so a
/// reader never sees a series mid-append.
#[derive(Debug, Clone, Default)]
pub struct SharedFeatureEngine {
    inner: Arc<Mutex<FeatureEngine>>,
}

impl SharedFeatureEngine {
    pub fn new(engine: FeatureEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Engine methods never panic between appends; poisoned state is intact.
    fn lock(&self) -> MutexGuard<'_, FeatureEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, event: &KeyEvent) -> Result<(), EngineError> {
        self.lock().update(event)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn total_events(&self) -> u64 {
        self.lock().total_events()
    }

    /// Replace the engine with a fresh one, keeping the display window
    pub fn reset(&self) {
        let mut engine = self.lock();
        *engine = FeatureEngine::with_display_window(engine.display_window());
    }

    /// Run `f` against the engine under the lock
    pub fn with_engine<R>(&self, f: impl FnOnce(&FeatureEngine) -> R) -> R {
        f(&self.lock())
    }
}
