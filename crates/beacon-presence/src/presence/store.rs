//! Snapshot store with synchronous change observers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::protocol::PresenceSnapshot;

/// Identifier returned by [`SnapshotStore::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn Fn(Option<&PresenceSnapshot>) + Send + Sync>;

/// Holds the latest presence document and tells observers when it changes.
///
/// Handles are cheap clones over shared state. One store exists per
/// subscription session — it is never global, so independent clients (and
/// tests) cannot leak state into each other. The gateway session is the
/// only writer; observers get a replaced value, never an in-place
/// mutation.
#[derive(Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    current: RwLock<Option<PresenceSnapshot>>,
    observers: Mutex<HashMap<u64, Observer>>,
    next_id: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest snapshot, or `None` when nothing has arrived (or the
    /// session was torn down).
    pub fn get(&self) -> Option<PresenceSnapshot> {
        self.inner
            .current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the snapshot wholesale and notify observers.
    pub fn set(&self, snapshot: PresenceSnapshot) {
        {
            let mut current = self
                .inner
                .current
                .write()
                .unwrap_or_else(|e| e.into_inner());
            *current = Some(snapshot);
        }
        self.notify();
    }

    /// Back to "absent", notifying observers.
    pub fn clear(&self) {
        {
            let mut current = self
                .inner
                .current
                .write()
                .unwrap_or_else(|e| e.into_inner());
            *current = None;
        }
        self.notify();
    }

    /// Register a change observer; it fires synchronously on every
    /// `set`/`clear` with the new value.
    pub fn observe(
        &self,
        observer: impl Fn(Option<&PresenceSnapshot>) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, Box::new(observer));
        ObserverId(id)
    }

    /// Remove a previously registered observer. Unknown ids are a no-op.
    pub fn unobserve(&self, id: ObserverId) {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id.0);
    }

    fn notify(&self) {
        let current = self.get();
        let observers = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        for observer in observers.values() {
            observer(current.as_ref());
        }
    }
}
