//! Cloneable handle that lets every attachment in a view share one guard.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use super::{ActionGuard, Admission, ResourceKey};

/// Shared handle to one [`ActionGuard`]. Each call holds the lock for the
/// whole check-and-record, so admission is atomic.
#[derive(Debug, Clone, Default)]
pub struct SharedGuard {
    inner: Arc<Mutex<ActionGuard>>,
}

impl SharedGuard {
    pub fn new(guard: ActionGuard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(guard)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ActionGuard> {
        // The guard holds plain bookkeeping; a panic mid-update cannot leave it unusable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn try_admit(&self, key: &ResourceKey, now: Instant) -> Admission {
        self.lock().try_admit(key, now)
    }

    pub fn release(&self, key: &ResourceKey) -> bool {
        self.lock().release(key)
    }

    pub fn is_in_flight(&self, key: &ResourceKey) -> bool {
        self.lock().is_in_flight(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.lock().in_flight_count()
    }

    /// Run `f` with exclusive access to the underlying guard.
    pub fn with<R>(&self, f: impl FnOnce(&mut ActionGuard) -> R) -> R {
        f(&mut *self.lock())
    }
}

impl From<ActionGuard> for SharedGuard {
    fn from(guard: ActionGuard) -> Self {
        Self::new(guard)
    }
}
