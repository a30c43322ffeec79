//! Scheduled release of admitted keys after a fixed window.
//!
//! Release handles are cancellable; a cancelled release leaves its key in
//! flight until someone releases it explicitly. Dropping a handle does not
//! cancel, so tearing down the element that started a download never strands
//! the key.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::{ResourceKey, SharedGuard};

/// Arranges for `guard.release(key)` to run once `after` has elapsed.
pub trait ReleaseScheduler: Send + Sync {
    fn schedule_release(&self, guard: SharedGuard, key: ResourceKey, after: Duration) -> ReleaseHandle;
}

/// Handle to one scheduled release.
#[derive(Debug, Clone)]
pub struct ReleaseHandle {
    cancelled: Arc<AtomicBool>,
    done: Arc<AtomicBool>,
    task: Option<tokio::task::AbortHandle>,
}

impl ReleaseHandle {
    fn new(task: Option<tokio::task::AbortHandle>) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            done: Arc::new(AtomicBool::new(false)),
            task,
        }
    }

    /// Cancel the release if it has not run yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// The release either ran or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.done.load(Ordering::Acquire) || self.is_cancelled()
    }

    fn fire(&self, guard: &SharedGuard, key: &ResourceKey) -> bool {
        if self.is_cancelled() {
            return false;
        }
        guard.release(key);
        self.done.store(true, Ordering::Release);
        true
    }
}

/// Releases on a tokio runtime after sleeping for the window.
#[derive(Debug, Clone)]
pub struct TokioReleaseScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioReleaseScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is running on. Fails outside a tokio context.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        tokio::runtime::Handle::try_current().map(Self::new)
    }
}

impl ReleaseScheduler for TokioReleaseScheduler {
    fn schedule_release(&self, guard: SharedGuard, key: ResourceKey, after: Duration) -> ReleaseHandle {
        let mut handle = ReleaseHandle::new(None);
        let task_handle = handle.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if task_handle.fire(&guard, &key) {
                tracing::trace!(%key, "scheduled release ran");
            }
        });
        handle.task = Some(task.abort_handle());
        handle
    }
}

struct PendingRelease {
    guard: SharedGuard,
    key: ResourceKey,
    after: Duration,
    handle: ReleaseHandle,
}

/// Queues releases until the host calls [`DeferredReleaseScheduler::run_pending`].
///
/// For hosts that drive their own timers (a UI frame loop, a test).
#[derive(Default)]
pub struct DeferredReleaseScheduler {
    pending: Mutex<Vec<PendingRelease>>,
}

impl DeferredReleaseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued releases that are neither run nor cancelled.
    pub fn pending(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|p| !p.handle.is_finished())
            .count()
    }

    /// Windows of the queued releases, in scheduling order.
    pub fn pending_windows(&self) -> Vec<Duration> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.after)
            .collect()
    }

    /// Run every queued, uncancelled release. Returns how many keys were released.
    pub fn run_pending(&self) -> usize {
        let drained: Vec<PendingRelease> = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            pending.drain(..).collect()
        };
        drained
            .iter()
            .filter(|p| p.handle.fire(&p.guard, &p.key))
            .count()
    }
}

impl ReleaseScheduler for DeferredReleaseScheduler {
    fn schedule_release(&self, guard: SharedGuard, key: ResourceKey, after: Duration) -> ReleaseHandle {
        let handle = ReleaseHandle::new(None);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(PendingRelease {
                guard,
                key,
                after,
                handle: handle.clone(),
            });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::ActionGuard;
    use std::time::Instant;

    fn admitted(guard: &SharedGuard, name: &str) -> ResourceKey {
        let key = ResourceKey::new(name);
        assert!(guard.try_admit(&key, Instant::now()).is_admitted());
        key
    }

    #[test]
    fn deferred_release_runs_on_demand() {
        let guard = SharedGuard::new(ActionGuard::default());
        let scheduler = DeferredReleaseScheduler::new();
        let key = admitted(&guard, "a");

        let handle = scheduler.schedule_release(guard.clone(), key.clone(), Duration::from_secs(2));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pending_windows(), vec![Duration::from_secs(2)]);
        assert!(guard.is_in_flight(&key));

        assert_eq!(scheduler.run_pending(), 1);
        assert!(!guard.is_in_flight(&key));
        assert!(handle.is_finished());
        assert!(!handle.is_cancelled());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_deferred_release_leaves_key_in_flight() {
        let guard = SharedGuard::new(ActionGuard::default());
        let scheduler = DeferredReleaseScheduler::new();
        let key = admitted(&guard, "b");

        let handle = scheduler.schedule_release(guard.clone(), key.clone(), Duration::from_secs(2));
        handle.cancel();
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.run_pending(), 0);
        assert!(guard.is_in_flight(&key));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_release_fires_after_window() {
        let guard = SharedGuard::new(ActionGuard::default());
        let scheduler = TokioReleaseScheduler::current().unwrap();
        let key = admitted(&guard, "c");

        let handle = scheduler.schedule_release(guard.clone(), key.clone(), Duration::from_millis(2000));
        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(guard.is_in_flight(&key));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!guard.is_in_flight(&key));
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_release_can_be_cancelled_and_survives_drop() {
        let guard = SharedGuard::new(ActionGuard::default());
        let scheduler = TokioReleaseScheduler::current().unwrap();
        let cancelled_key = admitted(&guard, "cancelled");
        let dropped_key = admitted(&guard, "dropped");

        let handle = scheduler.schedule_release(guard.clone(), cancelled_key.clone(), Duration::from_secs(2));
        handle.cancel();
        drop(scheduler.schedule_release(guard.clone(), dropped_key.clone(), Duration::from_secs(2)));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(guard.is_in_flight(&cancelled_key));
        assert!(!guard.is_in_flight(&dropped_key));
    }
}
