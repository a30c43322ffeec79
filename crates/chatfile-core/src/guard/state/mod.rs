//! In-memory guard state and admission logic.

mod recent;


use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::admission::{Admission, Rejection};
use super::ResourceKey;
use recent::RecentStarts;

/// Tracks in-flight keys and the last admitted start per key.
///
/// Invariants:
/// - every in-flight key has a start entry (pruning skips in-flight keys)
/// - a start entry is only dropped once its cooldown has elapsed
/// - an in-flight key is never admitted again until released
#[derive(Debug, Clone)]
pub struct ActionGuard {
    in_flight: HashSet<ResourceKey>,
    last_started: RecentStarts,
    cooldown: Duration,
}

impl Default for ActionGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COOLDOWN)
    }
}

impl ActionGuard {
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(2000);
    pub const DEFAULT_MAX_TRACKED_KEYS: usize = 1024;

    /// Create a guard with the given cooldown and the default key bound.
    pub fn new(cooldown: Duration) -> Self {
        Self::with_capacity(cooldown, Self::DEFAULT_MAX_TRACKED_KEYS)
    }

    /// Create a guard remembering at most `max_tracked_keys` start times
    /// once their cooldown has elapsed. Keys still cooling down or in flight
    /// may push it past the bound.
    pub fn with_capacity(cooldown: Duration, max_tracked_keys: usize) -> Self {
        Self {
            in_flight: HashSet::new(),
            last_started: RecentStarts::new(max_tracked_keys),
            cooldown,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Decide whether an action on `key` may start at `now`, recording it if so.
    pub fn try_admit(&mut self, key: &ResourceKey, now: Instant) -> Admission {
        if self.in_flight.contains(key) {
            tracing::debug!(%key, "rejected: already in flight");
            return Admission::Rejected(Rejection::AlreadyInFlight);
        }

        if let Some(started) = self.last_started.get(key) {
            if now.saturating_duration_since(started) < self.cooldown {
                tracing::debug!(%key, "rejected: cooldown active");
                return Admission::Rejected(Rejection::CooldownActive);
            }
        }

        self.in_flight.insert(key.clone());
        let in_flight = &self.in_flight;
        self.last_started
            .record(key.clone(), now, self.cooldown, |k| in_flight.contains(k));
        tracing::debug!(%key, "admitted");
        Admission::Admitted
    }

    /// Mark `key` as finished. The cooldown entry is kept. Returns false if the key was not in flight.
    pub fn release(&mut self, key: &ResourceKey) -> bool {
        let removed = self.in_flight.remove(key);
        if removed {
            tracing::debug!(%key, "released");
        }
        removed
    }

    pub fn is_in_flight(&self, key: &ResourceKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of keys with a remembered start time.
    pub fn tracked_keys(&self) -> usize {
        self.last_started.len()
    }

    /// Last admitted start for `key`, if still remembered.
    pub fn last_started(&self, key: &ResourceKey) -> Option<Instant> {
        self.last_started.get(key)
    }

    /// Forget start times whose cooldown elapsed by `now` (in-flight keys are kept).
    /// Returns how many entries were dropped.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let in_flight = &self.in_flight;
        self.last_started
            .prune_expired(now, self.cooldown, |k| in_flight.contains(k))
    }
}
