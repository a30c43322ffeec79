//! Bounded map of last-admitted start times.
//!
//! Only entries whose cooldown has elapsed are ever dropped. While every entry
//! is still cooling down (or pinned) the map grows past its capacity; the
//! admission rate bounds how far.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::guard::ResourceKey;

#[derive(Debug, Clone)]
pub(super) struct RecentStarts {
    starts: HashMap<ResourceKey, Instant>,
    capacity: usize,
}

impl RecentStarts {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            starts: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub(super) fn get(&self, key: &ResourceKey) -> Option<Instant> {
        self.starts.get(key).copied()
    }

    pub(super) fn len(&self) -> usize {
        self.starts.len()
    }

    /// Record a start for `key`. When full, entries whose cooldown elapsed by
    /// `at` are dropped first unless pinned.
    pub(super) fn record<P>(&mut self, key: ResourceKey, at: Instant, cooldown: Duration, pinned: P)
    where
        P: Fn(&ResourceKey) -> bool,
    {
        if !self.starts.contains_key(&key) && self.starts.len() >= self.capacity {
            let dropped = self.prune_expired(at, cooldown, |k| pinned(k) || k == &key);
            if dropped == 0 {
                tracing::trace!(
                    tracked = self.starts.len(),
                    capacity = self.capacity,
                    "start map over capacity, nothing expired"
                );
            }
        }
        self.starts.insert(key, at);
    }

    pub(super) fn prune_expired<P>(&mut self, now: Instant, cooldown: Duration, pinned: P) -> usize
    where
        P: Fn(&ResourceKey) -> bool,
    {
        let before = self.starts.len();
        self.starts
            .retain(|k, &mut s| now.saturating_duration_since(s) < cooldown || pinned(k));
        before - self.starts.len()
    }
}
