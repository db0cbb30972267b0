//! Single-slot cache for loaded datasets.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::LoadOutcome;

/// How long a loaded dataset is served before the sources are consulted again.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

/// Holds the most recent load outcome until it expires or is invalidated.
///
/// There is exactly one slot: the store always loads everything in one pass,
/// so there is never more than one outcome worth keeping.
pub struct DatasetCache {
    slot: Mutex<Option<Entry>>,
    ttl: Duration,
}

struct Entry {
    outcome: LoadOutcome,
    fetched_at: Instant,
}

impl DatasetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// The cached outcome, unless it has expired.
    pub fn get(&self) -> Option<LoadOutcome> {
        let slot = self.slot.lock().unwrap();
        slot.as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.outcome.clone())
    }

    pub fn put(&self, outcome: LoadOutcome) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(Entry {
            outcome,
            fetched_at: Instant::now(),
        });
    }

    /// Drop the cached outcome so the next read goes back to the sources.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap();
        *slot = None;
    }
}
