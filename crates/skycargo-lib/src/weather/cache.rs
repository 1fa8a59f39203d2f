//! Per-airport observation cache with time-bounded freshness.
//!
//! Each airport owns its own slot guarded by a mutex. A lookup holds the
//! slot lock for the whole check-then-refresh sequence, so concurrent
//! lookups for the same airport wait for the first refresh instead of
//! issuing their own. Lookups for different airports never contend beyond
//! the brief lock on the slot table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::WeatherObservation;

type Slot = Arc<Mutex<Option<WeatherObservation>>>;

/// Keyed store of the most recent observation per airport.
#[derive(Debug)]
pub struct WeatherCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, Slot>>,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached observation for `code` if it is still fresh at `now`.
    pub fn cached(&self, code: &str, now: DateTime<Utc>) -> Option<WeatherObservation> {
        let slot = self.existing_slot(code)?;
        let entry = lock(&slot);
        entry
            .as_ref()
            .filter(|observation| !observation.is_stale(now, self.ttl))
            .cloned()
    }

    /// Return a fresh cached observation or run `refresh` and store its result.
    ///
    /// At most one `refresh` runs per airport at a time; callers arriving while
    /// it runs receive the value it stores.
    pub fn get_or_refresh<F>(&self, code: &str, now: DateTime<Utc>, refresh: F) -> WeatherObservation
    where
        F: FnOnce() -> WeatherObservation,
    {
        let slot = self.slot(code);
        let mut entry = lock(&slot);

        if let Some(observation) = entry.as_ref() {
            if !observation.is_stale(now, self.ttl) {
                debug!(airport = code, "weather cache hit");
                return observation.clone();
            }
        }

        debug!(airport = code, "weather cache miss");
        let observation = refresh();
        *entry = Some(observation.clone());
        observation
    }

    /// Drop the cached entry for one airport.
    pub fn invalidate(&self, code: &str) {
        if let Some(slot) = self.existing_slot(code) {
            *lock(&slot) = None;
        }
    }

    pub fn clear(&self) {
        lock(&self.slots).clear();
    }

    /// Number of airports with a stored observation, fresh or stale.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, code: &str) -> Slot {
        lock(&self.slots)
            .entry(code.to_string())
            .or_default()
            .clone()
    }

    fn existing_slot(&self, code: &str) -> Option<Slot> {
        lock(&self.slots).get(code).cloned()
    }
}

// A panic inside a refresh leaves the slot in its previous, still valid state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
