use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use super::Status;

/// The status cache contents at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub status: Status,
    /// Milliseconds since the unix epoch of the last real check, zero if none.
    pub checked_at: u64,
    /// Bumped every time the session is replaced.
    pub generation: u64,
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self {
            status: Status::Unknown,
            checked_at: 0,
            generation: 0,
        }
    }
}

/// Outcome of looking up the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The cached status is within the TTL and can be trusted.
    Fresh(Status),
    /// The status must be rechecked. The check targets the session of `generation`.
    Stale { generation: u64 },
}

/// Memoizes the last known session status for a time-to-live.
pub struct StatusCache {
    entry: Mutex<CacheEntry>,
    ttl: Duration,
}

impl StatusCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(CacheEntry::default()),
            ttl,
        }
    }

    /// Returns a copy of the current entry.
    pub fn entry(&self) -> CacheEntry {
        *self.lock()
    }

    /// Looks up the cached status as of `now` (unix epoch millis).
    pub fn lookup(&self, now: u64) -> Lookup {
        let entry = self.lock();
        if now.saturating_sub(entry.checked_at) < self.ttl.as_millis() as u64 {
            Lookup::Fresh(entry.status)
        } else {
            Lookup::Stale {
                generation: entry.generation,
            }
        }
    }

    /// Records the result of a check dispatched for `generation`.
    ///
    /// # Returns
    /// `false` if the session was replaced since the check was dispatched, in
    /// which case nothing is stored.
    pub fn store(&self, generation: u64, status: Status, now: u64) -> bool {
        let mut entry = self.lock();
        if entry.generation != generation {
            return false;
        }
        entry.status = status;
        entry.checked_at = now;
        true
    }

    /// Runs the session replacement `write` with the cache locked, then marks the
    /// cached status stale if it succeeded.
    ///
    /// Lookups wait for the write, so a status cached for the previous session is
    /// never returned once the new session is visible in the store.
    pub fn reset_with<F>(&self, write: F) -> crate::Result<()>
    where
        F: FnOnce() -> crate::Result<()>,
    {
        let mut entry = self.lock();
        write()?;
        entry.status = Status::Unknown;
        entry.checked_at = 0;
        entry.generation = entry.generation.wrapping_add(1);
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheEntry> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
