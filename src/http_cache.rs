use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::team_data::TeamData;
use crate::team_fetch::TeamDataSource;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    document: Arc<TeamData>,
    fetched_at: Instant,
}

/// Single-slot TTL cache in front of a [`TeamDataSource`].
///
/// The lock is held across the outbound call, so callers arriving during a
/// miss queue behind the one doing the fetch and then hit the fresh entry.
/// Failures leave the slot untouched: a stale entry stays stale and nothing
/// is stored when there was no entry.
pub struct TeamDataCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: TeamDataSource> TeamDataCache<S, SystemClock> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: TeamDataSource, C: Clock> TeamDataCache<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cached document while fresh, otherwise fetches once.
    /// `None` means the fetch failed; the reason is logged, not returned.
    pub fn get_team_data(&self) -> Option<Arc<TeamData>> {
        let mut slot = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        if let Some(entry) = slot.as_ref()
            && is_fresh(entry.fetched_at, now, self.ttl)
        {
            debug!(
                "[CACHE] hit, age {:.1?}",
                now.saturating_duration_since(entry.fetched_at)
            );
            return Some(Arc::clone(&entry.document));
        }

        let before = Instant::now();
        match self.source.fetch_team_data() {
            Ok(document) => {
                let document = Arc::new(document);
                *slot = Some(CacheEntry {
                    document: Arc::clone(&document),
                    fetched_at: now,
                });
                info!("[CACHE] refreshed team data in {:.2?}", before.elapsed());
                Some(document)
            }
            Err(err) => {
                let stale = if slot.is_some() { "kept stale entry" } else { "no entry" };
                warn!("[CACHE] team data fetch failed ({stale}): {err:#}");
                None
            }
        }
    }

    /// Last stored document regardless of age.
    pub fn peek(&self) -> Option<Arc<TeamData>> {
        let slot = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|entry| Arc::clone(&entry.document))
    }

    /// Age of the stored document, if any.
    pub fn age(&self) -> Option<Duration> {
        let slot = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        slot.as_ref()
            .map(|entry| now.saturating_duration_since(entry.fetched_at))
    }
}

fn is_fresh(fetched_at: Instant, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(fetched_at) < ttl
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::is_fresh;

    #[test]
    fn fresh_strictly_below_ttl() {
        let t0 = Instant::now();
        let ttl = Duration::from_secs(300);
        assert!(is_fresh(t0, t0, ttl));
        assert!(is_fresh(t0, t0 + Duration::from_millis(299_999), ttl));
        assert!(!is_fresh(t0, t0 + ttl, ttl));
        assert!(!is_fresh(t0, t0 + Duration::from_secs(301), ttl));
    }
}
