use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::activities::ActivityApi;
use crate::error::ClientResult;
use crate::models::activity::ActivityCatalog;
use crate::models::clock::Clock;

pub const CACHE_DURATION: Duration = Duration::from_millis(60_000);

/// The last successful fetch. `snapshot` is only ever replaced whole.
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    pub snapshot: Option<Arc<ActivityCatalog>>,
    /// `None` before the first fetch and after `invalidate`.
    pub fetched_at: Option<Instant>,
}

pub struct CatalogCache<C> {
    clock: C,
    duration: Duration,
    entry: CacheEntry,
}

impl<C: Clock> CatalogCache<C> {
    pub fn new(clock: C, duration: Duration) -> Self {
        Self {
            clock,
            duration,
            entry: CacheEntry::default(),
        }
    }

    pub fn entry(&self) -> &CacheEntry {
        &self.entry
    }

    fn fresh_snapshot(&self, now: Instant) -> Option<&Arc<ActivityCatalog>> {
        let fetched_at = self.entry.fetched_at?;
        if now.saturating_duration_since(fetched_at) < self.duration {
            self.entry.snapshot.as_ref()
        } else {
            None
        }
    }

    /// Serves the snapshot while it is younger than the cache duration,
    /// otherwise fetches. A failed fetch leaves the previous snapshot in place.
    pub async fn get_catalog<A>(&mut self, api: &A) -> ClientResult<Arc<ActivityCatalog>>
    where
        A: ActivityApi + ?Sized,
    {
        if let Some(snapshot) = self.fresh_snapshot(self.clock.now()) {
            debug!("Cache hit for activities");
            return Ok(Arc::clone(snapshot));
        }

        debug!("Cache miss for activities");
        match api.fetch_activities().await {
            Ok(catalog) => {
                let snapshot = Arc::new(catalog);
                self.entry = CacheEntry {
                    snapshot: Some(Arc::clone(&snapshot)),
                    fetched_at: Some(self.clock.now()),
                };
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Refresh failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }

    /// Forces the next `get_catalog` to fetch.
    pub fn invalidate(&mut self) {
        debug!("Invalidating activities cache");
        self.entry.fetched_at = None;
    }
}
