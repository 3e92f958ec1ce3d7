//! URL unshortening service composing the cache and the probe.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::debug;

use crate::cache::BoundedCache;
use crate::dto::UnshortenInfo;
use crate::probe::RedirectProbe;

/// Result of one unshorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unshortened {
    /// `None` when the URL does not redirect or the probe failed.
    pub info: Option<UnshortenInfo>,
    pub was_cached: bool,
}

/// Resolves shortened URLs, memoizing successful probes.
///
/// The cache is owned here and shared across all connection handlers
/// through [`crate::state::AppState`].
///
/// Only genuine redirects are cached. A failed or empty probe leaves the
/// cache untouched, so a transient upstream failure is retried on the next
/// identical request instead of being remembered as "no redirect".
///
/// There is no single-flight deduplication: two concurrent misses on the
/// same URL may both probe, and the last writer wins.
pub struct UnshortenService {
    cache: BoundedCache<String, UnshortenInfo>,
    probe: Arc<dyn RedirectProbe>,
}

impl UnshortenService {
    /// Creates a service with a cache of the given capacity.
    pub fn new(cache_capacity: NonZeroUsize, probe: Arc<dyn RedirectProbe>) -> Self {
        Self {
            cache: BoundedCache::new(cache_capacity),
            probe,
        }
    }

    /// Resolves `url`, consulting the cache first.
    ///
    /// The raw URL string is the cache key, used verbatim with no
    /// normalization, so `http://a/` and `http://a` are distinct entries.
    pub async fn unshorten(&self, url: &str) -> Unshortened {
        if let Some(info) = self.cache.get(url) {
            debug!("cache hit for {url}");
            return Unshortened {
                info: Some(info),
                was_cached: true,
            };
        }

        debug!("cache miss for {url}, probing");
        let info = self.probe.probe(url).await;
        if let Some(info) = &info {
            self.cache.put(url.to_string(), info.clone());
        }

        Unshortened {
            info,
            was_cached: false,
        }
    }

    /// Current cache occupancy, exposed for tests and logging.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
