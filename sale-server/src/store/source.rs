//! Cached listing source with graceful degradation.
//!
//! Requests prefer live data from the listings API. When the API is
//! unreachable the source falls back, in order, to the most recent
//! successful response and then to seed data, labelling every batch
//! with how fresh it is so callers can disclose degraded results.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::Listing;

use super::client::{ListingStoreClient, StoreQuery};
use super::error::StoreError;

/// How a batch of listings was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Straight from the listings API, or from the short-TTL cache
    Live,
    /// The last successful response, served because the API is down
    Cached,
    /// Bundled or file-loaded seed data; no live response yet
    Seed,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Cached => "cached",
            Self::Seed => "seed",
        }
    }
}

/// A set of listings plus the provenance responses must disclose.
#[derive(Debug, Clone)]
pub struct ListingBatch {
    pub listings: Arc<Vec<Listing>>,
    pub freshness: Freshness,
}

/// Cache settings for the listing source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// How long a query's response stays servable without refetching
    pub ttl: Duration,
    /// Maximum number of cached query responses
    pub max_capacity: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Listing source that caches per query and degrades when offline.
pub struct CachedListingSource {
    client: Option<ListingStoreClient>,
    cache: MokaCache<StoreQuery, Arc<Vec<Listing>>>,
    last_good: RwLock<Option<Arc<Vec<Listing>>>>,
    seed: Option<Arc<Vec<Listing>>>,
}

impl CachedListingSource {
    /// Source backed by the listings API, with optional seed fallback.
    pub fn new(
        client: ListingStoreClient,
        seed: Option<Vec<Listing>>,
        config: &SourceConfig,
    ) -> Self {
        Self::build(Some(client), seed, config)
    }

    /// Source with no upstream at all; every fetch serves seed data.
    pub fn offline(seed: Vec<Listing>, config: &SourceConfig) -> Self {
        Self::build(None, Some(seed), config)
    }

    fn build(
        client: Option<ListingStoreClient>,
        seed: Option<Vec<Listing>>,
        config: &SourceConfig,
    ) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self {
            client,
            cache,
            last_good: RwLock::new(None),
            seed: seed.filter(|s| !s.is_empty()).map(Arc::new),
        }
    }

    /// Fetch listings for `query`, degrading when the store fails.
    ///
    /// A live success refreshes both the query cache and the last-good
    /// snapshot. Errors only surface once every fallback tier is empty.
    pub async fn fetch(&self, query: &StoreQuery) -> Result<ListingBatch, StoreError> {
        let Some(client) = &self.client else {
            return self.fallback(StoreError::NoData("no store configured")).await;
        };

        if let Some(hit) = self.cache.get(query).await {
            return Ok(ListingBatch {
                listings: hit,
                freshness: Freshness::Live,
            });
        }

        match client.fetch_listings(query).await {
            Ok(listings) => {
                let entry = Arc::new(listings);
                self.cache.insert(query.clone(), entry.clone()).await;
                *self.last_good.write().await = Some(entry.clone());
                Ok(ListingBatch {
                    listings: entry,
                    freshness: Freshness::Live,
                })
            }
            Err(error) => {
                warn!(error = %error, "listing store fetch failed, serving degraded data");
                self.fallback(error).await
            }
        }
    }

    /// Serve the best stale data on hand, or surface the error.
    ///
    /// Neither the snapshot nor the seed is scoped to the query; the
    /// filter engine re-applies every criterion in memory, so over-broad
    /// data narrows correctly and the only cost is possibly missing rows.
    async fn fallback(&self, error: StoreError) -> Result<ListingBatch, StoreError> {
        if let Some(snapshot) = self.last_good.read().await.clone() {
            return Ok(ListingBatch {
                listings: snapshot,
                freshness: Freshness::Cached,
            });
        }
        if let Some(seed) = &self.seed {
            return Ok(ListingBatch {
                listings: seed.clone(),
                freshness: Freshness::Seed,
            });
        }
        Err(error)
    }

    /// Number of query responses currently cached.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop all cached responses. The last-good snapshot survives.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
