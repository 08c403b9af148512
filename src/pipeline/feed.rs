//! Memoized fetch → transform pipeline for the close-approach feed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::view::FeedView;
use crate::cache::MemoCache;
use crate::config::FeedConfig;
use crate::feed::{transform, ApproachSource, FeedError, FeedQuery};
use crate::types::ApproachTable;

/// Close-approach feed with an explicit, invalidate-only cache.
///
/// The cache mutex is held for the whole fetch, so at most one run is in
/// flight and concurrent callers wait for its result. Status readers use
/// the `cached` snapshot and never take the mutex.
pub struct ApproachFeed {
    source: Arc<dyn ApproachSource>,
    query: FeedQuery,
    no_approaches_message: String,
    cache: Mutex<MemoCache<FeedQuery, Arc<ApproachTable>>>,
    /// Mirrors `cache.contains(&query)`, written while the mutex is held
    cached: AtomicBool,
}

impl ApproachFeed {
    pub fn new(source: Arc<dyn ApproachSource>, window_days: u32, max_distance_au: f64) -> Self {
        Self {
            source,
            query: FeedQuery::new(window_days, max_distance_au),
            no_approaches_message: format!(
                "No close approaches (within {max_distance_au} AU) are listed for the next {window_days} days."
            ),
            cache: Mutex::new(MemoCache::new()),
            cached: AtomicBool::new(false),
        }
    }

    pub fn from_config(source: Arc<dyn ApproachSource>, config: &FeedConfig) -> Self {
        Self::new(source, config.window_days, config.max_distance_au)
    }

    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    pub fn no_approaches_message(&self) -> &str {
        &self.no_approaches_message
    }

    /// Cached table for the configured query, fetching on a miss.
    pub async fn load(&self) -> Result<Arc<ApproachTable>, FeedError> {
        let mut cache = self.cache.lock().await;
        let table = cache
            .get_or_try_compute_async(self.query.clone(), || self.run_once())
            .await?;
        self.cached.store(true, Ordering::Release);
        Ok(table)
    }

    /// Fetch unconditionally. Success replaces the cached table; failure
    /// leaves it as it was.
    pub async fn refresh(&self) -> Result<Arc<ApproachTable>, FeedError> {
        let mut cache = self.cache.lock().await;
        match self.run_once().await {
            Ok(table) => {
                cache.insert(self.query.clone(), Arc::clone(&table));
                self.cached.store(true, Ordering::Release);
                Ok(table)
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "Feed refresh failed, keeping cached table");
                Err(e)
            }
        }
    }

    /// Drop every cached table. Returns whether anything was cached.
    pub async fn clear(&self) -> bool {
        let mut cache = self.cache.lock().await;
        let had_entries = !cache.is_empty();
        cache.invalidate_all();
        self.cached.store(false, Ordering::Release);
        info!(had_entries, "Feed cache cleared");
        had_entries
    }

    /// Whether a table is cached for the configured query.
    pub fn is_cached(&self) -> bool {
        self.cached.load(Ordering::Acquire)
    }

    /// Whether a fetch or cache update currently holds the cache.
    pub fn is_busy(&self) -> bool {
        self.cache.try_lock().is_err()
    }

    pub async fn view(&self) -> FeedView {
        FeedView::from_outcome(self.load().await, &self.no_approaches_message)
    }

    pub async fn refresh_view(&self) -> FeedView {
        FeedView::from_outcome(self.refresh().await, &self.no_approaches_message)
    }

    async fn run_once(&self) -> Result<Arc<ApproachTable>, FeedError> {
        let result = async {
            let payload = self.source.fetch(&self.query).await?;
            Ok::<_, FeedError>(transform(&payload)?)
        }
        .await;

        match result {
            Ok(table) => {
                info!(records = table.len(), "Close-approach table built");
                Ok(Arc::new(table))
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "Close-approach feed run failed");
                Err(e)
            }
        }
    }
}
