//! Read-through caching of historical rate series
//!
//! A [`RateSource`] supplies series for a [`HistoryRequest`]; a [`SeriesCache`]
//! keeps them for a limited time. [`ReadThrough`] ties the two together so
//! the engine only ever sees a plain [`RateSeries`].

use crate::data::{CurrencyPair, DataLoader, RateSeries};
use crate::error::{Result, TrendError};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Hours a fetched series stays fresh unless configured otherwise
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// A trailing window of daily rates for one pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryRequest {
    pub pair: CurrencyPair,
    /// Calendar days covered, counting back from the latest observation
    pub days: u32,
}

impl HistoryRequest {
    pub fn new(pair: CurrencyPair, days: u32) -> Self {
        Self { pair, days }
    }

    /// Cache key such as `EUR_GBP_30`
    pub fn cache_key(&self) -> String {
        format!("{}_{}_{}", self.pair.base, self.pair.target, self.days)
    }
}

/// Supplier of historical series, sorted and gap-checked
pub trait RateSource {
    fn fetch(&self, request: &HistoryRequest) -> Result<RateSeries>;

    /// Key under which this source's answer to `request` is cached.
    ///
    /// Sources that can serve different data for the same request must fold
    /// their identity into the key.
    fn cache_key(&self, request: &HistoryRequest) -> String {
        request.cache_key()
    }
}

/// Serves requests from a CSV or provider JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSource for FileSource {
    /// Request key plus a fingerprint of the file's canonical path, size and
    /// modification time, so a different or rewritten file never hits an old entry
    fn cache_key(&self, request: &HistoryRequest) -> String {
        let path = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);

        if let Ok(meta) = fs::metadata(&path) {
            meta.len().hash(&mut hasher);
            if let Ok(modified) = meta.modified() {
                modified.hash(&mut hasher);
            }
        }

        format!("{}_{:016x}", request.cache_key(), hasher.finish())
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<RateSeries> {
        let series = DataLoader::from_path(&self.path, request.pair.clone())?.trailing(request.days);

        if series.is_empty() {
            return Err(TrendError::InvalidSeries(format!(
                "no {} rates found in {}",
                request.pair,
                self.path.display()
            )));
        }

        Ok(series)
    }
}

/// Time-bounded store of series keyed by request
pub trait SeriesCache {
    /// A fresh entry for `key`, or `None` when missing or expired
    fn get(&self, key: &str) -> Option<RateSeries>;

    /// Store `series` under `key` until `ttl` has elapsed
    fn put(&mut self, key: &str, series: &RateSeries, ttl: Duration) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    expires_at: DateTime<Utc>,
    series: RateSeries,
}

impl CacheEntry {
    fn new(series: &RateSeries, ttl: Duration) -> Result<Self> {
        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            TrendError::InvalidParameter(format!("cache ttl out of range: {}", ttl))
        })?;

        Ok(Self {
            expires_at,
            series: series.clone(),
        })
    }

    fn is_fresh(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// Cache that never holds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl SeriesCache for NoCache {
    fn get(&self, _key: &str) -> Option<RateSeries> {
        None
    }

    fn put(&mut self, _key: &str, _series: &RateSeries, _ttl: Duration) -> Result<()> {
        Ok(())
    }
}

/// In-process cache
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SeriesCache for MemoryCache {
    fn get(&self, key: &str) -> Option<RateSeries> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.series.clone())
    }

    fn put(&mut self, key: &str, series: &RateSeries, ttl: Duration) -> Result<()> {
        self.entries.insert(key.to_string(), CacheEntry::new(series, ttl)?);
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open a cache directory, creating it if needed
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl SeriesCache for FileCache {
    fn get(&self, key: &str) -> Option<RateSeries> {
        let path = self.path_for(key);
        let contents = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Ignoring unreadable cache file {}: {}", path.display(), e);
                return None;
            }
        };

        if !entry.is_fresh() {
            debug!("Cache entry {} expired at {}", key, entry.expires_at);
            return None;
        }

        Some(entry.series)
    }

    fn put(&mut self, key: &str, series: &RateSeries, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(series, ttl)?;
        fs::write(self.path_for(key), serde_json::to_string_pretty(&entry)?)?;
        Ok(())
    }
}

/// Serve from the cache when fresh, otherwise fetch and remember
#[derive(Debug)]
pub struct ReadThrough<S, C> {
    source: S,
    cache: C,
    ttl: Duration,
}

impl<S: RateSource, C: SeriesCache> ReadThrough<S, C> {
    pub fn new(source: S, cache: C) -> Self {
        Self::with_ttl(source, cache, Duration::hours(DEFAULT_TTL_HOURS))
    }

    pub fn with_ttl(source: S, cache: C, ttl: Duration) -> Self {
        Self { source, cache, ttl }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Historical series for the request
    pub fn fetch_history(&mut self, request: &HistoryRequest) -> Result<RateSeries> {
        let key = self.source.cache_key(request);

        if let Some(series) = self.cache.get(&key) {
            debug!("Using cached historical rates for {}", key);
            return Ok(series);
        }

        info!(
            "Fetching {} historical rates for the last {} days",
            request.pair, request.days
        );
        let series = self.source.fetch(request)?;

        if let Err(e) = self.cache.put(&key, &series, self.ttl) {
            warn!("Could not cache {}: {}", key, e);
        }

        Ok(series)
    }
}
