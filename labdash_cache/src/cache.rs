// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoizing caches over a [`SeriesSource`].
//!
//! Each cache holds one document. A fetch happens when the cache is empty, when the caller
//! asks for a refresh, or when the entity is still running and the cached copy is older than
//! the reload timeout. Calls are serialized on an async mutex, so concurrent callers share a
//! single fetch.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::CacheError;
use crate::kind::{Entity, SeriesKind};
use crate::preferences::Preferences;
use crate::source::SeriesSource;
use crate::status::{Status, now_secs};
use crate::wire::AnalysisData;

/// Default age after which data of a running entity is refetched.
pub const DEFAULT_RELOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
    /// Wall-clock time of the fetch, unix seconds.
    fetched_at_secs: f64,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            fetched_at_secs: now_secs(),
        }
    }

    fn is_stale(&self, timeout: Duration) -> bool {
        self.fetched_at.elapsed() > timeout
    }
}

/// Caches the status of one entity.
#[derive(Debug)]
pub struct StatusCache<S> {
    source: Arc<S>,
    entity: Entity,
    uuid: String,
    reload_timeout: Duration,
    entry: Mutex<Option<Entry<Status>>>,
}

impl<S: SeriesSource> StatusCache<S> {
    /// Creates an empty cache.
    pub fn new(source: Arc<S>, entity: Entity, uuid: impl Into<String>) -> Self {
        Self {
            source,
            entity,
            uuid: uuid.into(),
            reload_timeout: DEFAULT_RELOAD_TIMEOUT,
            entry: Mutex::new(None),
        }
    }

    /// Sets the reload timeout.
    #[must_use]
    pub fn with_reload_timeout(mut self, timeout: Duration) -> Self {
        self.reload_timeout = timeout;
        self
    }

    /// Returns the status, fetching it if needed.
    pub async fn get(&self, refresh: bool) -> Result<Status, CacheError> {
        let mut entry = self.entry.lock().await;
        let fetch = match entry.as_ref() {
            None => true,
            Some(e) => refresh || (e.value.is_running && e.is_stale(self.reload_timeout)),
        };
        if fetch {
            log::debug!("fetching status of {} {}", self.entity, self.uuid);
            let status = self.source.fetch_status(self.entity, &self.uuid).await?;
            *entry = Some(Entry::new(status));
        }
        entry
            .as_ref()
            .map(|e| e.value)
            .ok_or_else(|| CacheError::Source("status cache is empty".into()))
    }
}

/// Caches the series of one analysis of one entity.
#[derive(Debug)]
pub struct SeriesCache<S> {
    source: Arc<S>,
    kind: SeriesKind,
    uuid: String,
    status: Arc<StatusCache<S>>,
    reload_timeout: Duration,
    entry: Mutex<Option<Entry<Arc<AnalysisData>>>>,
}

impl<S: SeriesSource> SeriesCache<S> {
    /// Creates an empty cache; `status` decides whether cached data can go stale.
    pub fn new(
        source: Arc<S>,
        kind: SeriesKind,
        uuid: impl Into<String>,
        status: Arc<StatusCache<S>>,
    ) -> Self {
        Self {
            source,
            kind,
            uuid: uuid.into(),
            status,
            reload_timeout: DEFAULT_RELOAD_TIMEOUT,
            entry: Mutex::new(None),
        }
    }

    /// Sets the reload timeout.
    #[must_use]
    pub fn with_reload_timeout(mut self, timeout: Duration) -> Self {
        self.reload_timeout = timeout;
        self
    }

    /// The analysis kind.
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// The entity uuid.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Returns the analysis, fetching it if needed.
    pub async fn get(&self, refresh: bool) -> Result<Arc<AnalysisData>, CacheError> {
        let mut entry = self.entry.lock().await;
        let fetch = match entry.as_ref() {
            None => true,
            Some(_) if refresh => true,
            Some(e) => {
                e.is_stale(self.reload_timeout) && self.status.get(false).await?.is_running
            }
        };
        if fetch {
            log::debug!("fetching {} of {}", self.kind, self.uuid);
            let data = self.source.fetch_analysis(self.kind, &self.uuid).await?;
            *entry = Some(Entry::new(Arc::new(data)));
        }
        entry
            .as_ref()
            .map(|e| Arc::clone(&e.value))
            .ok_or_else(|| CacheError::Source("series cache is empty".into()))
    }

    /// Wall-clock time of the last fetch, unix seconds.
    pub async fn last_updated(&self) -> Option<f64> {
        self.entry.lock().await.as_ref().map(|e| e.fetched_at_secs)
    }
}

/// Caches the chart preferences of one analysis, writing changes through to the source.
#[derive(Debug)]
pub struct PreferenceCache<S> {
    source: Arc<S>,
    kind: SeriesKind,
    uuid: String,
    entry: Mutex<Option<Preferences>>,
}

impl<S: SeriesSource> PreferenceCache<S> {
    /// Creates an empty cache.
    pub fn new(source: Arc<S>, kind: SeriesKind, uuid: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            uuid: uuid.into(),
            entry: Mutex::new(None),
        }
    }

    /// Returns the preferences, fetching them once.
    pub async fn get(&self) -> Result<Preferences, CacheError> {
        let mut entry = self.entry.lock().await;
        if let Some(p) = entry.as_ref() {
            return Ok(p.clone());
        }
        let prefs = self.source.fetch_preferences(self.kind, &self.uuid).await?;
        *entry = Some(prefs.clone());
        Ok(prefs)
    }

    /// Stores new preferences; the cached copy changes only if the source accepts them.
    pub async fn set(&self, preferences: Preferences) -> Result<(), CacheError> {
        let mut entry = self.entry.lock().await;
        self.source
            .save_preferences(self.kind, &self.uuid, &preferences)
            .await?;
        *entry = Some(preferences);
        Ok(())
    }
}
