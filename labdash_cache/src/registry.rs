// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::cache::{DEFAULT_RELOAD_TIMEOUT, PreferenceCache, SeriesCache, StatusCache};
use crate::controller::AnalysisController;
use crate::kind::{Entity, SeriesKind};
use crate::source::SeriesSource;

type Shared<K, V> = Mutex<HashMap<K, Arc<V>>>;

/// Hands out shared caches keyed by entity and analysis, creating them on first use.
///
/// All caches for one entity share a single [`StatusCache`].
#[derive(Debug)]
pub struct CacheRegistry<S> {
    source: Arc<S>,
    reload_timeout: Duration,
    status: Shared<(Entity, String), StatusCache<S>>,
    series: Shared<(SeriesKind, String), SeriesCache<S>>,
    preferences: Shared<(SeriesKind, String), PreferenceCache<S>>,
}

fn get_or_insert<K, V>(map: &Shared<K, V>, key: K, make: impl FnOnce() -> V) -> Arc<V>
where
    K: Eq + core::hash::Hash,
{
    let mut map = map.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(map.entry(key).or_insert_with(|| Arc::new(make())))
}

impl<S: SeriesSource> CacheRegistry<S> {
    /// Creates a registry over `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            reload_timeout: DEFAULT_RELOAD_TIMEOUT,
            status: Mutex::default(),
            series: Mutex::default(),
            preferences: Mutex::default(),
        }
    }

    /// Sets the reload timeout for caches created from now on.
    #[must_use]
    pub fn with_reload_timeout(mut self, timeout: Duration) -> Self {
        self.reload_timeout = timeout;
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// The status cache of an entity.
    pub fn status(&self, entity: Entity, uuid: &str) -> Arc<StatusCache<S>> {
        get_or_insert(&self.status, (entity, uuid.to_string()), || {
            StatusCache::new(Arc::clone(&self.source), entity, uuid)
                .with_reload_timeout(self.reload_timeout)
        })
    }

    /// The series cache of one analysis.
    pub fn series(&self, kind: SeriesKind, uuid: &str) -> Arc<SeriesCache<S>> {
        get_or_insert(&self.series, (kind, uuid.to_string()), || {
            SeriesCache::new(
                Arc::clone(&self.source),
                kind,
                uuid,
                self.status(kind.entity, uuid),
            )
            .with_reload_timeout(self.reload_timeout)
        })
    }

    /// The preference cache of one analysis.
    pub fn preferences(&self, kind: SeriesKind, uuid: &str) -> Arc<PreferenceCache<S>> {
        get_or_insert(&self.preferences, (kind, uuid.to_string()), || {
            PreferenceCache::new(Arc::clone(&self.source), kind, uuid)
        })
    }

    /// A controller for one analysis card, backed by the shared caches.
    pub fn controller(&self, kind: SeriesKind, uuid: &str) -> AnalysisController<S> {
        AnalysisController::new(kind, self.series(kind, uuid), self.preferences(kind, uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DirSource;

    #[test]
    fn caches_are_shared() {
        let reg = CacheRegistry::new(Arc::new(DirSource::new("/nonexistent")));
        let a = reg.series(SeriesKind::CPU, "u");
        let b = reg.series(SeriesKind::CPU, "u");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &reg.series(SeriesKind::DISK, "u")));
        assert!(Arc::ptr_eq(
            &reg.status(Entity::Computer, "u"),
            &reg.status(Entity::Computer, "u")
        ));
        assert!(Arc::ptr_eq(
            &reg.preferences(SeriesKind::CPU, "u"),
            &reg.preferences(SeriesKind::CPU, "u")
        ));
    }
}
