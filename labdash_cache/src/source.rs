// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where analysis data comes from.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::CacheError;
use crate::kind::{Entity, SeriesKind};
use crate::preferences::Preferences;
use crate::status::Status;
use crate::wire::AnalysisData;

/// A backend that serves analyses, preferences and status.
pub trait SeriesSource: Send + Sync {
    /// Fetches the series of one analysis.
    fn fetch_analysis(
        &self,
        kind: SeriesKind,
        uuid: &str,
    ) -> impl Future<Output = Result<AnalysisData, CacheError>> + Send;

    /// Fetches the chart preferences of one analysis.
    fn fetch_preferences(
        &self,
        kind: SeriesKind,
        uuid: &str,
    ) -> impl Future<Output = Result<Preferences, CacheError>> + Send;

    /// Stores the chart preferences of one analysis.
    fn save_preferences(
        &self,
        kind: SeriesKind,
        uuid: &str,
        preferences: &Preferences,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;

    /// Fetches the status of an entity.
    fn fetch_status(
        &self,
        entity: Entity,
        uuid: &str,
    ) -> impl Future<Output = Result<Status, CacheError>> + Send;
}

/// Serves JSON documents from a directory tree:
///
/// ```text
/// <root>/<kind>/<uuid>.json               analysis
/// <root>/<kind>/preferences/<uuid>.json   preferences
/// <root>/status/<uuid>.json               status
/// ```
///
/// Missing preferences and status documents read as defaults.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serves documents under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn analysis_path(&self, kind: SeriesKind, uuid: &str) -> PathBuf {
        self.root.join(kind.name).join(format!("{uuid}.json"))
    }

    fn preferences_path(&self, kind: SeriesKind, uuid: &str) -> PathBuf {
        self.root
            .join(kind.name)
            .join("preferences")
            .join(format!("{uuid}.json"))
    }

    fn status_path(&self, uuid: &str) -> PathBuf {
        self.root.join("status").join(format!("{uuid}.json"))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, CacheError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl SeriesSource for DirSource {
    async fn fetch_analysis(&self, kind: SeriesKind, uuid: &str) -> Result<AnalysisData, CacheError> {
        let path = self.analysis_path(kind, uuid);
        log::debug!("reading {}", path.display());
        read_json(&path).await?.ok_or_else(|| CacheError::NotFound {
            kind: kind.name.to_string(),
            uuid: uuid.to_string(),
        })
    }

    async fn fetch_preferences(
        &self,
        kind: SeriesKind,
        uuid: &str,
    ) -> Result<Preferences, CacheError> {
        Ok(read_json(&self.preferences_path(kind, uuid))
            .await?
            .unwrap_or_default())
    }

    async fn save_preferences(
        &self,
        kind: SeriesKind,
        uuid: &str,
        preferences: &Preferences,
    ) -> Result<(), CacheError> {
        let path = self.preferences_path(kind, uuid);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let bytes = serde_json::to_vec_pretty(preferences)?;
        tokio::fs::write(&path, bytes).await?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    async fn fetch_status(&self, _entity: Entity, uuid: &str) -> Result<Status, CacheError> {
        Ok(read_json(&self.status_path(uuid)).await?.unwrap_or_default())
    }
}

/// A source built from a fetch closure, with preferences kept in memory.
///
/// Useful for embedding data produced elsewhere, and in tests.
pub struct FnSource<F> {
    fetch: F,
    status: Mutex<Status>,
    preferences: Mutex<HashMap<(SeriesKind, String), Preferences>>,
}

impl<F> core::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnSource")
            .field("status", &self.status)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl<F> FnSource<F>
where
    F: Fn(SeriesKind, &str) -> Result<AnalysisData, CacheError> + Send + Sync,
{
    /// Serves analyses from `fetch`; entities report as not running.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            status: Mutex::new(Status::default()),
            preferences: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the status reported for every entity.
    pub fn set_status(&self, status: Status) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

impl<F> SeriesSource for FnSource<F>
where
    F: Fn(SeriesKind, &str) -> Result<AnalysisData, CacheError> + Send + Sync,
{
    async fn fetch_analysis(&self, kind: SeriesKind, uuid: &str) -> Result<AnalysisData, CacheError> {
        (self.fetch)(kind, uuid)
    }

    async fn fetch_preferences(
        &self,
        kind: SeriesKind,
        uuid: &str,
    ) -> Result<Preferences, CacheError> {
        let prefs = self.preferences.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(prefs
            .get(&(kind, uuid.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn save_preferences(
        &self,
        kind: SeriesKind,
        uuid: &str,
        preferences: &Preferences,
    ) -> Result<(), CacheError> {
        self.preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((kind, uuid.to_string()), preferences.clone());
        Ok(())
    }

    async fn fetch_status(&self, _entity: Entity, _uuid: &str) -> Result<Status, CacheError> {
        Ok(*self.status.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
