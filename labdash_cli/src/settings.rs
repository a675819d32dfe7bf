// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered settings: defaults, then `labdash.toml` (or `--config`), then `LABDASH_*`
//! environment variables. Command line flags are applied on top by the caller.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Resolved settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Settings {
    /// Chart width when `--width` is not given.
    pub(crate) width: f64,
    /// Upper bound for any chart width.
    pub(crate) max_width: f64,
    /// Age after which data of running entities is refetched.
    pub(crate) reload_timeout_secs: u64,
    /// Log filter, e.g. `info` or `labdash_cache=debug`.
    pub(crate) log_level: Option<String>,
}

impl Settings {
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("labdash").required(false),
        };
        let settings = config::Config::builder()
            .set_default("width", 800.0)?
            .set_default("max_width", 800.0)?
            .set_default("reload_timeout_secs", 60_i64)?
            .add_source(file)
            .add_source(config::Environment::with_prefix("LABDASH").try_parsing(true))
            .build()
            .context("failed to read settings")?;
        Ok(settings.try_deserialize()?)
    }

    /// The width to render at: the flag if given, else the configured width, capped.
    pub(crate) fn chart_width(&self, flag: Option<f64>) -> f64 {
        flag.unwrap_or(self.width).min(self.max_width)
    }

    pub(crate) fn reload_timeout(&self) -> Duration {
        Duration::from_secs(self.reload_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "width = 500\nlog_level = \"debug\"\n").unwrap();
        let s = Settings::load(Some(&path)).unwrap();
        assert_eq!(s.width, 500.0);
        assert_eq!(s.max_width, 800.0);
        assert_eq!(s.reload_timeout(), Duration::from_secs(60));
        assert_eq!(s.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn width_is_capped() {
        let s = Settings {
            width: 800.0,
            max_width: 800.0,
            reload_timeout_secs: 60,
            log_level: None,
        };
        assert_eq!(s.chart_width(None), 800.0);
        assert_eq!(s.chart_width(Some(640.0)), 640.0);
        assert_eq!(s.chart_width(Some(2000.0)), 800.0);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/labdash.toml"))).is_err());
    }
}
