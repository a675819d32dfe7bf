// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entity status and "last updated" labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an entity is still producing data, and when it last did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// The entity is still running.
    #[serde(default)]
    pub is_running: bool,
    /// Last update, in unix seconds.
    #[serde(default)]
    pub last_updated: f64,
}

fn to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0);
    #[allow(clippy::cast_possible_truncation, reason = "checked finite and clamped")]
    let (secs, nanos) = (whole.clamp(-1e15, 1e15) as i64, nanos as u32);
    DateTime::from_timestamp(secs, nanos)
}

/// Formats a timestamp (unix seconds) as `on Tue Mar 05 2024 at 14:07:09` (UTC).
pub fn format_time(secs: f64) -> String {
    match to_datetime(secs) {
        Some(dt) => dt.format("on %a %b %d %Y at %H:%M:%S").to_string(),
        None => String::new(),
    }
}

/// Describes how long ago `then` was, relative to `now` (both unix seconds).
///
/// Under a minute reads `12s ago`, under ten minutes `3m and 5s ago`; anything older is an
/// absolute [`format_time`] label.
pub fn time_diff(then: f64, now: f64) -> String {
    let diff = now - then;
    if diff < 60.0 {
        format!("{}s ago", diff.max(0.0).round())
    } else if diff < 600.0 {
        format!(
            "{}m and {}s ago",
            (diff / 60.0).floor(),
            (diff % 60.0).round()
        )
    } else {
        format_time(then)
    }
}

/// [`time_diff`] against the current time.
pub fn time_diff_now(then: f64) -> String {
    time_diff(then, now_secs())
}

/// Current time in unix seconds.
pub fn now_secs() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_millis()) / 1000.0
}
