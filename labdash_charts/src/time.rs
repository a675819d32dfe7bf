// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Time is a numeric value in **unix seconds**. Ticks are aligned to second, minute, hour
//! and day steps; labels are rendered in UTC.

use chrono::DateTime;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Returns "nice" tick values covering a time domain expressed in seconds.
pub fn nice_time_ticks_seconds(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let step = time_tick_step(min, max, count);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };

    (0..=n).map(|i| start + step * i as f64).collect()
}

/// Returns the tick step, in seconds, used for a time domain.
pub fn time_tick_step(min: f64, max: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    nice_time_step_seconds((max - min).abs() / count as f64)
}

fn nice_time_step_seconds(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    const STEPS: &[f64] = &[
        1.0,
        5.0,
        15.0,
        30.0,
        MINUTE,
        5.0 * MINUTE,
        15.0 * MINUTE,
        30.0 * MINUTE,
        HOUR,
        3.0 * HOUR,
        6.0 * HOUR,
        12.0 * HOUR,
        DAY,
        2.0 * DAY,
        7.0 * DAY,
    ];

    for &s in STEPS {
        if s >= step {
            return s;
        }
    }
    (step / DAY).ceil().max(1.0) * DAY
}

/// Formats a tick value (unix seconds) given the tick step (seconds).
///
/// Day steps read `Mon DD`, minute and hour steps `HH:MM`, and sub-minute steps `HH:MM:SS`.
pub fn format_time_tick(t: f64, step: f64) -> String {
    let secs = {
        let secs_f = t.round().clamp(-1e15, 1e15);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
        {
            secs_f as i64
        }
    };
    let Some(dt) = DateTime::from_timestamp(secs, 0) else {
        return format!("{t}");
    };
    let step = step.abs();
    if step >= DAY {
        dt.format("%b %d").to_string()
    } else if step >= MINUTE {
        dt.format("%H:%M").to_string()
    } else {
        dt.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ticks_choose_minute_steps_for_minute_spans() {
        let ticks = nice_time_ticks_seconds(0.0, 300.0, 5);
        assert!(ticks.len() >= 2, "expected several ticks, got {ticks:?}");
        let step = (ticks[1] - ticks[0]).abs();
        assert_eq!(step, 60.0);
    }

    #[test]
    fn long_spans_use_day_steps() {
        assert_eq!(time_tick_step(0.0, 10.0 * DAY, 5), 2.0 * DAY);
        assert_eq!(time_tick_step(0.0, 100.0 * DAY, 5), 20.0 * DAY);
    }

    #[test]
    fn labels_follow_the_step() {
        // 2024-03-05T14:07:09Z
        let t = 1_709_647_629.0;
        assert_eq!(format_time_tick(t, 1.0), "14:07:09");
        assert_eq!(format_time_tick(t, 5.0 * MINUTE), "14:07");
        assert_eq!(format_time_tick(t, DAY), "Mar 05");
    }
}
