// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales.
//!
//! A scale is a pure mapping from data values to pixel coordinates. Scales are rebuilt for
//! every render and never mutated after construction.

use crate::extent::Extent;
use crate::time;

/// Which kind of continuous scale to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Linear mapping.
    Linear,
    /// Base-10 logarithmic mapping.
    Log,
    /// Linear mapping over unix seconds, with calendar-aware ticks.
    Time,
}

/// Builds a scale mapping `extent` onto `[0, pixel_range]`.
///
/// A negative `pixel_range` makes values grow upward. Degenerate extents are padded so the
/// mapping never divides by zero.
pub fn compute_scale(extent: Extent, pixel_range: f64, kind: ScaleKind) -> ScaleContinuous {
    let range = (0.0, pixel_range);
    match kind {
        ScaleKind::Linear => {
            ScaleContinuous::Linear(ScaleLinear::new(extent.padded_linear().to_tuple(), range))
        }
        ScaleKind::Log => {
            ScaleContinuous::Log(ScaleLog::new(extent.padded_log().to_tuple(), range))
        }
        ScaleKind::Time => {
            ScaleContinuous::Time(ScaleTime::new(extent.padded_time().to_tuple(), range))
        }
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    ///
    /// Log scales map values `<= 0` to NaN.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a value, returning `None` when the result is not a finite coordinate.
    pub fn try_map(&self, x: f64) -> Option<f64> {
        let y = self.map(x);
        y.is_finite().then_some(y)
    }

    /// Returns tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Extends a linear domain to tick boundaries. Other kinds are returned unchanged.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        match self {
            Self::Linear(s) => Self::Linear(s.nice(count)),
            Self::Log(_) | Self::Time(_) => self,
        }
    }

    /// Returns the kind of this scale.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    /// Returns the `(start, end)` domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain,
            Self::Log(s) => s.domain,
            Self::Time(s) => s.inner.domain,
        }
    }

    /// Returns the `(start, end)` range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range,
            Self::Log(s) => s.range,
            Self::Time(s) => s.inner.range,
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns "nice" tick values (1, 2 or 5 times a power of ten) inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        within(nice_ticks(self.domain.0, self.domain.1, count), self.domain)
    }

    /// Extends the domain outward to the first and last nice tick.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let ticks = nice_ticks(self.domain.0, self.domain.1, count);
        match (ticks.first(), ticks.last()) {
            (Some(&a), Some(&b)) if ticks.len() >= 2 => {
                let domain = if self.domain.0 <= self.domain.1 {
                    (a, b)
                } else {
                    (b, a)
                };
                Self::new(domain, self.range)
            }
            _ => self,
        }
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// A base-10 log mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLog {
    /// Creates a new log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Values `<= 0` have no logarithm and map to NaN.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return f64::NAN;
        }
        let ld0 = d0.log10();
        let denom = d1.log10() - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x.log10() - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns tick values for a log domain.
    ///
    /// Powers of ten inside the domain; when fewer than two fall inside, the multiples
    /// `k * 10^e` are used instead, and failing that, linear ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if count == 0 || min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let min_e = exponent(min.log10().floor());
        let max_e = exponent(max.log10().ceil());

        let powers: Vec<f64> = (min_e..=max_e)
            .map(|e| 10_f64.powi(e))
            .filter(|v| (min..=max).contains(v))
            .collect();
        if powers.len() >= 2 {
            return thin(powers, count);
        }

        let multiples: Vec<f64> = (min_e..=max_e)
            .flat_map(|e| (1..10).map(move |k| f64::from(k) * 10_f64.powi(e)))
            .filter(|v| (min..=max).contains(v))
            .collect();
        if multiples.len() >= 2 {
            return thin(multiples, count);
        }

        within(nice_ticks(min, max, count), (min, max))
    }
}

fn exponent(e: f64) -> i32 {
    let e = e.clamp(-300.0, 300.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        e as i32
    }
}

fn thin(ticks: Vec<f64>, count: usize) -> Vec<f64> {
    if ticks.len() <= count.max(1) {
        return ticks;
    }
    let stride = ticks.len().div_ceil(count.max(1));
    ticks.into_iter().step_by(stride).collect()
}

/// A time scale: a linear scale over unix seconds with calendar-aware ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale over a domain in unix seconds.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns tick values inside the domain, aligned to second/minute/hour/day steps.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.inner.domain;
        within(time::nice_time_ticks_seconds(a, b, count), (a, b))
    }
}

fn within(ticks: Vec<f64>, (a, b): (f64, f64)) -> Vec<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let eps = (hi - lo).abs() * 1e-9;
    ticks
        .into_iter()
        .filter(|t| *t >= lo - eps && *t <= hi + eps)
        .collect()
}

/// Returns "nice" ticks covering `[min, max]`, starting at or below `min` and ending at or
/// above `max`.
pub fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor();
    let stop = (max / step).ceil();

    let n_f = (stop - start).round();
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
    // Multiplying the integer index keeps ticks like 0.3 free of accumulated error.
    (0..=n)
        .map(|i| {
            let k = start + i as f64;
            if step < 1.0 {
                k / (1.0 / step).round()
            } else {
                k * step
            }
        })
        .collect()
}

/// Returns the tick step [`nice_ticks`] would use.
pub fn tick_step(min: f64, max: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    nice_step((max - min).abs() / count as f64)
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
