// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

/// Formats a tick value using just enough decimals for the tick step, with thousands
/// separators (`1,500`, `0.25`).
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = decimals_for_step(step);
    let s = format!("{:.*}", decimals, v.abs());
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let mut out = String::with_capacity(s.len() + int.len() / 3 + 1);
    let negative = v < 0.0 && s.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        out.push('-');
    }
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    let d = (-step.log10().floor()).clamp(0.0, 20.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        d as usize
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Formats a value with one significant digit and an SI prefix (`2k`, `20M`, `500m`).
pub fn format_si(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let sign = if v < 0.0 { "-" } else { "" };
    let a = v.abs();
    let mut exp = to_i32(a.log10().floor());
    let mut digit = (a / 10_f64.powi(exp)).round();
    if digit >= 10.0 {
        digit = 1.0;
        exp += 1;
    }
    let group = exp.div_euclid(3).clamp(-8, 8);
    let shift = exp - group * 3;
    let mantissa = if shift >= 0 {
        format!("{}", digit * 10_f64.powi(shift))
    } else {
        let decimals = usize::try_from(-shift).unwrap_or(0);
        format!("{:.*}", decimals, digit * 10_f64.powi(shift))
    };
    let prefix = usize::try_from(group + 8)
        .ok()
        .and_then(|i| SI_PREFIXES.get(i))
        .copied()
        .unwrap_or_default();
    format!("{sign}{mantissa}{prefix}")
}

fn to_i32(v: f64) -> i32 {
    let v = v.clamp(-400.0, 400.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        v as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_precision_and_grouping() {
        assert_eq!(format_tick_with_step(1500.0, 500.0), "1,500");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(-2.0, 0.5), "-2.0");
        assert_eq!(format_tick_with_step(1_234_567.0, 1.0), "1,234,567");
        assert_eq!(format_tick_with_step(-0.0001, 1.0), "0");
    }

    #[test]
    fn si_uses_one_significant_digit() {
        assert_eq!(format_si(0.0), "0");
        assert_eq!(format_si(1500.0), "2k");
        assert_eq!(format_si(20e6), "20M");
        assert_eq!(format_si(0.5), "500m");
        assert_eq!(format_si(-3.0), "-3");
        assert_eq!(format_si(960.0), "1k");
    }
}
