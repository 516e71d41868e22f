// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and tooltips.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Formats a tick value with just enough decimals to distinguish ticks `step` apart.
///
/// A step of `0.2` gives one decimal, `0.05` two, and any step `>= 1` none.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    format_fixed(value, step_decimals(step))
}

/// Formats `value` with exactly `decimals` fractional digits (JavaScript `toFixed`).
///
/// Negative zero prints as `0`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return String::from(&s[1..]);
    }
    s
}

fn step_decimals(step: f64) -> usize {
    let mut step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let mut decimals = 0;
    while step < 1.0 - 1e-9 && decimals < 6 {
        step *= 10.0;
        decimals += 1;
    }
    decimals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_follow_step() {
        assert_eq!(format_tick_with_step(0.4, 0.2), "0.4");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(2016.0, 1.0), "2016");
        assert_eq!(format_tick_with_step(100.0, 20.0), "100");
    }

    #[test]
    fn fixed_matches_to_fixed() {
        assert_eq!(format_fixed(0.456, 2), "0.46");
        assert_eq!(format_fixed(3.0, 2), "3.00");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
    }
}
