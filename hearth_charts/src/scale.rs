// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: mappings from data domains to pixel ranges.
//!
//! Continuous fields use [`ScaleLinear`], resolved from a dataset through [`ScaleLinearSpec`]
//! (extent, optional zero baseline, nicing). Years on a bar chart use [`ScaleOrdinal`], a band
//! scale over the distinct years in first-seen order.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hearth_core::{Dataset, Field, RenderError};

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
    min_step: f64,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            min_step: 0.0,
        }
    }

    /// Sets a lower bound for the tick step (1 for integer-valued fields such as years).
    pub fn with_min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step.max(0.0);
        self
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        // Halved so that spans near f64::MAX stay finite.
        let half_span = 0.5 * d1 - 0.5 * d0;
        if half_span == 0.0 {
            return r0;
        }
        let t = (0.5 * x - 0.5 * d0) / half_span;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 * (1.0 - t) + d1 * t
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the tick step used by [`ticks`](Self::ticks) for `count`.
    pub fn tick_step(&self, count: usize) -> f64 {
        let span = (self.domain.1 - self.domain.0).abs();
        nice_step(span / count.max(1) as f64).max(self.min_step)
    }

    /// Returns round tick values lying inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        let eps = 1e-9 * (hi - lo).abs().max(1.0);
        nice_ticks(lo, hi, count, self.min_step)
            .into_iter()
            .filter(|v| *v >= lo - eps && *v <= hi + eps)
            .collect()
    }
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Raw domain in data units.
    pub domain: (f64, f64),
    /// Whether to expand the domain to round tick boundaries.
    pub nice: bool,
    /// Whether to extend the domain to include 0 before nicing.
    pub zero: bool,
    /// Lower bound for the tick step.
    pub min_step: f64,
}

impl ScaleLinearSpec {
    /// Creates a spec for a raw domain, niced, without a zero baseline.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: true,
            zero: false,
            min_step: 0.0,
        }
    }

    /// Creates a spec from the extent of `field` over `dataset`.
    ///
    /// Returns [`RenderError::EmptyDataset`] when no record has a finite value for the field.
    pub fn from_data(dataset: &Dataset, field: Field) -> Result<Self, RenderError> {
        let domain = dataset.extent(field).ok_or(RenderError::EmptyDataset)?;
        let spec = Self::new(domain);
        Ok(match field {
            Field::Time | Field::Category => spec.with_min_step(1.0),
            Field::Compare | Field::Target => spec,
        })
    }

    /// Enables or disables nicing.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Enables or disables the zero baseline.
    pub fn with_zero(mut self, zero: bool) -> Self {
        self.zero = zero;
        self
    }

    /// Sets the minimum tick step.
    pub fn with_min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step;
        self
    }

    /// Returns the effective domain for `tick_count` ticks.
    ///
    /// The result always contains the raw domain, and is never degenerate: a single-value
    /// domain is padded by one unit on each side first.
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        let (mut lo, mut hi) = ordered(self.domain);
        if self.zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if lo == hi {
            lo -= 1.0;
            hi += 1.0;
        }
        if !self.nice {
            return (lo, hi);
        }
        let step = nice_step((hi - lo) / tick_count.max(1) as f64).max(self.min_step);
        if step == 0.0 {
            return (lo, hi);
        }
        // Rounding in the division can land a hair inside the extent, and nicing near the
        // edge of the f64 range can overflow; fall back to the raw bound in both cases.
        let nice_lo = (lo / step).floor() * step;
        let nice_hi = (hi / step).ceil() * step;
        (
            if nice_lo.is_finite() { nice_lo.min(lo) } else { lo },
            if nice_hi.is_finite() { nice_hi.max(hi) } else { hi },
        )
    }

    /// Instantiates a scale over `range` using the resolved domain.
    pub fn instantiate(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range).with_min_step(self.min_step)
    }
}

/// A discrete band scale over `count` equal-width bands.
///
/// Padding follows the usual band-scale convention: `padding_inner` is the fraction of each step
/// left empty between bands, `padding_outer` the number of steps left empty at each end, and
/// the bands are centred in the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale with padding 0.1 on both sides.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (lo, hi) = ordered(self.range);
        let n = self.count as f64;
        (hi - lo) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Returns the width of one band.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (lo, hi) = ordered(self.range);
        let step = self.step();
        let n = self.count as f64;
        let start = lo + ((hi - lo) - step * (n - self.padding_inner)) * 0.5;
        start + step * index as f64
    }
}

/// A band scale over distinct integer values (years) in first-seen order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    domain: Vec<i64>,
    band: ScaleBand,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale over `domain` mapped into `range`.
    pub fn new(domain: Vec<i64>, range: (f64, f64)) -> Self {
        let band = ScaleBand::new(range, domain.len());
        Self { domain, band }
    }

    /// Builds the scale from the distinct values of `field`.
    ///
    /// Returns [`RenderError::EmptyDataset`] if no record has the field.
    pub fn from_data(
        dataset: &Dataset,
        field: Field,
        range: (f64, f64),
    ) -> Result<Self, RenderError> {
        let domain = match field {
            Field::Time => dataset.times(),
            Field::Category => dataset.categories(),
            Field::Compare | Field::Target => {
                return Err(RenderError::InvalidLayout(
                    "ordinal scales need an integer field",
                ));
            }
        };
        if domain.is_empty() {
            return Err(RenderError::EmptyDataset);
        }
        Ok(Self::new(domain, range))
    }

    /// Sets band padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.band = self.band.with_padding(inner, outer);
        self
    }

    /// Returns the domain values in band order.
    pub fn domain(&self) -> &[i64] {
        &self.domain
    }

    /// Returns the underlying band scale.
    pub fn band(&self) -> ScaleBand {
        self.band
    }

    /// Returns the band width.
    pub fn band_width(&self) -> f64 {
        self.band.band_width()
    }

    /// Returns the band start for `value`, if it is in the domain.
    pub fn x(&self, value: i64) -> Option<f64> {
        let index = self.domain.iter().position(|&v| v == value)?;
        Some(self.band.x(index))
    }

    /// Returns the band centre for `value`, if it is in the domain.
    pub fn center(&self, value: i64) -> Option<f64> {
        self.x(value).map(|x| x + 0.5 * self.band_width())
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Returns round tick values covering `[min, max]` with roughly `count` ticks.
pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize, min_step: f64) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count as f64).max(min_step);
    if step == 0.0 {
        return alloc::vec![min, max];
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

/// Rounds a raw step to 1, 2 or 5 times a power of ten.
pub(crate) fn nice_step(step: f64) -> f64 {
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

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use hearth_core::Record;

    use super::*;

    /// Deterministic xorshift sequence in `[0, 1)`.
    fn unit_samples(mut state: u64, n: usize) -> impl Iterator<Item = f64> {
        (0..n).map(move |_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1_u64 << 53) as f64
        })
    }

    #[test]
    fn niced_domain_contains_raw_domain() {
        let fixed = [
            (100.0, 200.0),
            (0.13, 0.87),
            (-3.2, 41.0),
            (2016.0, 2020.0),
            (27.504000000000005, 28.000000000000004),
            (23.923000000000002, 24.040000000000003),
        ];
        let mut samples = unit_samples(0x9e37_79b9_7f4a_7c15, 40_000);
        let mut swept = Vec::new();
        while let (Some(a), Some(b), Some(c)) = (samples.next(), samples.next(), samples.next()) {
            // Centres up to 1e4, widths from 1e-3 to 10, quantized to three decimals so that
            // endpoints sit on or next to step multiples.
            let lo = ((a * 2e4 - 1e4) * 1000.0).round() / 1000.0 + 1e-12 * c;
            let width = 10_f64.powf(b * 4.0 - 3.0);
            swept.push((lo, lo + width));
        }
        for (lo, hi) in fixed.into_iter().chain(swept) {
            for count in [5, 10] {
                let (a, b) = ScaleLinearSpec::new((lo, hi)).resolved_domain(count);
                assert!(a <= lo && b >= hi, "{a}..{b} must contain {lo}..{hi}");
            }
        }
    }

    #[test]
    fn extreme_domains_map_to_finite_pixels() {
        let spec = ScaleLinearSpec::new((-1e308, 1e308));
        let (a, b) = spec.resolved_domain(10);
        assert!(a.is_finite() && b.is_finite() && a <= -1e308 && b >= 1e308);
        let s = spec.instantiate((50.0, 900.0), 10);
        assert_eq!(s.map(1e308), 900.0);
        assert_eq!(s.map(-1e308), 50.0);
        assert!((s.map(0.0) - 475.0).abs() < 1e-9);
        assert!(s.invert(900.0).is_finite());

        let near_max = ScaleLinearSpec::new((0.0, 1.7e308)).resolved_domain(5);
        assert!(near_max.1.is_finite() && near_max.1 >= 1.7e308);
        for tick in s.ticks(10) {
            assert!(s.map(tick).is_finite());
        }
    }

    #[test]
    fn single_value_domain_is_padded() {
        let ds = Dataset::new(vec![Record::new(5.0, 5.0)]);
        let spec = ScaleLinearSpec::from_data(&ds, Field::Target).unwrap();
        let (a, b) = spec.resolved_domain(10);
        assert!(a < 5.0 && b > 5.0);
        let s = spec.instantiate((250.0, 50.0), 10);
        assert!(s.map(5.0).is_finite());
        assert!((s.map(5.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn zero_baseline_extends_domain() {
        let (a, b) = ScaleLinearSpec::new((0.4, 0.9)).with_zero(true).resolved_domain(10);
        assert_eq!(a, 0.0);
        assert!(b >= 0.9);
    }

    #[test]
    fn missing_field_is_empty_dataset() {
        let ds = Dataset::new(vec![Record::new(1.0, 1.0)]);
        assert_eq!(
            ScaleLinearSpec::from_data(&ds, Field::Time),
            Err(RenderError::EmptyDataset)
        );
    }

    #[test]
    fn year_ticks_are_integers() {
        let s = ScaleLinearSpec::new((2016.0, 2020.0))
            .with_min_step(1.0)
            .instantiate((0.0, 100.0), 10);
        assert_eq!(s.ticks(10), vec![2016.0, 2017.0, 2018.0, 2019.0, 2020.0]);
    }

    #[test]
    fn y_range_is_inverted() {
        let s = ScaleLinear::new((0.0, 10.0), (200.0, 0.0));
        assert_eq!(s.map(0.0), 200.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.invert(100.0), 5.0);
    }

    #[test]
    fn band_layout_is_centred_with_padding() {
        let b = ScaleBand::new((0.0, 100.0), 3).with_padding(0.1, 0.1);
        let step = 100.0 / 3.1;
        assert!((b.step() - step).abs() < 1e-9);
        assert!((b.band_width() - 0.9 * step).abs() < 1e-9);
        assert!((b.x(0) - 0.1 * step).abs() < 1e-9);
        let end = b.x(2) + b.band_width();
        assert!((100.0 - end - b.x(0)).abs() < 1e-9);
    }

    #[test]
    fn ordinal_keeps_first_seen_order() {
        let ds = Dataset::new(vec![Record::at_time(2018, 1.0), Record::at_time(2016, 1.0)]);
        let s = ScaleOrdinal::from_data(&ds, Field::Time, (0.0, 100.0)).unwrap();
        assert_eq!(s.domain(), &[2018, 2016]);
        assert!(s.x(2018).unwrap() < s.x(2016).unwrap());
        assert_eq!(s.x(2017), None);
    }
}
