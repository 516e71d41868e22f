// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category colour assignment.

extern crate alloc;

use alloc::vec::Vec;

use hearth_core::Dataset;
use peniko::Color;
use peniko::color::palette::css;

/// The ten-colour categorical palette (`category10`).
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// Fill used for uncategorized records and single-series charts.
pub const SERIES_DEFAULT: Color = css::STEEL_BLUE;

/// A deterministic category → colour mapping.
///
/// Built once per dataset load from the *unfiltered* category domain, so toggling categories in
/// the selection never changes the colour of the ones that stay visible. Categories beyond the
/// palette length cycle through it again.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    domain: Vec<i64>,
    palette: Vec<Color>,
    fallback: Color,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ColorMap {
    /// Builds a map over the categories of `dataset` in first-seen order.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.categories())
    }

    /// Builds a map over an explicit domain.
    pub fn new(domain: Vec<i64>) -> Self {
        Self {
            domain,
            palette: CATEGORY10.to_vec(),
            fallback: SERIES_DEFAULT,
        }
    }

    /// Replaces the palette. An empty palette maps everything to the fallback.
    pub fn with_palette(mut self, palette: impl Into<Vec<Color>>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Sets the colour used for uncategorized records and unknown categories.
    pub fn with_fallback(mut self, fallback: Color) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns the categories in legend order.
    pub fn domain(&self) -> &[i64] {
        &self.domain
    }

    /// Returns the colour for `category`.
    pub fn color(&self, category: Option<i64>) -> Color {
        let Some(category) = category else {
            return self.fallback;
        };
        match self.domain.iter().position(|&c| c == category) {
            Some(i) if !self.palette.is_empty() => self.palette[i % self.palette.len()],
            _ => self.fallback,
        }
    }

    /// Returns the fallback colour.
    pub fn fallback(&self) -> Color {
        self.fallback
    }
}
