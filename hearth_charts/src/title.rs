// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use hearth_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::z_order;

/// A chart-level title, centred above the plot.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Whether the title is bold.
    pub bold: bool,
    /// Fill colour.
    pub fill: Color,
}

impl TitleSpec {
    /// Creates a 16px bold title.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 16.0,
            bold: true,
            fill: css::BLACK,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill colour.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Emits the title mark, centred horizontally over `plot` in the middle of the top margin.
    pub fn mark(&self, plot: Rect, margin_top: f64) -> Mark {
        Mark::text(
            self.id,
            Point::new(0.5 * (plot.x0 + plot.x1), plot.y0 - 0.5 * margin_top),
            self.text.clone(),
            self.font_size,
            self.fill,
        )
        .with_text_align(TextAnchor::Middle, TextBaseline::Middle)
        .with_bold(self.bold)
        .with_z_index(z_order::TITLES)
    }
}
