// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation: a vertical list of colour swatches with labels.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use hearth_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::color::ColorMap;
use crate::measure::TextMeasurer;
use crate::z_order;

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Label shown next to the swatch.
    pub label: String,
    /// Swatch colour.
    pub fill: Color,
}

/// A swatch legend anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Legend origin (top-left).
    pub origin: Point,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Distance between the tops of consecutive rows.
    pub row_step: f64,
    /// Horizontal offset of the label from the swatch's left edge.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label colour.
    pub text_fill: Color,
    /// Rows in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSpec {
    /// Creates a legend with 16px swatches on a 20px row pitch.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            origin: Point::ZERO,
            swatch_size: 16.0,
            row_step: 20.0,
            label_dx: 24.0,
            font_size: 14.0,
            text_fill: css::BLACK,
            items,
        }
    }

    /// Creates one "Cluster N" row per category of `colors`, in colour-map order.
    pub fn clusters(id_base: u64, colors: &ColorMap) -> Self {
        let items = colors
            .domain()
            .iter()
            .map(|&c| LegendItem {
                label: format!("Cluster {c}"),
                fill: colors.color(Some(c)),
            })
            .collect();
        Self::new(id_base, items)
    }

    /// Sets the origin.
    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the label colour.
    pub fn with_text_fill(mut self, fill: Color) -> Self {
        self.text_fill = fill;
        self
    }

    /// Generates swatch and label marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(2 * self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let y = self.origin.y + i as f64 * self.row_step;
            let swatch = Rect::new(
                self.origin.x,
                y,
                self.origin.x + self.swatch_size,
                y + self.swatch_size,
            );
            out.push(
                Mark::rect(MarkId::from_raw(self.id_base + i as u64), swatch, item.fill)
                    .with_z_index(z_order::LEGEND_SWATCHES),
            );
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    Point::new(self.origin.x + self.label_dx, y + 0.5 * self.swatch_size),
                    item.label.clone(),
                    self.font_size,
                    self.text_fill,
                )
                .with_text_align(TextAnchor::Start, TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }
        out
    }

    /// Estimates the legend's extent.
    pub fn bounds(&self, measurer: &dyn TextMeasurer) -> Rect {
        let label_w = self
            .items
            .iter()
            .map(|i| measurer.measure(&i.label, self.font_size).0)
            .fold(0.0, f64::max);
        let rows = self.items.len() as f64;
        let height = if self.items.is_empty() {
            0.0
        } else {
            (rows - 1.0) * self.row_step + self.swatch_size.max(self.font_size)
        };
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.label_dx + label_w,
            self.origin.y + height,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn cluster_rows_follow_the_color_map() {
        let colors = ColorMap::new(vec![2, 0]);
        let legend = LegendSpec::clusters(500, &colors).at(Point::new(860.0, 50.0));
        assert_eq!(legend.items[0].label, "Cluster 2");
        assert_eq!(legend.items[1].fill, colors.color(Some(0)));

        let marks = legend.marks();
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[2].bounds(), Rect::new(860.0, 70.0, 876.0, 86.0));
    }

    #[test]
    fn bounds_cover_labels() {
        let legend = LegendSpec::new(
            0,
            vec![LegendItem {
                label: String::from("Cluster 10"),
                fill: css::RED,
            }],
        );
        let b = legend.bounds(&HeuristicTextMeasurer);
        assert_eq!(b.x0, 0.0);
        assert!((b.width() - (24.0 + 0.6 * 14.0 * 10.0)).abs() < 1e-9);
        assert_eq!(b.height(), 16.0);
    }
}
