// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! A single [`AxisSpec`] covers both chart axes: `Bottom` for the x scale (continuous or banded
//! years) and `Left` for the price scale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use hearth_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::geometry::XScale;
use crate::scale::ScaleLinear;
use crate::z_order;

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the plot.
    Bottom,
    /// Vertical axis left of the plot.
    Left,
}

/// The scale an axis draws.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// Continuous ticks.
    Linear(ScaleLinear),
    /// One tick per band, at the band centre, labelled with the integer value.
    Band {
        /// Domain values in band order.
        values: Vec<i64>,
        /// Band centres, aligned with `values`.
        centers: Vec<f64>,
    },
}

impl From<&XScale> for AxisScale {
    fn from(value: &XScale) -> Self {
        match value {
            XScale::Linear(s) => Self::Linear(*s),
            XScale::Band(s) => {
                let values = s.domain().to_vec();
                let centers = values.iter().filter_map(|v| s.center(*v)).collect();
                Self::Band { values, centers }
            }
        }
    }
}

/// An axis specification.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The scale to draw.
    pub scale: AxisScale,
    /// Axis placement.
    pub orient: AxisOrient,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between tick end and label.
    pub tick_padding: f64,
    /// Tick label font size.
    pub label_font_size: f64,
    /// Optional axis title.
    pub title: Option<String>,
    /// Axis title font size.
    pub title_font_size: f64,
    /// Distance from the axis line to the title.
    pub title_offset: f64,
    /// Domain line and tick colour.
    pub rule: Color,
    /// Label and title colour.
    pub text: Color,
}

impl AxisSpec {
    /// Creates an axis with default styling: 6px ticks, 3px padding, 10px labels.
    pub fn new(id_base: u64, scale: AxisScale, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            label_font_size: 10.0,
            title: None,
            title_font_size: 16.0,
            title_offset: match orient {
                AxisOrient::Bottom => 36.0,
                AxisOrient::Left => 38.0,
            },
            rule: css::BLACK,
            text: css::BLACK,
        }
    }

    /// Creates a bottom axis.
    pub fn bottom(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale.into(), AxisOrient::Bottom)
    }

    /// Creates a left axis.
    pub fn left(id_base: u64, scale: ScaleLinear) -> Self {
        Self::new(id_base, AxisScale::Linear(scale), AxisOrient::Left)
    }

    /// Sets the tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the tick label font size.
    pub fn with_label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>, font_size: f64) -> Self {
        self.title = Some(title.into());
        self.title_font_size = font_size;
        self
    }

    /// Sets the rule and text colours.
    pub fn with_colors(mut self, rule: Color, text: Color) -> Self {
        self.rule = rule;
        self.text = text;
        self
    }

    /// Returns `(position, label)` for every tick.
    pub fn ticks(&self) -> Vec<(f64, String)> {
        match &self.scale {
            AxisScale::Linear(s) => {
                let step = s.tick_step(self.tick_count);
                s.ticks(self.tick_count)
                    .into_iter()
                    .map(|v| (s.map(v), format_tick_with_step(v, step)))
                    .collect()
            }
            AxisScale::Band { values, centers } => values
                .iter()
                .zip(centers)
                .map(|(v, c)| (*c, alloc::format!("{v}")))
                .collect(),
        }
    }

    /// Generates the axis marks for `plot`.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Bottom => self.marks_bottom(plot),
            AxisOrient::Left => self.marks_left(plot),
        }
    }

    fn marks_bottom(&self, plot: Rect) -> Vec<Mark> {
        let y = plot.y1;
        let mut out = Vec::new();

        let mut domain = BezPath::new();
        domain.move_to((plot.x0, y));
        domain.line_to((plot.x1, y));
        out.push(self.rule_mark(0, domain));

        for (i, (x, label)) in self.ticks().into_iter().enumerate() {
            let mut tick = BezPath::new();
            tick.move_to((x, y));
            tick.line_to((x, y + self.tick_size));
            out.push(self.rule_mark(1 + i as u64, tick));
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    Point::new(x, y + self.tick_size + self.tick_padding),
                    label,
                    self.label_font_size,
                    self.text,
                )
                .with_text_align(TextAnchor::Middle, TextBaseline::Hanging)
                .with_z_index(z_order::AXIS_LABELS),
            );
        }

        if let Some(title) = &self.title {
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 9000),
                    Point::new(0.5 * (plot.x0 + plot.x1), y + self.title_offset),
                    title.clone(),
                    self.title_font_size,
                    self.text,
                )
                .with_text_align(TextAnchor::Middle, TextBaseline::Alphabetic)
                .with_z_index(z_order::AXIS_TITLES),
            );
        }
        out
    }

    fn marks_left(&self, plot: Rect) -> Vec<Mark> {
        let x = plot.x0;
        let mut out = Vec::new();

        let mut domain = BezPath::new();
        domain.move_to((x, plot.y0));
        domain.line_to((x, plot.y1));
        out.push(self.rule_mark(0, domain));

        for (i, (y, label)) in self.ticks().into_iter().enumerate() {
            let mut tick = BezPath::new();
            tick.move_to((x - self.tick_size, y));
            tick.line_to((x, y));
            out.push(self.rule_mark(1 + i as u64, tick));
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    Point::new(x - self.tick_size - self.tick_padding, y),
                    label,
                    self.label_font_size,
                    self.text,
                )
                .with_text_align(TextAnchor::End, TextBaseline::Middle)
                .with_z_index(z_order::AXIS_LABELS),
            );
        }

        if let Some(title) = &self.title {
            // Rotated a quarter turn counter-clockwise, reading bottom to top.
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 9000),
                    Point::new(x - self.title_offset, 0.5 * (plot.y0 + plot.y1)),
                    title.clone(),
                    self.title_font_size,
                    self.text,
                )
                .with_text_align(TextAnchor::Middle, TextBaseline::Alphabetic)
                .with_angle(-90.0)
                .with_z_index(z_order::AXIS_TITLES),
            );
        }
        out
    }

    fn rule_mark(&self, offset: u64, path: BezPath) -> Mark {
        Mark::stroke(MarkId::from_raw(self.id_base + offset), path, self.rule, 1.0)
            .with_z_index(z_order::AXIS_RULES)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use hearth_core::MarkPayload;

    use super::*;
    use crate::scale::ScaleOrdinal;

    #[test]
    fn linear_ticks_are_labelled_with_step_decimals() {
        let s = ScaleLinear::new((0.0, 1.0), (250.0, 50.0));
        let axis = AxisSpec::left(100, s).with_tick_count(5);
        let ticks = axis.ticks();
        let labels: Vec<&str> = ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
        assert_eq!(ticks[0].0, 250.0);
    }

    #[test]
    fn band_axis_labels_years_at_band_centres() {
        let ord = ScaleOrdinal::new(vec![2016, 2017], (0.0, 100.0));
        let axis = AxisSpec::bottom(200, &XScale::Band(ord.clone()));
        let ticks = axis.ticks();
        assert_eq!(ticks[0].1, "2016");
        assert_eq!(ticks[1].1, "2017");
        assert!((ticks[0].0 - ord.center(2016).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn bottom_axis_emits_domain_ticks_labels_and_title() {
        let s = ScaleLinear::new((0.0, 10.0), (50.0, 900.0));
        let axis = AxisSpec::bottom(300, &XScale::Linear(s))
            .with_tick_count(2)
            .with_title("Rooms", 16.0);
        let marks = axis.marks(Rect::new(50.0, 50.0, 900.0, 460.0));
        let texts = marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Text(_)))
            .count();
        let n = axis.ticks().len();
        assert_eq!(marks.len(), 1 + 2 * n + 1);
        assert_eq!(texts, n + 1);
    }
}
