// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart descriptions.
//!
//! A chart is one of three kinds, each with its own options. [`ChartSpec`] is the tagged union
//! the geometry builder and render pass match on.

extern crate alloc;

use alloc::string::String;

use hearth_transforms::AggregateOp;
use peniko::Color;
use peniko::color::palette::css;

use crate::animation::{AnimationSpec, Ease, Entrance, Reveal};
use crate::color::SERIES_DEFAULT;

/// The kind of a chart, without its options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Clustered scatter plot.
    Scatter,
    /// Time series line.
    Line,
    /// Per-year bars.
    Bar,
}

impl ChartKind {
    /// Tooltip offset from the pointer, in pixels.
    pub fn tooltip_offset(self) -> (f64, f64) {
        match self {
            Self::Scatter => (10.0, -30.0),
            Self::Line | Self::Bar => (5.0, -28.0),
        }
    }
}

/// Scatter plot of price against a compare dimension, coloured by cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterSpec {
    /// Chart title.
    pub title: Option<String>,
    /// X axis title; `None` uses the dataset's compare label.
    pub x_title: Option<String>,
    /// Y axis title.
    pub y_title: String,
    /// Point radius; `None` uses the layout profile's radius.
    pub radius: Option<f64>,
    /// Point opacity.
    pub opacity: f64,
    /// Whether to draw the cluster legend.
    pub legend: bool,
    /// Entrance timing.
    pub animation: AnimationSpec,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        Self {
            title: None,
            x_title: None,
            y_title: String::from("Normalised House Price"),
            radius: None,
            opacity: 0.7,
            legend: true,
            animation: AnimationSpec::none().with_entrance(Entrance::new(600.0, 2.0)),
        }
    }
}

impl ScatterSpec {
    /// Creates a scatter spec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the x axis title.
    pub fn with_x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = Some(title.into());
        self
    }

    /// Sets a fixed point radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the point opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Shows or hides the legend.
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Sets the animation.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }
}

/// Price over years as a single line with a dot per year.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSpec {
    /// Chart title.
    pub title: Option<String>,
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// Line colour.
    pub stroke: Color,
    /// Line width.
    pub stroke_width: f64,
    /// Whether to draw a dot at each vertex.
    pub points: bool,
    /// Dot colour.
    pub point_fill: Color,
    /// Whether the price axis starts at 0.
    pub zero: bool,
    /// Path reveal and dot entrance timing.
    pub animation: AnimationSpec,
}

impl Default for LineSpec {
    fn default() -> Self {
        Self {
            title: Some(String::from(
                "Line Chart Prediction of Normalized Price over Year",
            )),
            x_title: String::from("Year"),
            y_title: String::from("Normalized Price"),
            stroke: SERIES_DEFAULT,
            stroke_width: 2.0,
            points: true,
            point_fill: SERIES_DEFAULT,
            zero: true,
            animation: AnimationSpec::none()
                .with_reveal(Reveal::new(4000.0))
                .with_entrance(Entrance::new(1000.0, 700.0)),
        }
    }
}

impl LineSpec {
    /// Creates a line spec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Removes the chart title.
    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    /// Sets the line colour and width.
    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = width;
        self
    }

    /// Shows or hides the per-year dots.
    pub fn with_points(mut self, points: bool) -> Self {
        self.points = points;
        self
    }

    /// Starts the price axis at 0 or at the data minimum.
    pub fn with_zero(mut self, zero: bool) -> Self {
        self.zero = zero;
        self
    }

    /// Sets the animation.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }
}

/// Line drawn through the bar centres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Line colour.
    pub stroke: Color,
    /// Line width.
    pub stroke_width: f64,
    /// Reveal timing; `None` draws the line immediately.
    pub reveal: Option<Reveal>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke: css::RED,
            stroke_width: 2.0,
            reveal: Some(Reveal::new(2000.0)),
        }
    }
}

/// One bar per year.
#[derive(Clone, Debug, PartialEq)]
pub struct BarSpec {
    /// Chart title.
    pub title: Option<String>,
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// Bar colour.
    pub fill: Color,
    /// Bar colour while hovered.
    pub highlight: Color,
    /// Bar opacity while hovered.
    pub highlight_opacity: f64,
    /// Band padding (inner and outer).
    pub padding: f64,
    /// How records of one year are combined.
    pub aggregate: AggregateOp,
    /// Optional trend line through the bar centres.
    pub overlay: Option<OverlayStyle>,
    /// Bar entrance timing.
    pub animation: AnimationSpec,
}

impl Default for BarSpec {
    fn default() -> Self {
        Self {
            title: Some(String::from("Normalized Housing Prices Over Years")),
            x_title: String::from("Year"),
            y_title: String::from("Normalized Housing Price"),
            fill: SERIES_DEFAULT,
            highlight: css::ORANGE,
            highlight_opacity: 0.7,
            padding: 0.1,
            aggregate: AggregateOp::Mean,
            overlay: Some(OverlayStyle::default()),
            animation: AnimationSpec::none()
                .with_entrance(Entrance::new(750.0, 0.0).with_ease(Ease::InOutCubic)),
        }
    }
}

impl BarSpec {
    /// Creates a bar spec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the bar colour.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the hover colour and opacity.
    pub fn with_highlight(mut self, highlight: Color, opacity: f64) -> Self {
        self.highlight = highlight;
        self.highlight_opacity = opacity;
        self
    }

    /// Sets the band padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the aggregation of same-year records.
    pub fn with_aggregate(mut self, aggregate: AggregateOp) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Sets or removes the overlay line.
    pub fn with_overlay(mut self, overlay: Option<OverlayStyle>) -> Self {
        self.overlay = overlay;
        self
    }

    /// Sets the animation.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }
}

/// A chart description.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartSpec {
    /// Scatter plot.
    Scatter(ScatterSpec),
    /// Line chart.
    Line(LineSpec),
    /// Bar chart.
    Bar(BarSpec),
}

impl ChartSpec {
    /// Returns the kind of this chart.
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Scatter(_) => ChartKind::Scatter,
            Self::Line(_) => ChartKind::Line,
            Self::Bar(_) => ChartKind::Bar,
        }
    }

    /// Returns the chart title.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Scatter(s) => s.title.as_deref(),
            Self::Line(s) => s.title.as_deref(),
            Self::Bar(s) => s.title.as_deref(),
        }
    }

    /// Disables every animation, so the first frame is the final state.
    pub fn without_animation(mut self) -> Self {
        match &mut self {
            Self::Scatter(s) => s.animation = AnimationSpec::none(),
            Self::Line(s) => s.animation = AnimationSpec::none(),
            Self::Bar(s) => {
                s.animation = AnimationSpec::none();
                if let Some(o) = &mut s.overlay {
                    o.reveal = None;
                }
            }
        }
        self
    }
}

impl From<ScatterSpec> for ChartSpec {
    fn from(value: ScatterSpec) -> Self {
        Self::Scatter(value)
    }
}

impl From<LineSpec> for ChartSpec {
    fn from(value: LineSpec) -> Self {
        Self::Line(value)
    }
}

impl From<BarSpec> for ChartSpec {
    fn from(value: BarSpec) -> Self {
        Self::Bar(value)
    }
}
