// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive chart building for Hearth housing analytics.
//!
//! This crate turns a [`hearth_core::Dataset`] into a [`hearth_core::Scene`]:
//! - **Layout** classifies the viewport and fixes the plot rectangle.
//! - **Scales** map data values into that rectangle; **colours** map clusters to swatches.
//! - **Geometry** builds one shape per visible record (points, bars) plus a line path.
//! - **Guides** (axes, legend, title) are generated as plain marks.
//! - **Animation** and **interaction** rewrite a finished scene per frame without rebuilding it.
//!
//! [`render`] is the pure entry point; [`ChartView`] wraps it with dataset loading, selection,
//! stale-fetch rejection and hover state.
//!
//! Text shaping is out of scope; text marks store unshaped strings and sizes are estimated with
//! a [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod animation;
mod axis;
mod chart;
mod chart_spec;
mod color;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod interaction;
mod layout;
mod legend;
mod measure;
mod scale;
mod theme;
mod title;
mod view;
mod z_order;

pub use animation::{AnimationPlan, AnimationSpec, Ease, Effect, Entrance, Reveal, Track};
pub use axis::{AxisOrient, AxisScale, AxisSpec};
pub use chart::{RenderPass, render};
pub use chart_spec::{BarSpec, ChartKind, ChartSpec, LineSpec, OverlayStyle, ScatterSpec};
pub use color::{CATEGORY10, ColorMap, SERIES_DEFAULT};
pub use format::{format_fixed, format_tick_with_step};
pub use geometry::{ChartGeometry, LINE_PATH_ID, LinePath, Shape, ShapeKind, XScale};
pub use interaction::{InteractionState, PointerEvent, TooltipState, transition};
pub use layout::{LayoutProfile, Margins, Size, ViewportClass};
pub use legend::{LegendItem, LegendSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use scale::{ScaleBand, ScaleLinear, ScaleLinearSpec, ScaleOrdinal};
pub use theme::Theme;
pub use title::TitleSpec;
pub use view::{ChartView, ViewStatus};
pub use z_order::*;
