// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport classification and layout profiles.
//!
//! A chart is laid out from a fixed canvas size per viewport class. Margins are carved out of the
//! canvas to get the plot rectangle; the plot rectangle alone determines the scale ranges.

use kurbo::Rect;

use hearth_core::RenderError;

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Coarse viewport class derived from the host's viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Width up to 600 px.
    Mobile,
    /// Width from 601 to 1024 px.
    Tablet,
    /// Width above 1024 px.
    Desktop,
}

impl ViewportClass {
    /// Classifies a viewport width in pixels.
    pub fn classify(viewport_width: u32) -> Self {
        match viewport_width {
            0..=600 => Self::Mobile,
            601..=1024 => Self::Tablet,
            _ => Self::Desktop,
        }
    }
}

/// Space reserved around the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Top margin (title strip).
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin (x axis).
    pub bottom: f64,
    /// Left margin (y axis).
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 100.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Everything layout-related a render pass needs for one viewport class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutProfile {
    /// The class this profile was built for.
    pub class: ViewportClass,
    /// Canvas size, margins included.
    pub canvas: Size,
    /// Margins carved out of the canvas.
    pub margins: Margins,
    /// Extra surface beyond the canvas (room for the legend and rotated labels).
    pub overflow: Size,
    /// Radius of scatter and line points.
    pub point_radius: f64,
    /// Approximate number of axis ticks.
    pub tick_count: usize,
    /// Tick label font size.
    pub tick_font_size: f64,
    /// Axis title font size.
    pub axis_title_font_size: f64,
    /// Legend label font size.
    pub legend_font_size: f64,
    /// Chart title font size.
    pub title_font_size: f64,
}

impl LayoutProfile {
    /// Returns the built-in profile for `class`.
    pub fn for_class(class: ViewportClass) -> Self {
        let mobile = class == ViewportClass::Mobile;
        let canvas = match class {
            ViewportClass::Mobile => Size::new(500.0, 300.0),
            ViewportClass::Tablet => Size::new(800.0, 400.0),
            ViewportClass::Desktop => Size::new(1000.0, 500.0),
        };
        Self {
            class,
            canvas,
            margins: Margins::default(),
            overflow: Size::new(100.0, if mobile { 50.0 } else { 10.0 }),
            point_radius: if mobile { 3.0 } else { 5.0 },
            tick_count: if mobile { 5 } else { 10 },
            tick_font_size: 14.0,
            axis_title_font_size: if mobile { 12.0 } else { 16.0 },
            legend_font_size: if mobile { 10.0 } else { 14.0 },
            title_font_size: 16.0,
        }
    }

    /// Classifies `viewport_width` and returns the matching profile.
    pub fn for_viewport(viewport_width: u32) -> Self {
        Self::for_class(ViewportClass::classify(viewport_width))
    }

    /// Sets the canvas size.
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas = Size::new(width, height);
        self
    }

    /// Sets the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the point radius.
    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }

    /// Sets the tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Returns the plot rectangle, or [`RenderError::InvalidLayout`] if it has no area.
    pub fn plot_rect(&self) -> Result<Rect, RenderError> {
        let m = self.margins;
        let valid = [m.top, m.right, m.bottom, m.left, self.canvas.width, self.canvas.height]
            .iter()
            .all(|v| v.is_finite());
        if !valid {
            return Err(RenderError::InvalidLayout("non-finite canvas or margins"));
        }
        let plot = Rect::new(
            m.left,
            m.top,
            self.canvas.width - m.right,
            self.canvas.height - m.bottom,
        );
        if plot.width() <= 0.0 || plot.height() <= 0.0 {
            return Err(RenderError::InvalidLayout("margins leave no plot area"));
        }
        if self.point_radius < 0.0 || !self.point_radius.is_finite() {
            return Err(RenderError::InvalidLayout("point radius must be non-negative"));
        }
        Ok(plot)
    }

    /// Returns the full drawing surface, overflow included.
    pub fn surface(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.canvas.width + self.overflow.width.max(0.0),
            self.canvas.height + self.overflow.height.max(0.0),
        )
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::for_class(ViewportClass::Desktop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(ViewportClass::classify(390), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(600), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(601), ViewportClass::Tablet);
        assert_eq!(ViewportClass::classify(1024), ViewportClass::Tablet);
        assert_eq!(ViewportClass::classify(1025), ViewportClass::Desktop);
    }

    #[test]
    fn mobile_profile_is_compact() {
        let p = LayoutProfile::for_viewport(400);
        assert_eq!(p.canvas, Size::new(500.0, 300.0));
        assert_eq!(p.point_radius, 3.0);
        assert_eq!(p.tick_count, 5);
        assert_eq!(p.plot_rect().unwrap(), Rect::new(50.0, 50.0, 400.0, 260.0));
    }

    #[test]
    fn oversized_margins_are_invalid() {
        let p = LayoutProfile::default().with_canvas(100.0, 80.0);
        assert!(matches!(p.plot_rect(), Err(RenderError::InvalidLayout(_))));
    }
}
