// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the vector draw commands a render pass produces.
//!
//! Marks are plain values. A render pass evaluates scales and geometry eagerly and emits fully
//! resolved marks; renderers (SVG, raster) only read them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

/// Stable identity of a mark.
///
/// Ids are stable across render passes for the same record, so hit results and animation
/// bookkeeping can refer to a shape without holding a reference to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for the shape bound to `key` within a series.
    ///
    /// The series occupies the high 16 bits, so different shape families of one chart (points,
    /// bars, overlay) never collide.
    pub const fn for_record(series: u16, key: u64) -> Self {
        Self(((series as u64) << 48) | (key & 0x0000_FFFF_FFFF_FFFF))
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// The position is the start of the text.
    #[default]
    Start,
    /// The position is the horizontal centre of the text.
    Middle,
    /// The position is the end of the text.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    #[default]
    Alphabetic,
    /// The position is the vertical centre of the text.
    Middle,
    /// The position is the top of the text.
    Hanging,
    /// The position is the bottom of the text.
    Ideographic,
}

/// A stroke dash pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeDash {
    /// Alternating dash and gap lengths.
    pub array: Vec<f64>,
    /// Offset into the pattern.
    pub offset: f64,
}

impl StrokeDash {
    /// A single dash of `length` followed by a gap of the same length, shifted by `offset`.
    ///
    /// With `length` equal to the path length, sweeping `offset` from `length` to 0 reveals the
    /// path from its start.
    pub fn reveal(length: f64, offset: f64) -> Self {
        Self {
            array: alloc::vec![length, length],
            offset,
        }
    }
}

/// A filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleMark {
    /// Centre in scene coordinates.
    pub center: Point,
    /// Radius in scene units.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// A stroked and/or filled path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path geometry.
    pub path: BezPath,
    /// Optional fill paint.
    pub fill: Option<Brush>,
    /// Optional stroke paint.
    pub stroke: Option<Brush>,
    /// Stroke width.
    pub stroke_width: f64,
    /// Optional dash pattern.
    pub dash: Option<StrokeDash>,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Whether the text is drawn bold.
    pub bold: bool,
}

/// What a mark draws.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectMark),
    /// A circle.
    Circle(CircleMark),
    /// A path.
    Path(PathMark),
    /// A text run.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the geometric bounds of the payload.
    ///
    /// Text has no shaping here, so its bounds collapse to the anchor point.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(r) => r.rect,
            Self::Circle(c) => Rect::from_center_size(c.center, (2.0 * c.radius, 2.0 * c.radius)),
            Self::Path(p) => {
                let b = p.path.bounding_box();
                if p.stroke.is_some() {
                    b.inflate(0.5 * p.stroke_width, 0.5 * p.stroke_width)
                } else {
                    b
                }
            }
            Self::Text(t) => Rect::from_points(t.pos, t.pos),
        }
    }
}

/// A resolved draw command.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Group opacity in `[0, 1]`.
    pub opacity: f64,
    /// What to draw.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates an opaque mark at z-index 0.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            opacity: 1.0,
            payload,
        }
    }

    /// Creates a rectangle mark.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectMark {
                rect,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a circle mark.
    pub fn circle(id: MarkId, center: Point, radius: f64, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Circle(CircleMark {
                center,
                radius,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a stroked path mark with no fill.
    pub fn stroke(id: MarkId, path: BezPath, stroke: impl Into<Brush>, width: f64) -> Self {
        Self::new(
            id,
            MarkPayload::Path(PathMark {
                path,
                fill: None,
                stroke: Some(stroke.into()),
                stroke_width: width,
                dash: None,
            }),
        )
    }

    /// Creates a text mark with default anchor and baseline.
    pub fn text(
        id: MarkId,
        pos: Point,
        text: impl Into<String>,
        font_size: f64,
        fill: impl Into<Brush>,
    ) -> Self {
        Self::new(
            id,
            MarkPayload::Text(TextMark {
                pos,
                text: text.into(),
                font_size,
                fill: fill.into(),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
                angle: 0.0,
                bold: false,
            }),
        )
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the group opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets text anchor and baseline. No-op for non-text marks.
    pub fn with_text_align(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
            t.baseline = baseline;
        }
        self
    }

    /// Sets the text rotation in degrees. No-op for non-text marks.
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }

    /// Draws text in bold. No-op for non-text marks.
    pub fn with_bold(mut self, bold: bool) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.bold = bold;
        }
        self
    }

    /// Sets the stroke dash. No-op for non-path marks.
    pub fn with_dash(mut self, dash: StrokeDash) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.dash = Some(dash);
        }
        self
    }

    /// Replaces the fill paint of rectangles and circles.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill.into(),
            MarkPayload::Circle(c) => c.fill = fill.into(),
            MarkPayload::Path(p) => p.fill = Some(fill.into()),
            MarkPayload::Text(t) => t.fill = fill.into(),
        }
        self
    }

    /// Returns the geometric bounds of the mark.
    pub fn bounds(&self) -> Rect {
        self.payload.bounds()
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn record_ids_do_not_collide_across_series() {
        let a = MarkId::for_record(0, 7);
        let b = MarkId::for_record(1, 7);
        assert_ne!(a, b);
        assert_eq!(MarkId::for_record(0, 7), a);
    }

    #[test]
    fn opacity_is_clamped() {
        let m = Mark::rect(MarkId(1), Rect::new(0.0, 0.0, 1.0, 1.0), css::RED).with_opacity(3.0);
        assert_eq!(m.opacity, 1.0);
    }

    #[test]
    fn circle_bounds_cover_the_radius() {
        let m = Mark::circle(MarkId(1), Point::new(10.0, 10.0), 5.0, css::RED);
        assert_eq!(m.bounds(), Rect::new(5.0, 5.0, 15.0, 15.0));
    }
}
