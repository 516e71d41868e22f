// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry: scaled shapes derived from a filtered dataset.
//!
//! [`ChartGeometry::build`] turns records into shapes (points, bars) and, for time series, one
//! ordered path. Geometry is ephemeral: it is rebuilt on every render pass and never patched.
//!
//! Records lacking a field the chart needs are skipped. Each skip is recorded as a
//! [`MissingFieldWarning`] on the geometry and logged; rendering continues with the rest.

extern crate alloc;

use alloc::vec::Vec;

use hearth_core::{
    Dataset, Field, FieldLabels, Mark, MarkId, MissingFieldWarning, Record, RenderError,
};
use hearth_transforms::{bucket_by_time_with, sort_by_time};
use kurbo::{BezPath, Point, Rect};
use peniko::Color;

use crate::chart_spec::{BarSpec, ChartKind, ChartSpec, LineSpec, ScatterSpec};
use crate::color::ColorMap;
use crate::layout::LayoutProfile;
use crate::scale::{ScaleLinear, ScaleLinearSpec, ScaleOrdinal};
use crate::z_order;

/// Id series for scatter and line points.
pub(crate) const SERIES_POINTS: u16 = 1;
/// Id series for bars.
pub(crate) const SERIES_BARS: u16 = 2;
/// Id of the line (or bar overlay) path.
pub const LINE_PATH_ID: MarkId = MarkId::for_record(3, 0);

/// The x scale of a chart.
#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    /// Continuous x (compare dimension or year).
    Linear(ScaleLinear),
    /// One band per year.
    Band(ScaleOrdinal),
}

/// The drawable part of a [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// A filled circle.
    Point {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// A filled rectangle.
    Bar {
        /// Rectangle, from the value down to the baseline.
        rect: Rect,
    },
}

/// One shape bound to the record it was derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    /// Stable id (derived from the record key).
    pub id: MarkId,
    /// What to draw.
    pub kind: ShapeKind,
    /// Fill colour.
    pub fill: Color,
    /// Opacity.
    pub opacity: f64,
    /// Paint order.
    pub z_index: i32,
    /// The source record.
    pub record: Record,
}

impl Shape {
    /// Returns `true` if `p` lies on the shape.
    pub fn contains(&self, p: Point) -> bool {
        match self.kind {
            ShapeKind::Point { center, radius } => center.distance(p) <= radius,
            ShapeKind::Bar { rect } => {
                p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
            }
        }
    }

    /// Returns the visual centre of the shape.
    pub fn center(&self) -> Point {
        match self.kind {
            ShapeKind::Point { center, .. } => center,
            ShapeKind::Bar { rect } => rect.center(),
        }
    }

    /// Lowers the shape into a mark.
    pub fn mark(&self) -> Mark {
        let mark = match self.kind {
            ShapeKind::Point { center, radius } => Mark::circle(self.id, center, radius, self.fill),
            ShapeKind::Bar { rect } => Mark::rect(self.id, rect, self.fill),
        };
        mark.with_z_index(self.z_index).with_opacity(self.opacity)
    }
}

/// An ordered polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePath {
    /// Stable id.
    pub id: MarkId,
    /// Vertices in time order.
    pub vertices: Vec<Point>,
    /// Stroke colour.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f64,
}

impl LinePath {
    /// Returns the path through the vertices.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut vertices = self.vertices.iter().copied();
        if let Some(first) = vertices.next() {
            path.move_to(first);
            for v in vertices {
                path.line_to(v);
            }
        }
        path
    }

    /// Returns the total length of the polyline.
    pub fn length(&self) -> f64 {
        kurbo::Shape::perimeter(&self.path(), 1e-6)
    }

    /// Lowers the path into a stroked mark.
    pub fn mark(&self) -> Mark {
        Mark::stroke(self.id, self.path(), self.stroke, self.stroke_width)
            .with_z_index(z_order::SERIES_STROKE)
    }
}

/// The geometry of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    /// Chart kind.
    pub kind: ChartKind,
    /// Plot rectangle the scales map into.
    pub plot: Rect,
    /// X scale.
    pub x: XScale,
    /// Y scale.
    pub y: ScaleLinear,
    /// Pixel y of the value 0 (bar charts) or the bottom of the plot.
    pub baseline: f64,
    /// Shapes in emission order.
    pub shapes: Vec<Shape>,
    /// The line (line charts) or overlay (bar charts).
    pub line: Option<LinePath>,
    /// Records skipped for missing fields.
    pub warnings: Vec<MissingFieldWarning>,
    /// Labels of the rendered dataset.
    pub labels: FieldLabels,
}

impl ChartGeometry {
    /// Builds geometry for `spec` from an already filtered dataset.
    ///
    /// Fails with [`RenderError::EmptyDataset`] when no record can be placed, and with
    /// [`RenderError::InvalidLayout`] when the profile leaves no plot area.
    pub fn build(
        spec: &ChartSpec,
        filtered: &Dataset,
        colors: &ColorMap,
        profile: &LayoutProfile,
    ) -> Result<Self, RenderError> {
        let plot = profile.plot_rect()?;
        if filtered.is_empty() {
            return Err(RenderError::EmptyDataset);
        }
        let geometry = match spec {
            ChartSpec::Scatter(s) => build_scatter(s, filtered, colors, profile, plot),
            ChartSpec::Line(s) => build_line(s, filtered, profile, plot),
            ChartSpec::Bar(s) => build_bar(s, filtered, profile, plot),
        }?;
        tracing::debug!(
            kind = ?geometry.kind,
            shapes = geometry.shapes.len(),
            skipped = geometry.warnings.len(),
            "built geometry"
        );
        Ok(geometry)
    }

    /// Lowers shapes and the line into marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out: Vec<Mark> = self.shapes.iter().map(Shape::mark).collect();
        if let Some(line) = &self.line {
            out.push(line.mark());
        }
        out
    }

    /// Returns the topmost shape under `p`.
    pub fn hit_test(&self, p: Point) -> Option<&Shape> {
        self.shapes
            .iter()
            .filter(|s| s.contains(p))
            .max_by_key(|s| (s.z_index, s.id))
    }

    /// Finds a shape by id.
    pub fn shape(&self, id: MarkId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }
}

fn skip(warnings: &mut Vec<MissingFieldWarning>, record: &Record, field: Field) {
    tracing::warn!(key = record.key, %field, "skipping record with missing field");
    warnings.push(MissingFieldWarning {
        key: record.key,
        field,
    });
}

fn y_range(plot: Rect) -> (f64, f64) {
    (plot.y1, plot.y0)
}

fn build_scatter(
    spec: &ScatterSpec,
    filtered: &Dataset,
    colors: &ColorMap,
    profile: &LayoutProfile,
    plot: Rect,
) -> Result<ChartGeometry, RenderError> {
    let x = ScaleLinearSpec::from_data(filtered, Field::Compare)?
        .instantiate((plot.x0, plot.x1), profile.tick_count);
    let y = ScaleLinearSpec::from_data(filtered, Field::Target)?
        .instantiate(y_range(plot), profile.tick_count);
    let radius = spec.radius.unwrap_or(profile.point_radius);

    let mut shapes = Vec::with_capacity(filtered.len());
    let mut warnings = Vec::new();
    for r in filtered {
        if let Some(field) = r.first_missing(&[Field::Compare, Field::Target]) {
            skip(&mut warnings, r, field);
            continue;
        }
        let (Some(cx), Some(cy)) = (r.number(Field::Compare), r.number(Field::Target)) else {
            continue;
        };
        shapes.push(Shape {
            id: MarkId::for_record(SERIES_POINTS, r.key),
            kind: ShapeKind::Point {
                center: Point::new(x.map(cx), y.map(cy)),
                radius,
            },
            fill: colors.color(r.category),
            opacity: spec.opacity,
            z_index: z_order::SERIES_POINTS,
            record: *r,
        });
    }

    Ok(ChartGeometry {
        kind: ChartKind::Scatter,
        plot,
        x: XScale::Linear(x),
        y,
        baseline: plot.y1,
        shapes,
        line: None,
        warnings,
        labels: filtered.labels.clone(),
    })
}

fn time_ordered(filtered: &Dataset) -> Dataset {
    if filtered.is_sorted_by_time() {
        filtered.clone()
    } else {
        sort_by_time(filtered)
    }
}

fn build_line(
    spec: &LineSpec,
    filtered: &Dataset,
    profile: &LayoutProfile,
    plot: Rect,
) -> Result<ChartGeometry, RenderError> {
    let sorted = time_ordered(filtered);
    let x = ScaleLinearSpec::from_data(&sorted, Field::Time)?
        .instantiate((plot.x0, plot.x1), profile.tick_count);
    let y = ScaleLinearSpec::from_data(&sorted, Field::Target)?
        .with_zero(spec.zero)
        .instantiate(y_range(plot), profile.tick_count);

    let mut vertices = Vec::with_capacity(sorted.len());
    let mut shapes = Vec::new();
    let mut warnings = Vec::new();
    for r in &sorted {
        if let Some(field) = r.first_missing(&[Field::Time, Field::Target]) {
            skip(&mut warnings, r, field);
            continue;
        }
        let (Some(t), Some(v)) = (r.number(Field::Time), r.number(Field::Target)) else {
            continue;
        };
        let p = Point::new(x.map(t), y.map(v));
        vertices.push(p);
        if spec.points {
            shapes.push(Shape {
                id: MarkId::for_record(SERIES_POINTS, r.key),
                kind: ShapeKind::Point {
                    center: p,
                    radius: profile.point_radius,
                },
                fill: spec.point_fill,
                opacity: 1.0,
                z_index: z_order::SERIES_POINTS,
                record: *r,
            });
        }
    }

    Ok(ChartGeometry {
        kind: ChartKind::Line,
        plot,
        x: XScale::Linear(x),
        y,
        baseline: plot.y1,
        shapes,
        line: Some(LinePath {
            id: LINE_PATH_ID,
            vertices,
            stroke: spec.stroke,
            stroke_width: spec.stroke_width,
        }),
        warnings,
        labels: sorted.labels.clone(),
    })
}

fn build_bar(
    spec: &BarSpec,
    filtered: &Dataset,
    profile: &LayoutProfile,
    plot: Rect,
) -> Result<ChartGeometry, RenderError> {
    let sorted = time_ordered(filtered);
    let mut warnings = Vec::new();
    let mut valid = Vec::with_capacity(sorted.len());
    for r in &sorted {
        match r.first_missing(&[Field::Time, Field::Target]) {
            Some(field) => skip(&mut warnings, r, field),
            None => valid.push(*r),
        }
    }
    let buckets = bucket_by_time_with(
        &Dataset::from_parts(valid, sorted.labels.clone()),
        spec.aggregate,
    );

    let x = ScaleOrdinal::from_data(&buckets, Field::Time, (plot.x0, plot.x1))?
        .with_padding(spec.padding, spec.padding);
    let y = ScaleLinearSpec::from_data(&buckets, Field::Target)?
        .with_zero(true)
        .instantiate(y_range(plot), profile.tick_count);
    let baseline = y.map(0.0).clamp(plot.y0, plot.y1);
    let width = x.band_width();

    let mut shapes = Vec::with_capacity(buckets.len());
    let mut centres = Vec::with_capacity(buckets.len());
    for r in &buckets {
        let (Some(year), Some(value)) = (r.time, r.number(Field::Target)) else {
            continue;
        };
        let Some(x0) = x.x(year) else { continue };
        let top = y.map(value);
        centres.push(Point::new(x0 + 0.5 * width, top));
        shapes.push(Shape {
            id: MarkId::for_record(SERIES_BARS, r.key),
            kind: ShapeKind::Bar {
                rect: Rect::new(x0, top.min(baseline), x0 + width, top.max(baseline)),
            },
            fill: spec.fill,
            opacity: 1.0,
            z_index: z_order::SERIES_FILL,
            record: *r,
        });
    }

    let line = spec.overlay.map(|o| LinePath {
        id: LINE_PATH_ID,
        vertices: centres,
        stroke: o.stroke,
        stroke_width: o.stroke_width,
    });

    Ok(ChartGeometry {
        kind: ChartKind::Bar,
        plot,
        x: XScale::Band(x),
        y,
        baseline,
        shapes,
        line,
        warnings,
        labels: buckets.labels.clone(),
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use hearth_core::MarkPayload;

    use super::*;

    fn profile() -> LayoutProfile {
        LayoutProfile::default()
    }

    #[test]
    fn scatter_skips_records_missing_fields() {
        let ds = Dataset::new(vec![
            Record::new(1.0, 10.0).with_category(0),
            Record {
                compare_dimension: None,
                ..Record::new(0.0, 20.0)
            },
            Record::new(3.0, 30.0).with_category(1),
        ]);
        let colors = ColorMap::from_dataset(&ds);
        let g = ChartGeometry::build(&ScatterSpec::new().into(), &ds, &colors, &profile()).unwrap();
        assert_eq!(g.shapes.len(), 2);
        assert_eq!(
            g.warnings,
            vec![MissingFieldWarning {
                key: 1,
                field: Field::Compare
            }]
        );
        for s in &g.shapes {
            let ShapeKind::Point { center, .. } = s.kind else {
                panic!("scatter shapes are points");
            };
            assert!(center.x.is_finite() && center.y.is_finite());
            assert!(g.plot.contains(center) || center.x == g.plot.x1 || center.y == g.plot.y1);
        }
    }

    #[test]
    fn line_sorts_vertices_by_time() {
        let ds = Dataset::new(vec![
            Record::at_time(2018, 0.5),
            Record::at_time(2016, 0.4),
            Record::at_time(2017, 0.45),
        ]);
        let g = ChartGeometry::build(
            &LineSpec::new().into(),
            &ds,
            &ColorMap::from_dataset(&ds),
            &profile(),
        )
        .unwrap();
        let line = g.line.as_ref().unwrap();
        assert_eq!(line.vertices.len(), 3);
        assert!(line.vertices.windows(2).all(|w| w[0].x < w[1].x));
        let keys: Vec<u64> = g.shapes.iter().map(|s| s.record.key).collect();
        assert_eq!(keys, vec![1, 2, 0]);
        assert!(line.length() > 0.0);
    }

    #[test]
    fn bars_stand_on_the_zero_baseline() {
        let ds = Dataset::new(vec![
            Record::at_time(2016, 0.4),
            Record::at_time(2017, 0.8),
            Record::at_time(2017, 0.6),
        ]);
        let g = ChartGeometry::build(
            &BarSpec::new().into(),
            &ds,
            &ColorMap::from_dataset(&ds),
            &profile(),
        )
        .unwrap();
        assert_eq!(g.shapes.len(), 2);
        assert_eq!(g.baseline, g.plot.y1);
        for s in &g.shapes {
            let ShapeKind::Bar { rect } = s.kind else {
                panic!("bar shapes are rects");
            };
            assert_eq!(rect.y1, g.baseline);
            assert!(rect.height() > 0.0);
        }
        let overlay = g.line.as_ref().unwrap();
        assert_eq!(overlay.vertices.len(), 2);
        assert!((g.y.invert(overlay.vertices[1].y) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn hit_test_finds_points_and_bars() {
        let ds = Dataset::new(vec![Record::new(1.0, 1.0), Record::new(2.0, 2.0)]);
        let g = ChartGeometry::build(
            &ScatterSpec::new().into(),
            &ds,
            &ColorMap::from_dataset(&ds),
            &profile(),
        )
        .unwrap();
        let ShapeKind::Point { center, .. } = g.shapes[1].kind else {
            panic!("expected a point");
        };
        assert_eq!(g.hit_test(center).map(|s| s.record.key), Some(1));
        assert!(g.hit_test(Point::new(-100.0, -100.0)).is_none());
    }

    #[test]
    fn line_length_is_the_polyline_perimeter() {
        let line = LinePath {
            id: LINE_PATH_ID,
            vertices: vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)],
            stroke: peniko::color::palette::css::BLACK,
            stroke_width: 1.0,
        };
        assert!((line.length() - 11.0).abs() < 1e-9);
        let single = LinePath {
            vertices: vec![Point::new(1.0, 1.0)],
            ..line
        };
        assert_eq!(single.length(), 0.0);
    }

    #[test]
    fn marks_include_the_line() {
        let ds = Dataset::new(vec![Record::at_time(2016, 1.0), Record::at_time(2017, 2.0)]);
        let g = ChartGeometry::build(
            &LineSpec::new().into(),
            &ds,
            &ColorMap::from_dataset(&ds),
            &profile(),
        )
        .unwrap();
        let marks = g.marks();
        assert_eq!(marks.len(), 3);
        assert!(matches!(marks[2].payload, MarkPayload::Path(_)));
    }
}
