// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render passes.
//!
//! [`render`] is a pure function of its inputs: it filters the dataset, builds geometry, guides
//! and an animation plan, and returns them as a [`RenderPass`]. Nothing is carried over from
//! earlier passes.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

use hearth_core::{Dataset, MarkId, MarkPayload, RenderError, Scene, Selection};
use hearth_transforms::filter_by_selection;

use crate::animation::{AnimationPlan, Effect};
use crate::axis::AxisSpec;
use crate::chart_spec::{ChartKind, ChartSpec};
use crate::color::ColorMap;
use crate::geometry::ChartGeometry;
use crate::layout::LayoutProfile;
use crate::legend::LegendSpec;
use crate::theme::Theme;
use crate::title::TitleSpec;

const X_AXIS_ID: u64 = 10_000;
const Y_AXIS_ID: u64 = 20_000;
const LEGEND_ID: u64 = 30_000;
const TITLE_ID: MarkId = MarkId::from_raw(40_000);

/// The output of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPass {
    /// The spec that was rendered.
    pub spec: ChartSpec,
    /// Scaled shapes (for hit testing and tooltips).
    pub geometry: ChartGeometry,
    /// The scene in its final, fully animated state.
    pub scene: Scene,
    /// Entrance animation started by this pass.
    pub animation: AnimationPlan,
}

impl RenderPass {
    /// Returns the chart kind.
    pub fn kind(&self) -> ChartKind {
        self.spec.kind()
    }

    /// Returns the scene at `elapsed_ms` after the pass, with `hovered` highlighted.
    pub fn frame(&self, elapsed_ms: f64, hovered: Option<MarkId>) -> Scene {
        let mut scene = self.scene.clone();
        self.animation.apply(&mut scene, elapsed_ms);
        if let (ChartSpec::Bar(bar), Some(id)) = (&self.spec, hovered) {
            for mark in scene.marks.iter_mut().filter(|m| m.id == id) {
                if let MarkPayload::Rect(r) = &mut mark.payload {
                    r.fill = bar.highlight.into();
                    mark.opacity *= bar.highlight_opacity;
                }
            }
        }
        scene
    }

    /// Returns the topmost shape id under `p`.
    pub fn hit_test(&self, p: Point) -> Option<MarkId> {
        self.geometry.hit_test(p).map(|s| s.id)
    }
}

/// Renders `dataset` filtered by `selection`.
///
/// `colors` must be built from the unfiltered dataset (see [`ColorMap::from_dataset`]) so
/// selection changes never recolour categories.
#[tracing::instrument(skip_all, fields(kind = ?spec.kind(), records = dataset.len()))]
pub fn render(
    dataset: &Dataset,
    selection: &Selection,
    colors: &ColorMap,
    profile: &LayoutProfile,
    spec: &ChartSpec,
    theme: &Theme,
) -> Result<RenderPass, RenderError> {
    let filtered = filter_by_selection(dataset, selection);
    let geometry = ChartGeometry::build(spec, &filtered, colors, profile)?;

    let mut scene = Scene::new(profile.surface()).with_background(theme.background);
    scene.extend(geometry.marks());
    scene.extend(guide_marks(&geometry, spec, colors, profile, theme));

    let animation = plan(spec, &geometry);
    tracing::debug!(
        filtered = filtered.len(),
        marks = scene.len(),
        animated_ms = animation.total_duration_ms(),
        "render pass"
    );

    Ok(RenderPass {
        spec: spec.clone(),
        geometry,
        scene,
        animation,
    })
}

fn guide_marks(
    geometry: &ChartGeometry,
    spec: &ChartSpec,
    colors: &ColorMap,
    profile: &LayoutProfile,
    theme: &Theme,
) -> Vec<hearth_core::Mark> {
    let plot = geometry.plot;
    let (x_title, y_title) = match spec {
        ChartSpec::Scatter(s) => (
            s.x_title.clone().unwrap_or_else(|| geometry.labels.compare.clone()),
            s.y_title.clone(),
        ),
        ChartSpec::Line(s) => (s.x_title.clone(), s.y_title.clone()),
        ChartSpec::Bar(s) => (s.x_title.clone(), s.y_title.clone()),
    };

    let mut out = Vec::new();
    out.extend(
        AxisSpec::bottom(X_AXIS_ID, &geometry.x)
            .with_tick_count(profile.tick_count)
            .with_label_font_size(profile.tick_font_size)
            .with_title(x_title, profile.axis_title_font_size)
            .with_colors(theme.rule, theme.text)
            .marks(plot),
    );
    out.extend(
        AxisSpec::left(Y_AXIS_ID, geometry.y)
            .with_tick_count(profile.tick_count)
            .with_label_font_size(profile.tick_font_size)
            .with_title(y_title, profile.axis_title_font_size)
            .with_colors(theme.rule, theme.text)
            .marks(plot),
    );

    if let Some(title) = spec.title() {
        out.push(
            TitleSpec::new(TITLE_ID, title)
                .with_font_size(profile.title_font_size)
                .with_fill(theme.text)
                .mark(plot, profile.margins.top),
        );
    }

    if let ChartSpec::Scatter(s) = spec
        && s.legend
    {
        out.extend(
            LegendSpec::clusters(LEGEND_ID, colors)
                .at(Point::new(plot.x1 + 10.0, plot.y0))
                .with_font_size(profile.legend_font_size)
                .with_text_fill(theme.text)
                .marks(),
        );
    }
    out
}

fn plan(spec: &ChartSpec, geometry: &ChartGeometry) -> AnimationPlan {
    let mut plan = AnimationPlan::new();
    let ids = geometry.shapes.iter().map(|s| s.id);
    match spec {
        ChartSpec::Scatter(s) => {
            if let Some(entrance) = s.animation.entrance {
                plan.stagger(ids, entrance, Effect::Fade);
            }
        }
        ChartSpec::Line(s) => {
            if let (Some(reveal), Some(line)) = (s.animation.reveal, &geometry.line) {
                plan.reveal(line.id, reveal, line.length());
            }
            if let Some(entrance) = s.animation.entrance {
                plan.stagger(ids, entrance, Effect::Fade);
            }
        }
        ChartSpec::Bar(s) => {
            if let Some(entrance) = s.animation.entrance {
                plan.stagger(
                    ids,
                    entrance,
                    Effect::Grow {
                        baseline: geometry.baseline,
                    },
                );
            }
            if let (Some(reveal), Some(line)) =
                (s.overlay.and_then(|o| o.reveal), &geometry.line)
            {
                plan.reveal(line.id, reveal, line.length());
            }
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use hearth_core::Record;

    use super::*;
    use crate::chart_spec::{BarSpec, LineSpec, ScatterSpec};
    use crate::geometry::ShapeKind;

    fn history() -> Dataset {
        Dataset::new(vec![
            Record::at_time(2016, 0.40),
            Record::at_time(2017, 0.45),
            Record::at_time(2018, 0.50),
        ])
    }

    #[test]
    fn line_frame_starts_hidden_and_ends_drawn() {
        let ds = history();
        let colors = ColorMap::from_dataset(&ds);
        let pass = render(
            &ds,
            &Selection::all_of(&ds),
            &colors,
            &LayoutProfile::default(),
            &LineSpec::new().into(),
            &Theme::light(),
        )
        .unwrap();

        let first = pass.frame(0.0, None);
        let dots: Vec<f64> = first
            .marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Circle(_)))
            .map(|m| m.opacity)
            .collect();
        assert_eq!(dots, vec![0.0, 0.0, 0.0]);
        let line = first
            .marks
            .iter()
            .find_map(|m| match &m.payload {
                MarkPayload::Path(p) if p.dash.is_some() => p.dash.clone(),
                _ => None,
            })
            .unwrap();
        assert!((line.offset - line.array[0]).abs() < 1e-9);

        let done = pass.frame(pass.animation.total_duration_ms(), None);
        assert!(
            done.marks
                .iter()
                .filter(|m| matches!(m.payload, MarkPayload::Circle(_)))
                .all(|m| m.opacity == 1.0)
        );
        assert_eq!(pass.animation.total_duration_ms(), 4000.0);
    }

    #[test]
    fn hovered_bar_is_highlighted() {
        let ds = history();
        let spec: ChartSpec = BarSpec::new().into();
        let pass = render(
            &ds,
            &Selection::new(),
            &ColorMap::from_dataset(&ds),
            &LayoutProfile::default(),
            &spec,
            &Theme::light(),
        )
        .unwrap();
        let shape = pass.geometry.shapes[1];
        let ShapeKind::Bar { rect } = shape.kind else {
            panic!("expected a bar");
        };
        assert_eq!(pass.hit_test(rect.center()), Some(shape.id));

        let frame = pass.frame(10_000.0, Some(shape.id));
        let mark = frame.get(shape.id).unwrap();
        assert_eq!(mark.opacity, 0.7);
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.fill, peniko::Brush::from(peniko::color::palette::css::ORANGE));
        let other = frame.get(pass.geometry.shapes[0].id).unwrap();
        assert_eq!(other.opacity, 1.0);
    }

    #[test]
    fn highlight_scales_the_animated_opacity() {
        let ds = history();
        let spec: ChartSpec = BarSpec::new().into();
        let mut pass = render(
            &ds,
            &Selection::new(),
            &ColorMap::from_dataset(&ds),
            &LayoutProfile::default(),
            &spec,
            &Theme::light(),
        )
        .unwrap();
        let id = pass.geometry.shapes[0].id;
        for mark in pass.scene.marks.iter_mut().filter(|m| m.id == id) {
            mark.opacity = 0.5;
        }

        let idle = pass.frame(100.0, None);
        let hovered = pass.frame(100.0, Some(id));
        let idle_opacity = idle.get(id).unwrap().opacity;
        let hovered_opacity = hovered.get(id).unwrap().opacity;
        assert!(
            (hovered_opacity - idle_opacity * 0.7).abs() < 1e-12,
            "{hovered_opacity} vs {idle_opacity}"
        );
        assert!(hovered_opacity < 0.7);
    }

    #[test]
    fn scatter_pass_has_legend_axes_and_points() {
        let ds = Dataset::new(vec![
            Record::new(2.0, 100.0).with_category(0),
            Record::new(5.0, 200.0).with_category(1),
        ]);
        let pass = render(
            &ds,
            &Selection::all_of(&ds),
            &ColorMap::from_dataset(&ds),
            &LayoutProfile::for_viewport(1280),
            &ScatterSpec::new().into(),
            &Theme::dark(),
        )
        .unwrap();
        let legend_labels = pass
            .scene
            .marks
            .iter()
            .filter(|m| matches!(&m.payload, MarkPayload::Text(t) if t.text.starts_with("Cluster")))
            .count();
        assert_eq!(legend_labels, 2);
        assert_eq!(pass.geometry.shapes.len(), 2);
        assert_eq!(pass.scene.view, LayoutProfile::for_viewport(1280).surface());
    }

    #[test]
    fn empty_selection_is_empty_dataset() {
        let ds = Dataset::new(vec![Record::new(2.0, 100.0).with_category(0)]);
        let err = render(
            &ds,
            &Selection::new(),
            &ColorMap::from_dataset(&ds),
            &LayoutProfile::default(),
            &ScatterSpec::new().into(),
            &Theme::light(),
        );
        assert_eq!(err, Err(RenderError::EmptyDataset));
    }
}
