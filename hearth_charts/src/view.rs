// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stateful chart view.
//!
//! [`ChartView`] owns everything one chart needs between render passes: the loaded dataset, the
//! user's selection, the colour map, the fetch gate, the last render pass and the hover state.
//! All mutation goes through `&mut self`, so renders are serialized by the borrow checker.

extern crate alloc;

use hearth_core::{
    Dataset, FetchFailure, RenderError, RequestGate, RequestTicket, Scene, Selection,
};

use crate::chart::{RenderPass, render};
use crate::chart_spec::ChartSpec;
use crate::color::ColorMap;
use crate::interaction::{InteractionState, PointerEvent, TooltipState, transition};
use crate::layout::LayoutProfile;
use crate::measure::HeuristicTextMeasurer;
use crate::theme::Theme;

/// Where the view is in its data lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// A non-empty dataset is loaded.
    Ready,
    /// The last fetch returned no data; the chart shows nothing.
    NoData,
    /// The last fetch failed; the chart shows nothing.
    Failed(FetchFailure),
}

/// One interactive chart.
#[derive(Clone, Debug)]
pub struct ChartView {
    spec: ChartSpec,
    theme: Theme,
    profile: LayoutProfile,
    dataset: Option<Dataset>,
    selection: Selection,
    colors: ColorMap,
    gate: RequestGate,
    status: ViewStatus,
    pass: Option<RenderPass>,
    interaction: InteractionState,
    tooltip: TooltipState,
}

impl ChartView {
    /// Creates an empty view for `spec` with the light theme and desktop layout.
    pub fn new(spec: impl Into<ChartSpec>) -> Self {
        Self {
            spec: spec.into(),
            theme: Theme::default(),
            profile: LayoutProfile::default(),
            dataset: None,
            selection: Selection::new(),
            colors: ColorMap::default(),
            gate: RequestGate::new(),
            status: ViewStatus::Idle,
            pass: None,
            interaction: InteractionState::Idle,
            tooltip: TooltipState::hidden(),
        }
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the layout profile from a viewport width.
    pub fn with_viewport(mut self, viewport_width: u32) -> Self {
        self.profile = LayoutProfile::for_viewport(viewport_width);
        self
    }

    /// Sets an explicit layout profile.
    pub fn with_profile(mut self, profile: LayoutProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns the chart spec.
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Returns the loaded dataset.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the colour map of the loaded dataset.
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// Returns the active layout profile.
    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    /// Starts a fetch. Only the ticket returned by the latest call is accepted by
    /// [`finish_fetch`](Self::finish_fetch).
    pub fn begin_fetch(&mut self) -> RequestTicket {
        let ticket = self.gate.begin();
        tracing::debug!(ticket = ticket.get(), "fetch started");
        self.status = ViewStatus::Loading;
        ticket
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and changes nothing if a newer fetch has been started since. A failure,
    /// a `None` payload or an empty dataset puts the view into its neutral no-data state.
    pub fn finish_fetch(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Option<Dataset>, FetchFailure>,
    ) -> bool {
        if !self.gate.accepts(ticket) {
            tracing::warn!(ticket = ticket.get(), "ignoring stale fetch response");
            return false;
        }
        match outcome {
            Ok(Some(dataset)) if !dataset.is_empty() => self.load(dataset),
            Ok(_) => {
                tracing::debug!(ticket = ticket.get(), "fetch returned no data");
                self.clear_data(ViewStatus::NoData);
            }
            Err(failure) => {
                tracing::warn!(ticket = ticket.get(), %failure, "fetch failed");
                self.clear_data(ViewStatus::Failed(failure));
            }
        }
        true
    }

    /// Loads `dataset`, selecting every category and assigning colours.
    pub fn load(&mut self, dataset: Dataset) {
        if dataset.is_empty() {
            self.clear_data(ViewStatus::NoData);
            return;
        }
        self.selection = Selection::all_of(&dataset);
        self.colors = ColorMap::from_dataset(&dataset);
        self.dataset = Some(dataset);
        self.status = ViewStatus::Ready;
        self.invalidate();
    }

    fn clear_data(&mut self, status: ViewStatus) {
        self.dataset = None;
        self.selection = Selection::new();
        self.colors = ColorMap::default();
        self.status = status;
        self.invalidate();
    }

    /// Shows or hides `category`. Returns whether it is now shown.
    pub fn toggle_category(&mut self, category: i64) -> bool {
        let on = self.selection.toggle(category);
        self.invalidate();
        on
    }

    /// Shows or hides `category` explicitly.
    pub fn set_category(&mut self, category: i64, on: bool) {
        self.selection.set(category, on);
        self.invalidate();
    }

    /// Re-resolves the layout for a new viewport width.
    pub fn set_viewport(&mut self, viewport_width: u32) {
        self.profile = LayoutProfile::for_viewport(viewport_width);
        self.invalidate();
    }

    /// Switches the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.invalidate();
    }

    /// Replaces the chart spec.
    pub fn set_spec(&mut self, spec: impl Into<ChartSpec>) {
        self.spec = spec.into();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.pass = None;
        self.interaction = InteractionState::Idle;
        self.tooltip = TooltipState::hidden();
    }

    /// Runs a render pass, replacing the previous one.
    ///
    /// Returns `Ok(None)` when there is nothing to draw: no dataset, or a selection that leaves
    /// no renderable record. Layout errors propagate.
    pub fn render(&mut self) -> Result<Option<&RenderPass>, RenderError> {
        self.invalidate();
        let Some(dataset) = &self.dataset else {
            return Ok(None);
        };
        match render(
            dataset,
            &self.selection,
            &self.colors,
            &self.profile,
            &self.spec,
            &self.theme,
        ) {
            Ok(pass) => {
                self.pass = Some(pass);
                Ok(self.pass.as_ref())
            }
            Err(RenderError::EmptyDataset) => {
                tracing::debug!("nothing to render for the current selection");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the last render pass.
    pub fn pass(&self) -> Option<&RenderPass> {
        self.pass.as_ref()
    }

    /// Feeds a pointer event to the hover state machine and returns the updated tooltip.
    pub fn pointer(&mut self, event: PointerEvent) -> &TooltipState {
        match &self.pass {
            Some(pass) => {
                self.interaction = transition(&self.interaction, event, &pass.geometry);
                self.tooltip =
                    TooltipState::for_state(&self.interaction, pass.kind(), &pass.geometry.labels);
            }
            None => {
                self.interaction = InteractionState::Idle;
                self.tooltip = TooltipState::hidden();
            }
        }
        &self.tooltip
    }

    /// Returns the hover state.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Returns the tooltip.
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Returns the scene `elapsed_ms` after the last render, with hover highlight and tooltip.
    pub fn frame(&self, elapsed_ms: f64) -> Option<Scene> {
        let pass = self.pass.as_ref()?;
        let mut scene = pass.frame(elapsed_ms, self.interaction.hovered());
        scene.extend(self.tooltip.marks(&self.theme, &HeuristicTextMeasurer));
        Some(scene)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use hearth_core::{MarkPayload, Record};
    use kurbo::Point;

    use super::*;
    use crate::chart_spec::{BarSpec, ScatterSpec};
    use crate::geometry::ShapeKind;

    fn clusters() -> Dataset {
        Dataset::new(vec![
            Record::new(2.0, 100.0).with_category(0),
            Record::new(5.0, 200.0).with_category(1),
            Record::new(3.0, 150.0).with_category(1),
        ])
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut view = ChartView::new(ScatterSpec::new());
        let first = view.begin_fetch();
        let second = view.begin_fetch();
        assert!(view.finish_fetch(second, Ok(Some(clusters()))));
        assert!(!view.finish_fetch(first, Ok(None)));
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.dataset().map(Dataset::len), Some(3));
    }

    #[test]
    fn failures_and_empty_payloads_are_neutral() {
        let mut view = ChartView::new(ScatterSpec::new());
        let t = view.begin_fetch();
        assert!(view.finish_fetch(t, Err(FetchFailure::new("timeout"))));
        assert!(matches!(view.status(), ViewStatus::Failed(_)));
        assert!(view.render().unwrap().is_none());
        assert!(view.frame(0.0).is_none());

        let t = view.begin_fetch();
        view.finish_fetch(t, Ok(Some(Dataset::default())));
        assert_eq!(view.status(), &ViewStatus::NoData);
        assert!(view.render().unwrap().is_none());
    }

    #[test]
    fn toggling_keeps_colors_and_rerenders() {
        let mut view = ChartView::new(ScatterSpec::new());
        view.load(clusters());
        let before = view.colors().color(Some(1));
        assert_eq!(view.render().unwrap().map(|p| p.geometry.shapes.len()), Some(3));

        assert!(!view.toggle_category(1));
        assert!(view.pass().is_none());
        assert_eq!(view.render().unwrap().map(|p| p.geometry.shapes.len()), Some(1));

        assert!(view.toggle_category(1));
        let pass = view.render().unwrap().unwrap();
        assert_eq!(pass.geometry.shapes[1].fill, before);
    }

    #[test]
    fn deselecting_everything_renders_nothing() {
        let mut view = ChartView::new(ScatterSpec::new());
        view.load(clusters());
        view.set_category(0, false);
        view.set_category(1, false);
        assert!(view.render().unwrap().is_none());
    }

    #[test]
    fn hover_adds_tooltip_and_highlight_to_frame() {
        let mut view = ChartView::new(BarSpec::new()).with_viewport(1280);
        view.load(Dataset::new(vec![
            Record::at_time(2016, 0.4),
            Record::at_time(2017, 0.5),
        ]));
        let pass = view.render().unwrap().unwrap();
        let shape = pass.geometry.shapes[0];
        let ShapeKind::Bar { rect } = shape.kind else {
            panic!("expected a bar");
        };

        let tip = view.pointer(PointerEvent::Move(rect.center()));
        assert!(tip.visible);
        let frame = view.frame(1e6).unwrap();
        assert_eq!(frame.get(shape.id).map(|m| m.opacity), Some(0.7));
        let texts = frame
            .marks
            .iter()
            .filter(|m| matches!(&m.payload, MarkPayload::Text(t) if t.text.starts_with("Year: 2016")))
            .count();
        assert_eq!(texts, 1);

        view.pointer(PointerEvent::Leave);
        assert!(!view.tooltip().visible);
        assert_eq!(view.frame(1e6).unwrap().get(shape.id).map(|m| m.opacity), Some(1.0));
    }

    #[test]
    fn viewport_change_resizes_the_surface() {
        let mut view = ChartView::new(ScatterSpec::new());
        view.load(clusters());
        view.set_viewport(400);
        let pass = view.render().unwrap().unwrap();
        assert_eq!(pass.scene.view, LayoutProfile::for_viewport(400).surface());
        assert!(view.pointer(PointerEvent::Move(Point::new(-5.0, -5.0))).lines.is_empty());
    }
}
