// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover interaction.
//!
//! Interaction is an explicit state value plus a pure [`transition`] function. The tooltip is
//! derived from the state, never mutated by event handlers directly.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use hearth_core::{Field, FieldLabels, Mark, MarkId, Record, TextAnchor, TextBaseline};

use crate::chart_spec::ChartKind;
use crate::format::format_fixed;
use crate::geometry::ChartGeometry;
use crate::measure::TextMeasurer;
use crate::theme::Theme;
use crate::z_order;

/// Pointer input, in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to a position over the surface.
    Move(Point),
    /// The pointer left the surface.
    Leave,
}

/// Hover state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    /// Nothing is hovered.
    #[default]
    Idle,
    /// The pointer is over a shape.
    Hovering {
        /// The hovered shape.
        shape: MarkId,
        /// The record bound to the shape.
        record: Record,
        /// Last pointer position.
        pointer: Point,
    },
}

impl InteractionState {
    /// Returns the hovered shape, if any.
    pub fn hovered(&self) -> Option<MarkId> {
        match self {
            Self::Idle => None,
            Self::Hovering { shape, .. } => Some(*shape),
        }
    }
}

/// Computes the next state for `event`.
///
/// Moving within the same shape only updates the pointer position; moving onto another shape
/// switches the hovered record; moving off every shape or leaving the surface returns to idle.
pub fn transition(
    state: &InteractionState,
    event: PointerEvent,
    geometry: &ChartGeometry,
) -> InteractionState {
    let PointerEvent::Move(pointer) = event else {
        return InteractionState::Idle;
    };
    let Some(hit) = geometry.hit_test(pointer) else {
        return InteractionState::Idle;
    };
    match state {
        InteractionState::Hovering { shape, record, .. } if *shape == hit.id => {
            InteractionState::Hovering {
                shape: *shape,
                record: *record,
                pointer,
            }
        }
        _ => InteractionState::Hovering {
            shape: hit.id,
            record: hit.record,
            pointer,
        },
    }
}

/// Tooltip overlay state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    /// Whether the tooltip is shown.
    pub visible: bool,
    /// Content, one entry per line.
    pub lines: SmallVec<[String; 2]>,
    /// Top-left position in scene coordinates.
    pub position: Point,
}

impl TooltipState {
    /// A hidden, empty tooltip.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Derives the tooltip for `state`.
    pub fn for_state(state: &InteractionState, kind: ChartKind, labels: &FieldLabels) -> Self {
        let InteractionState::Hovering {
            record, pointer, ..
        } = state
        else {
            return Self::hidden();
        };
        let (dx, dy) = kind.tooltip_offset();
        Self {
            visible: true,
            lines: tooltip_lines(kind, record, labels),
            position: *pointer + Vec2::new(dx, dy),
        }
    }

    /// Emits a background box and one text mark per line.
    pub fn marks(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        if !self.visible || self.lines.is_empty() {
            return Vec::new();
        }
        const FONT_SIZE: f64 = 12.0;
        const PAD_X: f64 = 10.0;
        const PAD_Y: f64 = 5.0;
        const LINE_HEIGHT: f64 = 16.0;
        let width = self
            .lines
            .iter()
            .map(|l| measurer.measure(l, FONT_SIZE).0)
            .fold(0.0, f64::max);
        let height = LINE_HEIGHT * self.lines.len() as f64;
        let origin = self.position;
        let bg = Rect::new(
            origin.x,
            origin.y,
            origin.x + width + 2.0 * PAD_X,
            origin.y + height + 2.0 * PAD_Y,
        );

        let mut out = Vec::with_capacity(1 + self.lines.len());
        out.push(
            Mark::rect(TOOLTIP_ID_BASE, bg, theme.tooltip_background)
                .with_z_index(z_order::TOOLTIP),
        );
        for (i, line) in self.lines.iter().enumerate() {
            out.push(
                Mark::text(
                    MarkId::from_raw(TOOLTIP_ID_BASE.0 + 1 + i as u64),
                    Point::new(
                        origin.x + PAD_X,
                        origin.y + PAD_Y + (i as f64 + 0.5) * LINE_HEIGHT,
                    ),
                    line.clone(),
                    FONT_SIZE,
                    theme.tooltip_text,
                )
                .with_text_align(TextAnchor::Start, TextBaseline::Middle)
                .with_z_index(z_order::TOOLTIP),
            );
        }
        out
    }
}

const TOOLTIP_ID_BASE: MarkId = MarkId::from_raw(9_000_000);

fn tooltip_lines(kind: ChartKind, record: &Record, labels: &FieldLabels) -> SmallVec<[String; 2]> {
    let target = record.number(Field::Target);
    let year = record.time.map(|t| format!("{t}")).unwrap_or_default();
    let mut lines = SmallVec::new();
    match kind {
        ChartKind::Scatter => {
            let compare = record.number(Field::Compare);
            lines.push(format!("{}: {}", labels.target, fixed2(target)));
            lines.push(format!("{}: {}", labels.compare, fixed2(compare)));
        }
        ChartKind::Line => {
            lines.push(format!("Year: {year}"));
            lines.push(format!("Normalized Price: {}", trimmed(target)));
        }
        ChartKind::Bar => {
            lines.push(format!("Year: {year}, Normalized Price: {}", trimmed(target)));
        }
    }
    lines
}

fn fixed2(v: Option<f64>) -> String {
    v.map(|v| format_fixed(v, 2)).unwrap_or_default()
}

fn trimmed(v: Option<f64>) -> String {
    let Some(v) = v else {
        return String::from("Price data unavailable");
    };
    let s = format_fixed(v, 3);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    String::from(s)
}
