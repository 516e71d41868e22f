// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenes: the full set of marks produced by one render pass.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;

use crate::mark::Mark;

/// A render surface.
///
/// A scene is rebuilt from scratch on every render pass: callers [`clear`](Self::clear) it and
/// push the new marks. There is no incremental update path, so geometry from a previous pass can
/// never leak into the next one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Surface rectangle (the canvas size), in scene coordinates.
    pub view: Rect,
    /// Optional background fill painted under every mark.
    pub background: Option<Brush>,
    /// Marks in emission order.
    pub marks: Vec<Mark>,
}

impl Scene {
    /// Creates an empty scene covering `view`.
    pub fn new(view: Rect) -> Self {
        Self {
            view,
            background: None,
            marks: Vec::new(),
        }
    }

    /// Sets the background fill.
    pub fn with_background(mut self, background: impl Into<Brush>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Removes every mark, keeping the view and background.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Appends a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Appends marks.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the marks in paint order (`(z_index, id)`, stable).
    pub fn sorted(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Returns the union of the view and every mark's bounds.
    pub fn bounds(&self) -> Rect {
        self.marks
            .iter()
            .map(Mark::bounds)
            .fold(self.view, |acc, b| acc.union(b))
    }

    /// Finds a mark by id.
    pub fn get(&self, id: crate::MarkId) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use peniko::color::palette::css;

    use super::*;
    use crate::MarkId;

    #[test]
    fn sorted_orders_by_z_then_id() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        scene.push(Mark::circle(MarkId(3), Point::new(1.0, 1.0), 1.0, css::RED).with_z_index(5));
        scene.push(Mark::circle(MarkId(2), Point::new(1.0, 1.0), 1.0, css::RED).with_z_index(5));
        scene.push(Mark::circle(MarkId(9), Point::new(1.0, 1.0), 1.0, css::RED).with_z_index(-1));
        let ids: Vec<u64> = scene.sorted().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, alloc::vec![9, 2, 3]);
    }

    #[test]
    fn clear_keeps_view() {
        let view = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut scene = Scene::new(view);
        scene.push(Mark::circle(MarkId(1), Point::new(1.0, 1.0), 1.0, css::RED));
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.view, view);
    }
}
