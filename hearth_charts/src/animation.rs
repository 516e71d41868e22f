// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entrance animations.
//!
//! Every render pass builds a fresh [`AnimationPlan`] that starts from the baseline state; there
//! is no interpolation between the geometry of consecutive passes. A plan is sampled with the
//! time elapsed since the pass, and [`AnimationPlan::apply`] rewrites a scene's marks into their
//! state at that instant.

extern crate alloc;

use alloc::vec::Vec;

use hearth_core::{MarkId, MarkPayload, Scene, StrokeDash};

/// Easing curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic, accelerating.
    InQuad,
    /// Quadratic, decelerating.
    OutQuad,
    /// Quadratic, accelerating then decelerating.
    InOutQuad,
    /// Cubic, accelerating.
    InCubic,
    /// Cubic, decelerating.
    OutCubic,
    /// Cubic, accelerating then decelerating.
    InOutCubic,
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// Timing for a staggered entrance: shape `i` starts `i * stagger_ms` after the pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    /// Duration of each shape's animation.
    pub duration_ms: f64,
    /// Delay between consecutive shapes.
    pub stagger_ms: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Entrance {
    /// Creates a linear entrance.
    pub fn new(duration_ms: f64, stagger_ms: f64) -> Self {
        Self {
            duration_ms,
            stagger_ms,
            ease: Ease::Linear,
        }
    }

    /// Sets the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Timing for a path reveal (a dash sweeping along the path).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    /// Duration of the sweep.
    pub duration_ms: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl Reveal {
    /// Creates a linear reveal.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            ease: Ease::Linear,
        }
    }
}

/// Animation settings for one chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationSpec {
    /// Entrance of points or bars; `None` shows them immediately.
    pub entrance: Option<Entrance>,
    /// Reveal of the line or overlay path; `None` draws it immediately.
    pub reveal: Option<Reveal>,
}

impl AnimationSpec {
    /// No animation at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the entrance timing.
    pub fn with_entrance(mut self, entrance: Entrance) -> Self {
        self.entrance = Some(entrance);
        self
    }

    /// Sets the reveal timing.
    pub fn with_reveal(mut self, reveal: Reveal) -> Self {
        self.reveal = Some(reveal);
        self
    }
}

/// What a track animates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Opacity from 0 to the mark's own opacity.
    Fade,
    /// Rectangle height from 0 at `baseline` to its final extent.
    Grow {
        /// Pixel y of the value 0.
        baseline: f64,
    },
    /// Dash offset from the path length to 0.
    Reveal {
        /// Total path length.
        length: f64,
    },
}

/// One animated mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// Target mark.
    pub id: MarkId,
    /// Start delay.
    pub delay_ms: f64,
    /// Duration.
    pub duration_ms: f64,
    /// Easing curve.
    pub ease: Ease,
    /// Animated property.
    pub effect: Effect,
}

impl Track {
    /// Returns eased progress in `[0, 1]` at `elapsed_ms`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= self.delay_ms { 1.0 } else { 0.0 };
        }
        self.ease
            .apply((elapsed_ms - self.delay_ms) / self.duration_ms)
    }
}

/// The set of tracks started by one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationPlan {
    tracks: Vec<Track>,
}

impl AnimationPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds staggered tracks for `ids` in order.
    pub fn stagger(&mut self, ids: impl IntoIterator<Item = MarkId>, timing: Entrance, effect: Effect) {
        for (i, id) in ids.into_iter().enumerate() {
            self.tracks.push(Track {
                id,
                delay_ms: i as f64 * timing.stagger_ms,
                duration_ms: timing.duration_ms,
                ease: timing.ease,
                effect,
            });
        }
    }

    /// Adds a path reveal.
    pub fn reveal(&mut self, id: MarkId, timing: Reveal, length: f64) {
        self.tracks.push(Track {
            id,
            delay_ms: 0.0,
            duration_ms: timing.duration_ms,
            ease: timing.ease,
            effect: Effect::Reveal { length },
        });
    }

    /// Returns the tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns the time at which every track has finished.
    pub fn total_duration_ms(&self) -> f64 {
        self.tracks
            .iter()
            .map(|t| t.delay_ms + t.duration_ms.max(0.0))
            .fold(0.0, f64::max)
    }

    /// Returns `true` once every track has finished.
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.total_duration_ms()
    }

    /// Returns `(mark, eased progress)` for every track at `elapsed_ms`.
    pub fn sample(&self, elapsed_ms: f64) -> Vec<(MarkId, f64)> {
        self.tracks
            .iter()
            .map(|t| (t.id, t.progress(elapsed_ms)))
            .collect()
    }

    /// Rewrites the marks of `scene` into their state at `elapsed_ms`.
    ///
    /// Marks without a track are left untouched.
    pub fn apply(&self, scene: &mut Scene, elapsed_ms: f64) {
        for track in &self.tracks {
            let p = track.progress(elapsed_ms);
            for mark in scene.marks.iter_mut().filter(|m| m.id == track.id) {
                match (track.effect, &mut mark.payload) {
                    (Effect::Fade, _) => mark.opacity *= p,
                    (Effect::Grow { baseline }, MarkPayload::Rect(r)) => {
                        r.rect.y0 = baseline + (r.rect.y0 - baseline) * p;
                        r.rect.y1 = baseline + (r.rect.y1 - baseline) * p;
                    }
                    (Effect::Reveal { length }, MarkPayload::Path(path)) => {
                        path.dash = Some(StrokeDash::reveal(length, length * (1.0 - p)));
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Point, Rect};
    use peniko::color::palette::css;

    use super::*;
    use hearth_core::Mark;

    #[test]
    fn ease_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::InQuad,
            Ease::OutQuad,
            Ease::InOutQuad,
            Ease::InCubic,
            Ease::OutCubic,
            Ease::InOutCubic,
        ] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
        assert_eq!(Ease::InOutCubic.apply(0.5), 0.5);
        assert_eq!(Ease::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn stagger_delays_by_index() {
        let mut plan = AnimationPlan::new();
        let ids = [MarkId(1), MarkId(2), MarkId(3)];
        plan.stagger(ids, Entrance::new(1000.0, 700.0), Effect::Fade);
        let s = plan.sample(1000.0);
        assert_eq!(s[0], (MarkId(1), 1.0));
        assert!((s[1].1 - 0.3).abs() < 1e-12);
        assert_eq!(s[2].1, 0.0);
        assert_eq!(plan.total_duration_ms(), 2400.0);
        assert!(!plan.is_finished(2399.0));
        assert!(plan.is_finished(2400.0));
    }

    #[test]
    fn grow_starts_at_baseline() {
        let mut scene = Scene::default();
        scene.push(Mark::rect(MarkId(1), Rect::new(0.0, 100.0, 10.0, 300.0), css::STEEL_BLUE));
        let mut plan = AnimationPlan::new();
        plan.stagger([MarkId(1)], Entrance::new(750.0, 0.0), Effect::Grow { baseline: 300.0 });

        let mut start = scene.clone();
        plan.apply(&mut start, 0.0);
        let MarkPayload::Rect(r) = &start.marks[0].payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.rect.height(), 0.0);
        assert_eq!(r.rect.y1, 300.0);

        let mut end = scene.clone();
        plan.apply(&mut end, 750.0);
        assert_eq!(end, scene);
    }

    #[test]
    fn reveal_sweeps_dash_offset() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(100.0, 0.0));
        let mut scene = Scene::default();
        scene.push(Mark::stroke(MarkId(7), path, css::STEEL_BLUE, 2.0));
        let mut plan = AnimationPlan::new();
        plan.reveal(MarkId(7), Reveal::new(4000.0), 100.0);

        plan.apply(&mut scene, 1000.0);
        let MarkPayload::Path(p) = &scene.marks[0].payload else {
            panic!("expected a path");
        };
        let dash = p.dash.as_ref().unwrap();
        assert_eq!(dash.array, alloc::vec![100.0, 100.0]);
        assert!((dash.offset - 75.0).abs() < 1e-9);
    }
}
