// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light and dark colour themes.
//!
//! A theme is passed into every render; nothing reads a global dark-mode flag.

use peniko::Color;
use peniko::color::palette::css;

/// Colours for everything that is not data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Surface background.
    pub background: Color,
    /// Titles, axis labels and legend labels.
    pub text: Color,
    /// Axis domain lines and ticks.
    pub rule: Color,
    /// Tooltip box fill.
    pub tooltip_background: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
}

impl Theme {
    /// Dark text on a white surface.
    pub fn light() -> Self {
        Self {
            background: css::WHITE,
            text: Color::from_rgb8(0x33, 0x33, 0x33),
            rule: Color::from_rgb8(0x33, 0x33, 0x33),
            tooltip_background: css::BLACK.with_alpha(0.7),
            tooltip_text: css::WHITE,
        }
    }

    /// Light text on a dark surface.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb8(0x1e, 0x1e, 0x1e),
            text: Color::from_rgb8(0xf7, 0xf2, 0xeb),
            rule: Color::from_rgb8(0xf7, 0xf2, 0xeb),
            tooltip_background: css::BLACK.with_alpha(0.7),
            tooltip_text: css::WHITE,
        }
    }

    /// Returns [`dark`](Self::dark) or [`light`](Self::light).
    pub fn for_dark_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Sets the background colour.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
