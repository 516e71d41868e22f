// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG rasterization.

use peniko::Color;
use resvg::tiny_skia;

use crate::ExportError;

/// Largest accepted raster width or height, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// An opaque RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels; alpha is always 255.
    pub rgba: Vec<u8>,
}

impl Raster {
    /// Returns the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = 4 * (y as usize * self.width as usize + x as usize);
        let px = self.rgba.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Parses and rasterizes SVG documents.
///
/// System fonts are loaded once, when the rasterizer is created, and reused for every document.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl core::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("fonts", &self.options.fontdb.len())
            .finish_non_exhaustive()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Creates a rasterizer with the system fonts loaded.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(fonts = options.fontdb.len(), "loaded system fonts");
        Self { options }
    }

    /// Creates a rasterizer without any fonts. Text is not drawn.
    pub fn without_fonts() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Rasterizes `svg` at `scale` device pixels per scene unit, composited onto `background`.
    ///
    /// The background is made opaque, so the result never has transparent pixels.
    pub fn rasterize(
        &self,
        svg: &str,
        scale: f64,
        background: Color,
    ) -> Result<Raster, ExportError> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let size = tree.size();
        let width = f64::from(size.width()) * scale;
        let height = f64::from(size.height()) * scale;
        let (w, h) = pixel_size(width, height)?;

        let mut pixmap =
            tiny_skia::Pixmap::new(w, h).ok_or(ExportError::Pixmap { width: w, height: h })?;
        let bg = background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));

        #[allow(clippy::cast_possible_truncation, reason = "scale is a small positive factor")]
        let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        tracing::debug!(width = w, height = h, "rasterized scene");

        Ok(Raster {
            width: w,
            height: h,
            rgba: pixmap.take(),
        })
    }
}

fn pixel_size(width: f64, height: f64) -> Result<(u32, u32), ExportError> {
    if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
        return Err(ExportError::EmptySurface { width, height });
    }
    let max = f64::from(MAX_DIMENSION);
    if width > max || height > max {
        #[allow(clippy::cast_possible_truncation, reason = "saturating, for the message only")]
        return Err(ExportError::SurfaceTooLarge {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
            max: MAX_DIMENSION,
        });
    }
    #[allow(clippy::cast_possible_truncation, reason = "checked against MAX_DIMENSION")]
    let size = (width.ceil() as u32, height.ceil() as u32);
    Ok(size)
}
