// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;

/// Errors produced while exporting a scene.
///
/// Every variant is recoverable: the caller keeps its scene and may retry with different
/// options. Nothing is written to disk when an export fails.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The serialized scene could not be parsed as SVG.
    #[error("invalid svg markup: {0}")]
    Svg(#[from] usvg::Error),
    /// The surface has no area.
    #[error("surface is empty ({width}x{height})")]
    EmptySurface {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },
    /// The surface exceeds the maximum raster dimension.
    #[error("surface too large: {width}x{height} (max {max}x{max})")]
    SurfaceTooLarge {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Largest accepted dimension.
        max: u32,
    },
    /// The offscreen pixmap could not be allocated.
    #[error("failed to allocate a {width}x{height} pixmap")]
    Pixmap {
        /// Pixmap width.
        width: u32,
        /// Pixmap height.
        height: u32,
    },
    /// Encoding the raster failed.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    /// Writing the snapshot failed.
    #[error("failed to write snapshot: {0}")]
    Io(#[from] io::Error),
}
