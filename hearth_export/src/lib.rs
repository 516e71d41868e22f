// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot export for Hearth scenes.
//!
//! A [`Scene`](hearth_core::Scene) is serialized to SVG ([`to_svg`]), parsed with `usvg`,
//! rasterized with `resvg` onto an opaque background and encoded as PNG or JPEG with `image`.
//!
//! ```no_run
//! # fn demo(scene: &hearth_core::Scene) -> Result<(), hearth_export::ExportError> {
//! use hearth_export::{ExportOptions, ImageFormat, export};
//!
//! let snapshot = export(scene, &ExportOptions::new().with_format(ImageFormat::Png))?;
//! snapshot.save(std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```

mod error;
mod raster;
mod snapshot;
mod svg;

pub use error::ExportError;
pub use raster::{MAX_DIMENSION, Raster, Rasterizer};
pub use snapshot::{ExportOptions, ImageFormat, Snapshot, export, export_with};
pub use svg::to_svg;
