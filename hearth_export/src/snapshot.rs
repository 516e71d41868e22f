// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoded image snapshots of a scene.

use std::fs;
use std::path::{Path, PathBuf};

use hearth_core::Scene;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::raster::{Raster, Rasterizer};
use crate::svg::to_svg;
use crate::ExportError;

/// Raster encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Lossless PNG.
    Png,
    /// Baseline JPEG.
    #[default]
    Jpeg,
}

impl ImageFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// MIME type for downloads.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// How to export a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    /// Output encoding.
    pub format: ImageFormat,
    /// File name without extension.
    pub file_stem: String,
    /// Device pixels per scene unit.
    pub scale: f64,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
    /// Background used where the scene has none.
    pub background: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Jpeg,
            file_stem: String::from("linechart"),
            scale: 1.0,
            jpeg_quality: 90,
            background: css::WHITE,
        }
    }
}

impl ExportOptions {
    /// Creates default options: a `linechart.jpg` at scale 1 on white.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output encoding.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the file name without extension.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Sets the device pixel ratio.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the JPEG quality; clamped to `1..=100`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Sets the fallback background.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Returns the file name, with extension.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.format.extension())
    }
}

/// An encoded image of a scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// Suggested file name.
    pub file_name: String,
}

impl Snapshot {
    /// Writes the snapshot into `dir` and returns the written path.
    ///
    /// The bytes go to a temporary sibling first and are renamed into place, so a failed write
    /// never leaves a truncated image under the final name.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        let partial = dir.join(format!(".{}.part", self.file_name));
        if let Err(err) = fs::write(&partial, &self.bytes).and_then(|()| fs::rename(&partial, &path))
        {
            let _ = fs::remove_file(&partial);
            return Err(err.into());
        }
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "saved snapshot");
        Ok(path)
    }
}

/// Exports `scene` with `options`, loading system fonts for text.
pub fn export(scene: &Scene, options: &ExportOptions) -> Result<Snapshot, ExportError> {
    export_with(&Rasterizer::new(), scene, options)
}

/// Exports `scene` with `options` using an existing rasterizer.
#[tracing::instrument(skip_all, fields(format = ?options.format, scale = options.scale))]
pub fn export_with(
    rasterizer: &Rasterizer,
    scene: &Scene,
    options: &ExportOptions,
) -> Result<Snapshot, ExportError> {
    let (width, height) = (
        scene.view.width() * options.scale,
        scene.view.height() * options.scale,
    );
    if !(width >= 1.0 && height >= 1.0) {
        return Err(ExportError::EmptySurface { width, height });
    }

    let background = match &scene.background {
        Some(Brush::Solid(color)) => *color,
        _ => options.background,
    };
    let svg = to_svg(scene);
    let raster = rasterizer.rasterize(&svg, options.scale, background)?;
    let (width, height) = (raster.width, raster.height);
    let bytes = encode(raster, options)?;
    Ok(Snapshot {
        bytes,
        width,
        height,
        format: options.format,
        file_name: options.file_name(),
    })
}

fn encode(raster: Raster, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (raster.width, raster.height);
    let image = RgbaImage::from_raw(width, height, raster.rgba)
        .ok_or(ExportError::Pixmap { width, height })?;
    let mut bytes = Vec::new();
    match options.format {
        ImageFormat::Png => image.write_with_encoder(PngEncoder::new(&mut bytes))?,
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, options.jpeg_quality))?,
    }
    tracing::debug!(width, height, bytes = bytes.len(), "encoded snapshot");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use hearth_core::{Mark, MarkId};
    use kurbo::Rect;

    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 40.0, 30.0)).with_background(css::WHITE);
        scene.push(Mark::rect(
            MarkId(1),
            Rect::new(5.0, 5.0, 20.0, 25.0),
            css::STEEL_BLUE,
        ));
        scene
    }

    #[test]
    fn png_and_jpeg_snapshots() {
        let rasterizer = Rasterizer::without_fonts();
        let png = export_with(
            &rasterizer,
            &scene(),
            &ExportOptions::new()
                .with_format(ImageFormat::Png)
                .with_file_stem("chart"),
        )
        .unwrap();
        assert_eq!(png.file_name, "chart.png");
        assert_eq!((png.width, png.height), (40, 30));
        assert_eq!(&png.bytes[..8], b"\x89PNG\r\n\x1a\n");

        let jpg = export_with(&rasterizer, &scene(), &ExportOptions::new().with_scale(2.0)).unwrap();
        assert_eq!(jpg.file_name, "linechart.jpg");
        assert_eq!((jpg.width, jpg.height), (80, 60));
        assert_eq!(&jpg.bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&png.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(10, 10).0, [0x46, 0x82, 0xb4, 0xff]);
        assert_eq!(decoded.get_pixel(30, 10).0, [0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn empty_surface_is_rejected() {
        let scene = Scene::new(Rect::new(0.0, 0.0, 0.0, 100.0));
        let err = export_with(&Rasterizer::without_fonts(), &scene, &ExportOptions::new());
        assert!(matches!(err, Err(ExportError::EmptySurface { .. })));
    }

    #[test]
    fn oversize_surface_is_rejected() {
        let scene = Scene::new(Rect::new(0.0, 0.0, 10_000.0, 100.0));
        let err = export_with(
            &Rasterizer::without_fonts(),
            &scene,
            &ExportOptions::new().with_scale(2.0),
        );
        assert!(matches!(err, Err(ExportError::SurfaceTooLarge { .. })));
    }

    #[test]
    fn save_writes_only_the_final_file() {
        let dir = std::env::temp_dir().join(format!("hearth-export-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let snapshot = Snapshot {
            bytes: vec![1, 2, 3],
            width: 1,
            height: 1,
            format: ImageFormat::Png,
            file_name: String::from("snap.png"),
        };
        let path = snapshot.save(&dir).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert!(!dir.join(".snap.png.part").exists());

        let missing = dir.join("does-not-exist");
        assert!(matches!(snapshot.save(&missing), Err(ExportError::Io(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn chart_scene_exports_at_surface_size() {
        use hearth_charts::{ChartSpec, ColorMap, LayoutProfile, LineSpec, Theme, render};
        use hearth_core::{Dataset, Record, Selection};

        let ds = Dataset::new(vec![
            Record::at_time(2016, 0.40),
            Record::at_time(2017, 0.45),
            Record::at_time(2018, 0.50),
        ]);
        let profile = LayoutProfile::for_viewport(800);
        let pass = render(
            &ds,
            &Selection::new(),
            &ColorMap::from_dataset(&ds),
            &profile,
            &ChartSpec::from(LineSpec::new()).without_animation(),
            &Theme::dark(),
        )
        .unwrap();
        let snapshot = export_with(
            &Rasterizer::without_fonts(),
            &pass.frame(0.0, None),
            &ExportOptions::new().with_format(ImageFormat::Png),
        )
        .unwrap();
        let surface = profile.surface();
        assert_eq!(f64::from(snapshot.width), surface.width().ceil());
        assert_eq!(f64::from(snapshot.height), surface.height().ceil());
    }
}
