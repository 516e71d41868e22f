// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a Hearth chart from a JSON dataset and writes `chart.svg` plus a raster snapshot.
//!
//! ```text
//! hearth_demo --in hearth_demo/data/clusters.json --kind scatter --select 0,2
//! hearth_demo --in hearth_demo/data/history.json --kind line \
//!     --prediction hearth_demo/data/prediction.json --format jpeg --dark
//! ```
//!
//! Set `RUST_LOG=debug` to see render and export diagnostics.

mod input;

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use hearth_charts::{
    BarSpec, ChartSpec, ChartView, LineSpec, PointerEvent, ScatterSpec, Theme, ViewStatus,
};
use hearth_export::{ExportOptions, ImageFormat, export, to_svg};
use hearth_transforms::{TimeRange, filter_time_range, merge_prediction, summarize_clusters};
use tracing_subscriber::EnvFilter;

/// First and last year of the history shown next to a prediction.
const HISTORY_YEARS: (i64, i64) = (2016, 2018);
/// Years a prediction is extended over.
const PREDICTION_YEARS: (i64, i64) = (2019, 2020);

#[derive(Parser, Debug)]
#[command(name = "hearth_demo", version, about)]
struct Cli {
    /// Input dataset JSON (clustering response, serialized dataset, or array of records).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Chart to draw.
    #[arg(long, value_enum, default_value_t = Kind::Scatter)]
    kind: Kind,

    /// Viewport width in CSS pixels; selects the mobile, tablet or desktop layout.
    #[arg(long, default_value_t = 1280)]
    viewport: u32,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Raster snapshot format.
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Device pixel ratio of the raster snapshot.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Clusters to show (comma separated). All clusters are shown when omitted.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    select: Option<Vec<i64>>,

    /// Use the dark theme.
    #[arg(long, default_value_t = false)]
    dark: bool,

    /// Prediction response JSON; extends the history with predicted years.
    #[arg(long)]
    prediction: Option<PathBuf>,

    /// Snapshot time after the render, in milliseconds. Defaults to the end of the animation.
    #[arg(long)]
    elapsed_ms: Option<f64>,

    /// Record key to hover, so the snapshot shows its tooltip.
    #[arg(long)]
    hover: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Scatter,
    Line,
    Bar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Jpeg,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    run(&Cli::parse())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut dataset = input::load_dataset(&cli.in_path)?;
    if let Some(path) = &cli.prediction {
        let price = input::load_prediction(path)?;
        let history = filter_time_range(
            &dataset,
            TimeRange::new(HISTORY_YEARS.0, HISTORY_YEARS.1)?,
        );
        dataset = merge_prediction(
            &history,
            price,
            TimeRange::new(PREDICTION_YEARS.0, PREDICTION_YEARS.1)?,
        )?;
    }

    let spec: ChartSpec = match cli.kind {
        Kind::Scatter => ScatterSpec::new().into(),
        Kind::Line => LineSpec::new().into(),
        Kind::Bar => BarSpec::new().into(),
    };
    let mut view = ChartView::new(spec)
        .with_theme(Theme::for_dark_mode(cli.dark))
        .with_viewport(cli.viewport);
    let ticket = view.begin_fetch();
    view.finish_fetch(ticket, Ok(Some(dataset)));
    if view.status() != &ViewStatus::Ready {
        tracing::warn!(status = ?view.status(), "no data to draw");
        return Ok(());
    }

    if let Some(select) = &cli.select {
        for category in view.colors().domain().to_vec() {
            view.set_category(category, select.contains(&category));
        }
    }
    if cli.kind == Kind::Scatter {
        print_cluster_summary(&view);
    }

    let Some(pass) = view.render()? else {
        tracing::warn!("the selection leaves nothing to draw");
        return Ok(());
    };
    for warning in &pass.geometry.warnings {
        tracing::warn!(%warning, "record skipped");
    }
    let elapsed_ms = cli
        .elapsed_ms
        .unwrap_or_else(|| pass.animation.total_duration_ms());
    let hover = cli.hover.and_then(|key| {
        pass.geometry
            .shapes
            .iter()
            .find(|s| s.record.key == key)
            .map(|s| s.center())
    });
    if let Some(point) = hover {
        let tooltip = view.pointer(PointerEvent::Move(point));
        tracing::info!(lines = ?tooltip.lines, "hovering");
    }

    let scene = view
        .frame(elapsed_ms)
        .context("the view has no render pass")?;
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    let svg_path = cli.out_dir.join("chart.svg");
    fs::write(&svg_path, to_svg(&scene))
        .with_context(|| format!("write '{}'", svg_path.display()))?;

    let format = match cli.format {
        Format::Png => ImageFormat::Png,
        Format::Jpeg => ImageFormat::Jpeg,
    };
    let snapshot = export(
        &scene,
        &ExportOptions::new()
            .with_format(format)
            .with_file_stem("chart")
            .with_scale(cli.scale),
    )?;
    let raster_path = snapshot.save(&cli.out_dir)?;

    println!(
        "wrote {} and {} ({}x{})",
        svg_path.display(),
        raster_path.display(),
        snapshot.width,
        snapshot.height
    );
    Ok(())
}

fn print_cluster_summary(view: &ChartView) {
    let Some(dataset) = view.dataset() else {
        return;
    };
    let labels = &dataset.labels;
    println!(
        "{:>8}  {:>6}  {:>14}  {:>14}",
        "Cluster",
        "Count",
        format!("Mean {}", labels.target),
        format!("Mean {}", labels.compare)
    );
    let fmt = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".into());
    for s in summarize_clusters(dataset) {
        let shown = if view.selection().contains(s.category) { "" } else { " (hidden)" };
        println!(
            "{:>8}  {:>6}  {:>14}  {:>14}{shown}",
            s.category,
            s.count,
            fmt(s.mean_target),
            fmt(s.mean_compare)
        );
    }
}
