// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `labdash`: render analysis charts and dashboard reports from stored analysis documents.

mod report;
mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use labdash_cache::{
    AnalysisData, CacheRegistry, ChartState, DirSource, Entity, SeriesKind, now_secs,
};
use labdash_charts::{ChartType, LineChartSpec, Selection, TimeSeriesChartSpec};
use labdash_scene::Rendered;

use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "labdash",
    version,
    about = "Render ML monitoring charts and dashboards to SVG and HTML"
)]
struct Cli {
    /// Settings file (defaults to ./labdash.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one analysis document as an SVG chart.
    Render(RenderArgs),
    /// Render every analysis of a computer or run as an HTML page.
    Report(ReportArgs),
    /// Print a summary of each series in an analysis document.
    Inspect(InspectArgs),
    /// Show or change the stored chart preferences of an analysis.
    Prefs(PrefsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Analysis document (JSON).
    #[arg(long)]
    input: PathBuf,
    /// Analysis kind; computer kinds render with a time axis.
    #[arg(long, value_parser = parse_kind)]
    kind: Option<SeriesKind>,
    /// Chart width in pixels.
    #[arg(long)]
    width: Option<f64>,
    /// Use a logarithmic value axis.
    #[arg(long)]
    log: bool,
    /// Comma separated series indices to plot; -1 entries are ignored.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    select: Vec<i64>,
    /// Force a time axis.
    #[arg(long)]
    time: bool,
    /// Plot the summary series instead of the full ones.
    #[arg(long)]
    summary: bool,
    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Data directory.
    #[arg(long)]
    root: PathBuf,
    /// Computer or run uuid.
    #[arg(long)]
    uuid: String,
    /// `computer` or `run`.
    #[arg(long, value_parser = parse_entity, default_value = "run")]
    entity: Entity,
    /// Chart width in pixels.
    #[arg(long)]
    width: Option<f64>,
    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Analysis document (JSON).
    #[arg(long)]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct PrefsArgs {
    /// Data directory.
    #[arg(long)]
    root: PathBuf,
    /// Computer or run uuid.
    #[arg(long)]
    uuid: String,
    /// Analysis kind.
    #[arg(long, value_parser = parse_kind)]
    kind: SeriesKind,
    /// Series to show or hide; may be repeated.
    #[arg(long)]
    toggle: Vec<usize>,
    /// `linear` or `log`.
    #[arg(long)]
    chart_type: Option<String>,
}

fn parse_kind(s: &str) -> Result<SeriesKind, String> {
    SeriesKind::from_name(s).ok_or_else(|| {
        let names: Vec<_> = SeriesKind::ALL.iter().map(|k| k.name).collect();
        format!("unknown analysis {s:?}, expected one of {}", names.join(", "))
    })
}

fn parse_entity(s: &str) -> Result<Entity, String> {
    Entity::from_name(s).ok_or_else(|| format!("unknown entity {s:?}, expected computer or run"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_deref().unwrap_or("warn")),
    )
    .init();
    log::debug!("settings: {settings:?}");

    match cli.cmd {
        Command::Render(args) => render(&settings, args).await,
        Command::Report(args) => report(&settings, args).await,
        Command::Inspect(args) => inspect(&args).await,
        Command::Prefs(args) => prefs(&settings, args).await,
    }
}

async fn read_analysis(path: &Path) -> Result<AnalysisData> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

async fn emit(out: Option<&Path>, body: &str) -> Result<()> {
    match out {
        Some(path) => {
            tokio::fs::write(path, body)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

async fn render(settings: &Settings, args: RenderArgs) -> Result<()> {
    let data = read_analysis(&args.input).await?;
    let series = if args.summary {
        data.summary_series()
    } else {
        data.to_series()
    };
    let width = settings.chart_width(args.width);
    let chart_type = if args.log {
        ChartType::Log
    } else {
        ChartType::Linear
    };
    let selection = if args.select.is_empty() {
        Selection::Default
    } else {
        Selection::from_plot_idx(&args.select)
    };
    let time = args.time || args.kind.is_some_and(|k| k.is_time_series());
    let rendered = if time {
        TimeSeriesChartSpec::new(width)
            .with_chart_type(chart_type)
            .with_selection(selection)
            .render(Some(series.as_slice()))
    } else {
        LineChartSpec::new(width)
            .with_chart_type(chart_type)
            .with_selection(selection)
            .render(Some(series.as_slice()))
    };
    if let Rendered::Empty = rendered {
        log::warn!("{}: nothing to plot", args.input.display());
    }
    emit(args.out.as_deref(), &rendered.to_svg_string()).await
}

async fn report(settings: &Settings, args: ReportArgs) -> Result<()> {
    if !args.root.is_dir() {
        bail!("data directory {} does not exist", args.root.display());
    }
    let registry = CacheRegistry::new(Arc::new(DirSource::new(&args.root)))
        .with_reload_timeout(settings.reload_timeout());
    let status = registry.status(args.entity, &args.uuid).get(false).await?;
    let width = settings.chart_width(args.width);
    let cards =
        report::collect_cards(&registry, args.entity, &args.uuid, width, now_secs()).await?;
    log::info!("{} cards for {} {}", cards.len(), args.entity, args.uuid);
    let html = report::render_html(args.entity, &args.uuid, status, &cards);
    emit(args.out.as_deref(), &html).await
}

async fn inspect(args: &InspectArgs) -> Result<()> {
    let data = read_analysis(&args.input).await?;
    for (i, s) in data.to_series().iter().enumerate() {
        match s.last() {
            Some(p) => println!(
                "{i}\t{}\t{} points\tlast {}\tsmoothed {}",
                s.name,
                s.len(),
                p.value,
                p.smoothed
            ),
            None => println!("{i}\t{}\t0 points", s.name),
        }
    }
    for insight in &data.insights {
        println!("{}: {}", insight.kind, insight.message);
    }
    Ok(())
}

async fn prefs(settings: &Settings, args: PrefsArgs) -> Result<()> {
    let registry = CacheRegistry::new(Arc::new(DirSource::new(&args.root)))
        .with_reload_timeout(settings.reload_timeout());
    let mut controller = registry.controller(args.kind, &args.uuid);
    controller.load().await?;
    for i in args.toggle {
        controller.toggle(i).await?;
    }
    if let Some(tag) = &args.chart_type {
        controller.set_chart_type(ChartType::from_tag(tag)).await?;
    }
    if let ChartState::Ready {
        series,
        selection,
        chart_type,
    } = controller.state()
    {
        for (i, s) in series.iter().enumerate() {
            let mark = if selection.contains(i, series.len()) {
                "x"
            } else {
                " "
            };
            println!("[{mark}] {i} {}", s.name);
        }
        println!("chart type: {}", chart_type.as_tag());
    }
    Ok(())
}
