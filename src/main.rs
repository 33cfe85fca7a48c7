//! Sieve Charts - thread-scaling benchmark report viewer
//!
//! Plots the Serial, Naive and OMP timings of a sieve benchmark report as a
//! grid of line charts, one per thread count. The `bench` subcommand runs
//! the sieve benchmark that produces the report.

mod bench;
mod charts;
mod data;
mod gui;
mod settings;

use anyhow::{anyhow, Context, Result};
use charts::{Figure, StaticChartRenderer};
use clap::{Args, Parser, Subcommand};
use data::{DataLoader, DataProcessor};
use eframe::egui;
use gui::{ReportInfo, SieveChartsApp};
use log::{debug, info};
use settings::ReportSettings;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sieve-charts", version, about = "Plot sieve benchmark timings per thread count")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Benchmark report CSV [default: Results/Report.csv]
    csv: Option<PathBuf>,

    /// JSON file overriding column names, thread counts or grid shape
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Write the charts to a .png or .svg file instead of opening a window
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time the Serial, Naive and OMP sieves and write the report CSV
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Report CSV to write [default: Results/Report.csv]
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Smallest sieve size; sizes grow tenfold up to --max-size
    #[arg(long)]
    min_size: Option<usize>,

    #[arg(long)]
    max_size: Option<usize>,
}

fn resolve_settings(cli: &Cli) -> Result<ReportSettings> {
    let mut settings = match &cli.config {
        Some(path) => ReportSettings::load(path)?,
        None => ReportSettings::default(),
    };
    if let Some(csv) = &cli.csv {
        settings.csv_path = csv.clone();
    }
    if let Some(Command::Bench(args)) = &cli.command {
        if let Some(output) = &args.output {
            settings.csv_path = output.clone();
        }
        if let Some(min) = args.min_size {
            settings.bench_min_size = min;
        }
        if let Some(max) = args.max_size {
            settings.bench_max_size = max;
        }
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    match &cli.command {
        Some(Command::Bench(_)) => {
            bench::run(&settings).with_context(|| {
                format!("benchmarking into {}", settings.csv_path.display())
            })?;
            Ok(())
        }
        None => show_report(&cli, settings),
    }
}

fn show_report(cli: &Cli, settings: ReportSettings) -> Result<()> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(&settings.csv_path)
        .with_context(|| format!("loading report {}", settings.csv_path.display()))?;
    debug!("Columns: {:?}", loader.get_columns());
    let df = loader
        .get_dataframe()
        .ok_or_else(|| anyhow!("no data loaded from {}", settings.csv_path.display()))?;

    DataProcessor::require_columns(df, &settings.required_columns())?;
    let figure = Figure::from_dataframe(df, &settings)?;

    if let Some(path) = &cli.export {
        let [width, height] = settings.export_size;
        return StaticChartRenderer::export(&figure, path, (width, height))
            .with_context(|| format!("exporting charts to {}", path.display()));
    }

    let info = ReportInfo {
        source: loader
            .get_file_path()
            .cloned()
            .unwrap_or_else(|| settings.csv_path.clone()),
        row_count: loader.get_row_count(),
    };
    info!("Opening window with {} charts", figure.axes.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([800.0, 500.0])
            .with_title("Sieve Charts"),
        ..Default::default()
    };

    eframe::run_native(
        "Sieve Charts",
        options,
        Box::new(move |cc| Ok(Box::new(SieveChartsApp::new(cc, figure, info)))),
    )
    .map_err(|e| anyhow!("failed to open display window: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_csv_overrides_default_path() {
        let cli = Cli::parse_from(["sieve-charts", "results/out.csv"]);
        let settings = resolve_settings(&cli).expect("settings");
        assert_eq!(settings.csv_path, PathBuf::from("results/out.csv"));
    }

    #[test]
    fn no_arguments_use_default_report() {
        let cli = Cli::parse_from(["sieve-charts"]);
        assert!(cli.export.is_none());
        let settings = resolve_settings(&cli).expect("settings");
        assert_eq!(settings, ReportSettings::default());
    }

    #[test]
    fn cli_path_wins_over_config_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("report.json");
        std::fs::write(&config, r#"{ "csv_path": "from_config.csv" }"#).expect("write");

        let from_config = Cli::parse_from([
            "sieve-charts",
            "--config",
            config.to_str().expect("utf-8 path"),
        ]);
        assert_eq!(
            resolve_settings(&from_config).expect("settings").csv_path,
            PathBuf::from("from_config.csv")
        );

        let both = Cli::parse_from([
            "sieve-charts",
            "cli.csv",
            "--config",
            config.to_str().expect("utf-8 path"),
        ]);
        assert_eq!(
            resolve_settings(&both).expect("settings").csv_path,
            PathBuf::from("cli.csv")
        );
    }

    #[test]
    fn bench_subcommand_overrides_output_and_sizes() {
        let cli = Cli::parse_from([
            "sieve-charts",
            "bench",
            "--output",
            "out/Report.csv",
            "--min-size",
            "100",
            "--max-size",
            "1000",
        ]);
        assert!(matches!(cli.command, Some(Command::Bench(_))));

        let settings = resolve_settings(&cli).expect("settings");
        assert_eq!(settings.csv_path, PathBuf::from("out/Report.csv"));
        assert_eq!((settings.bench_min_size, settings.bench_max_size), (100, 1000));
    }

    #[test]
    fn bench_without_flags_keeps_report_defaults() {
        let cli = Cli::parse_from(["sieve-charts", "bench"]);
        assert!(cli.csv.is_none());
        assert_eq!(resolve_settings(&cli).expect("settings"), ReportSettings::default());
    }

    #[test]
    fn report_on_disk_builds_full_figure() {
        let settings = ReportSettings::default();
        let header = settings.required_columns().join(",");
        let width = settings.required_columns().len() as u64;
        let row = |size: u64| {
            let mut cells = vec![size.to_string()];
            cells.extend((1..width).map(|c| (size / 100 * c).to_string()));
            cells.join(",")
        };

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Report.csv");
        std::fs::write(&path, format!("{header}\n{}\n{}\n", row(10_000), row(100_000)))
            .expect("write");

        let mut loader = DataLoader::new();
        let df = loader.load_csv(&path).expect("load");
        let figure = Figure::from_dataframe(df, &settings).expect("figure");

        assert_eq!(figure.axes.len(), 8);
        for axis in &figure.axes {
            assert_eq!(axis.series.len(), 3);
            assert!(axis.series.iter().all(|s| s.points.len() == 2));
        }
    }
}
