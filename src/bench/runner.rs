//! Benchmark Runner Module
//! Times every sieve variant per input size and thread count and writes the
//! report CSV the chart viewer reads.

use crate::bench::sieve;
use crate::settings::ReportSettings;
use log::info;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Input sizes must satisfy 0 < min <= max, got {min}..={max}")]
    InvalidSizes { min: usize, max: usize },
    #[error("Cannot write {path}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("[{tag}] found {found} primes under {n}, serial found {expected}")]
    CountMismatch {
        tag: String,
        n: usize,
        expected: usize,
        found: usize,
    },
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// One timed kernel run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub elapsed_micros: u64,
    pub primes: usize,
}

/// Timings for one input size, thread columns in `thread_counts` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRow {
    pub input_size: usize,
    pub serial: u64,
    pub naive: Vec<u64>,
    pub omp: Vec<u64>,
}

/// Input sizes from `min` up to `max`, growing tenfold.
pub fn decade_sizes(min: usize, max: usize) -> Result<Vec<usize>, BenchError> {
    if min == 0 || min > max {
        return Err(BenchError::InvalidSizes { min, max });
    }
    let mut sizes = Vec::new();
    let mut n = min;
    while n <= max {
        sizes.push(n);
        match n.checked_mul(10) {
            Some(next) => n = next,
            None => break,
        }
    }
    Ok(sizes)
}

fn measure<F: FnOnce(&mut [bool]) -> usize>(composite: &mut [bool], kernel: F) -> Measurement {
    composite.fill(false);
    let start = Instant::now();
    let primes = kernel(composite);
    Measurement {
        elapsed_micros: start.elapsed().as_micros() as u64,
        primes,
    }
}

fn report(tag: &str, m: Measurement) {
    info!(
        "{:<21}Found {} primes in {} microseconds",
        format!("[{}]", tag),
        m.primes,
        m.elapsed_micros
    );
}

fn check(tag: &str, n: usize, expected: usize, m: Measurement) -> Result<(), BenchError> {
    if m.primes != expected {
        return Err(BenchError::CountMismatch {
            tag: tag.to_string(),
            n,
            expected,
            found: m.primes,
        });
    }
    Ok(())
}

/// Time serial, scoped-thread and rayon sieves for one input size.
pub fn run_size(n: usize, thread_counts: &[u32]) -> Result<BenchRow, BenchError> {
    info!("Finding primes under: {}", n);
    let mut composite = vec![false; n];

    let serial = measure(&mut composite, sieve::serial);
    report("Serial", serial);

    let mut row = BenchRow {
        input_size: n,
        serial: serial.elapsed_micros,
        naive: Vec::with_capacity(thread_counts.len()),
        omp: Vec::with_capacity(thread_counts.len()),
    };

    for &threads in thread_counts {
        let workers = threads as usize;

        let tag = format!("{}-parallel THREAD", threads);
        let naive = measure(&mut composite, |c| sieve::parallel_threads(c, workers));
        report(&tag, naive);
        check(&tag, n, serial.primes, naive)?;
        row.naive.push(naive.elapsed_micros);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        let tag = format!("{}-parallel OMP", threads);
        let omp = measure(&mut composite, |c| pool.install(|| sieve::parallel_rayon(c)));
        report(&tag, omp);
        check(&tag, n, serial.primes, omp)?;
        row.omp.push(omp.elapsed_micros);
    }

    Ok(row)
}

/// Lay rows out with the report's column names and order.
pub fn rows_to_dataframe(
    rows: &[BenchRow],
    settings: &ReportSettings,
) -> Result<DataFrame, BenchError> {
    let mut columns = vec![
        Column::new(
            settings.x_column.as_str().into(),
            rows.iter().map(|r| r.input_size as u64).collect::<Vec<u64>>(),
        ),
        Column::new(
            settings.baseline_column.as_str().into(),
            rows.iter().map(|r| r.serial).collect::<Vec<u64>>(),
        ),
    ];

    for (idx, &threads) in settings.thread_counts.iter().enumerate() {
        columns.push(Column::new(
            settings.naive_column(threads).into(),
            rows.iter().map(|r| r.naive[idx]).collect::<Vec<u64>>(),
        ));
        columns.push(Column::new(
            settings.omp_column(threads).into(),
            rows.iter().map(|r| r.omp[idx]).collect::<Vec<u64>>(),
        ));
    }

    Ok(DataFrame::new(columns)?)
}

/// Write the report CSV, creating the parent directory if needed.
pub fn write_report(df: &mut DataFrame, path: &Path) -> Result<(), BenchError> {
    let access = |source| BenchError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(access)?;
    }
    let mut file = File::create(path).map_err(access)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Run the whole benchmark and write the report to `settings.csv_path`.
pub fn run(settings: &ReportSettings) -> Result<DataFrame, BenchError> {
    let sizes = decade_sizes(settings.bench_min_size, settings.bench_max_size)?;

    let mut rows = Vec::with_capacity(sizes.len());
    for n in sizes {
        rows.push(run_size(n, &settings.thread_counts)?);
    }

    let mut df = rows_to_dataframe(&rows, settings)?;
    write_report(&mut df, &settings.csv_path)?;
    info!(
        "Wrote {} rows to {}",
        df.height(),
        settings.csv_path.display()
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Figure;
    use crate::data::DataLoader;

    fn small_settings(dir: &Path) -> ReportSettings {
        ReportSettings {
            csv_path: dir.join("Results").join("Report.csv"),
            thread_counts: vec![2, 4],
            bench_min_size: 1_000,
            bench_max_size: 10_000,
            ..ReportSettings::default()
        }
    }

    #[test]
    fn sizes_grow_by_decades() {
        assert_eq!(
            decade_sizes(10_000, 100_000_000).expect("sizes"),
            vec![10_000, 100_000, 1_000_000, 10_000_000, 100_000_000]
        );
        assert_eq!(decade_sizes(5, 49).expect("sizes"), vec![5]);
    }

    #[test]
    fn bad_size_bounds_are_rejected() {
        assert!(matches!(
            decade_sizes(0, 10),
            Err(BenchError::InvalidSizes { min: 0, max: 10 })
        ));
        assert!(matches!(
            decade_sizes(100, 10),
            Err(BenchError::InvalidSizes { .. })
        ));
    }

    #[test]
    fn one_size_times_every_thread_count() {
        let row = run_size(10_000, &[2, 3]).expect("row");
        assert_eq!(row.input_size, 10_000);
        assert_eq!(row.naive.len(), 2);
        assert_eq!(row.omp.len(), 2);
    }

    #[test]
    fn dataframe_columns_follow_report_order() {
        let settings = ReportSettings {
            thread_counts: vec![2, 4],
            ..ReportSettings::default()
        };
        let rows = vec![BenchRow {
            input_size: 10_000,
            serial: 120,
            naive: vec![90, 80],
            omp: vec![70, 60],
        }];

        let df = rows_to_dataframe(&rows, &settings).expect("frame");
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, settings.required_columns());
    }

    #[test]
    fn written_report_loads_back_into_figure() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = small_settings(dir.path());

        let df = run(&settings).expect("bench");
        assert_eq!(df.height(), 2);

        let mut loader = DataLoader::new();
        loader.load_csv(&settings.csv_path).expect("load");
        assert_eq!(loader.get_columns(), settings.required_columns());

        let df = loader.get_dataframe().expect("frame");
        let figure = Figure::from_dataframe(df, &settings).expect("figure");
        assert_eq!(figure.axes.len(), 2);
        for axis in &figure.axes {
            assert_eq!(axis.series.len(), 3);
            let sizes: Vec<f64> = axis.series[0].points.iter().map(|p| p[0]).collect();
            assert_eq!(sizes, vec![1_000.0, 10_000.0]);
        }
    }
}
