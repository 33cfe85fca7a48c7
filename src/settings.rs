//! Report Settings Module
//! Column names, thread counts and grid shape for the benchmark report.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_REPORT_PATH: &str = "Results/Report.csv";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for one report run. Defaults reproduce the benchmark's fixed layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub csv_path: PathBuf,
    pub x_column: String,
    pub baseline_column: String,
    pub naive_suffix: String,
    pub omp_suffix: String,
    pub thread_counts: Vec<u32>,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub y_label: String,
    pub window_size: [f32; 2],
    pub export_size: [u32; 2],
    pub bench_min_size: usize,
    pub bench_max_size: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_REPORT_PATH),
            x_column: "Input size".to_string(),
            baseline_column: "Serial".to_string(),
            naive_suffix: "Naive".to_string(),
            omp_suffix: "OMP".to_string(),
            thread_counts: (2..=16).step_by(2).collect(),
            grid_rows: 2,
            grid_cols: 4,
            y_label: "Time taken (microseconds)".to_string(),
            window_size: [1600.0, 900.0],
            export_size: [1600, 900],
            bench_min_size: 10_000,
            bench_max_size: 100_000_000,
        }
    }
}

impl ReportSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn naive_column(&self, threads: u32) -> String {
        format!("{}-{}", threads, self.naive_suffix)
    }

    pub fn omp_column(&self, threads: u32) -> String {
        format!("{}-{}", threads, self.omp_suffix)
    }

    /// Every column the report reads, in plotting order.
    pub fn required_columns(&self) -> Vec<String> {
        let mut columns = vec![self.x_column.clone(), self.baseline_column.clone()];
        for &threads in &self.thread_counts {
            columns.push(self.naive_column(threads));
            columns.push(self.omp_column(threads));
        }
        columns
    }
}
