//! Figure Model
//! Backend-independent description of the chart grid: one axis per thread
//! count, three series per axis. Both the egui viewer and the static
//! renderer draw from this.

use crate::charts::layout::{GridLayout, LayoutError};
use crate::data::{DataProcessor, ProcessorError};
use crate::settings::ReportSettings;
use log::debug;
use polars::prelude::DataFrame;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigureError {
    #[error(transparent)]
    Data(#[from] ProcessorError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Which implementation a series measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Serial,
    Naive,
    Omp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
    Dotted,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Serial, SeriesKind::Naive, SeriesKind::Omp];

    pub fn line_kind(self) -> LineKind {
        match self {
            SeriesKind::Serial => LineKind::Solid,
            SeriesKind::Naive => LineKind::Dashed,
            SeriesKind::Omp => LineKind::Dotted,
        }
    }

    pub fn has_marker(self) -> bool {
        true
    }

    /// Column holding this series for `threads`.
    pub fn column(self, settings: &ReportSettings, threads: u32) -> String {
        match self {
            SeriesKind::Serial => settings.baseline_column.clone(),
            SeriesKind::Naive => settings.naive_column(threads),
            SeriesKind::Omp => settings.omp_column(threads),
        }
    }

    pub fn index(self) -> usize {
        match self {
            SeriesKind::Serial => 0,
            SeriesKind::Naive => 1,
            SeriesKind::Omp => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub row: usize,
    pub col: usize,
    pub threads: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Axis {
    /// (min, max) of x and y over all points, if there are any.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let mut x = [first[0], first[0]];
        let mut y = [first[1], first[1]];
        for p in points {
            x = [x[0].min(p[0]), x[1].max(p[0])];
            y = [y[0].min(p[1]), y[1].max(p[1])];
        }
        Some((x, y))
    }
}

/// The whole chart grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    pub axes: Vec<Axis>,
}

impl Figure {
    /// Build the figure from the loaded report.
    ///
    /// Layout problems and missing columns fail the whole build; no axis or
    /// series is skipped.
    pub fn from_dataframe(df: &DataFrame, settings: &ReportSettings) -> Result<Self, FigureError> {
        let layout = GridLayout::new(settings.grid_rows, settings.grid_cols)?;
        let placements = layout.place(&settings.thread_counts)?;

        let mut axes = Vec::with_capacity(placements.len());
        for placement in placements {
            let mut series = Vec::with_capacity(SeriesKind::ALL.len());
            for kind in SeriesKind::ALL {
                let name = kind.column(settings, placement.threads);
                let points = DataProcessor::series_points(df, &settings.x_column, &name)?;
                debug!("{}: {} points", name, points.len());
                series.push(Series { kind, name, points });
            }

            debug!(
                "Threads {} placed at ({}, {})",
                placement.threads, placement.row, placement.col
            );
            axes.push(Axis {
                row: placement.row,
                col: placement.col,
                threads: placement.threads,
                title: format!("Threads: {}", placement.threads),
                x_label: settings.x_column.clone(),
                y_label: settings.y_label.clone(),
                series,
            });
        }

        Ok(Self {
            rows: layout.rows,
            cols: layout.cols,
            axes,
        })
    }

    pub fn axis_at(&self, row: usize, col: usize) -> Option<&Axis> {
        self.axes.iter().find(|a| a.row == row && a.col == col)
    }
}
