//! Data Processor Module
//! Column lookup and (x, y) point extraction for the chart series.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column: \"{0}\"")]
    MissingColumn(String),
}

/// Pulls plottable values out of the loaded report.
pub struct DataProcessor;

impl DataProcessor {
    /// Fail with the first column in `columns` the table does not have.
    pub fn require_columns(df: &DataFrame, columns: &[String]) -> Result<(), ProcessorError> {
        match columns.iter().find(|name| !Self::has_column(df, name)) {
            Some(name) => Err(ProcessorError::MissingColumn(name.clone())),
            None => Ok(()),
        }
    }

    pub fn has_column(df: &DataFrame, name: &str) -> bool {
        df.get_column_names().iter().any(|c| c.as_str() == name)
    }

    /// Get a column as f64 values, one entry per row.
    pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        if !Self::has_column(df, name) {
            return Err(ProcessorError::MissingColumn(name.to_string()));
        }

        let values = df.column(name)?.cast(&DataType::Float64)?;
        let values = values.f64()?;
        Ok(values.into_iter().collect())
    }

    /// Pair `x_col` with `y_col` row by row.
    ///
    /// Rows where either cell is null or NaN are left out of the series.
    pub fn series_points(
        df: &DataFrame,
        x_col: &str,
        y_col: &str,
    ) -> Result<Vec<[f64; 2]>, ProcessorError> {
        let xs = Self::numeric_values(df, x_col)?;
        let ys = Self::numeric_values(df, y_col)?;

        let points = xs
            .into_iter()
            .zip(ys)
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some([x, y]),
                _ => None,
            })
            .collect();

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Input size".into(), [10_000i64, 100_000, 1_000_000]),
            Column::new("Serial".into(), [Some(120.0), None, Some(f64::NAN)]),
            Column::new("2-Naive".into(), [90i64, 600, 5_000]),
        ])
        .expect("frame")
    }

    #[test]
    fn integer_columns_are_cast_to_f64() {
        let df = sample_frame();
        let points = DataProcessor::series_points(&df, "Input size", "2-Naive").expect("points");
        assert_eq!(
            points,
            vec![
                [10_000.0, 90.0],
                [100_000.0, 600.0],
                [1_000_000.0, 5_000.0]
            ]
        );
    }

    #[test]
    fn null_and_nan_cells_are_skipped() {
        let df = sample_frame();
        let points = DataProcessor::series_points(&df, "Input size", "Serial").expect("points");
        assert_eq!(points, vec![[10_000.0, 120.0]]);
    }

    #[test]
    fn missing_column_is_named() {
        let df = sample_frame();
        let err = DataProcessor::series_points(&df, "Input size", "8-OMP").unwrap_err();
        match err {
            ProcessorError::MissingColumn(name) => assert_eq!(name, "8-OMP"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn require_columns_reports_first_absent() {
        let df = sample_frame();
        let wanted = vec![
            "Input size".to_string(),
            "2-OMP".to_string(),
            "4-OMP".to_string(),
        ];
        let err = DataProcessor::require_columns(&df, &wanted).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(ref name) if name == "2-OMP"));

        assert!(DataProcessor::require_columns(&df, &wanted[..1]).is_ok());
    }
}
