//! Grid placement of thread counts.
//!
//! Thread counts are even and evenly spaced, so `threads / 2 - 1` is a slot
//! index that fills the grid row-major. On the default 2x4 grid this puts
//! 2..=8 threads on the first row and 10..=16 on the second.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("Thread count {0} is not a positive even number")]
    InvalidThreadCount(u32),
    #[error("Thread count {threads} lands at row {row}, outside the {rows}x{cols} grid")]
    OutOfGrid {
        threads: u32,
        row: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Thread counts {first} and {second} both land at cell ({row}, {col})")]
    Collision {
        first: u32,
        second: u32,
        row: usize,
        col: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub threads: u32,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> Result<Self, LayoutError> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Row and column for a thread count. Does not check the row bound.
    pub fn cell_for(&self, threads: u32) -> Result<(usize, usize), LayoutError> {
        if threads == 0 || threads % 2 != 0 {
            return Err(LayoutError::InvalidThreadCount(threads));
        }
        let slot = (threads / 2 - 1) as usize;
        Ok((slot / self.cols, slot % self.cols))
    }

    /// Place every thread count, in input order.
    pub fn place(&self, thread_counts: &[u32]) -> Result<Vec<Placement>, LayoutError> {
        let mut placements: Vec<Placement> = Vec::with_capacity(thread_counts.len());

        for &threads in thread_counts {
            let (row, col) = self.cell_for(threads)?;
            if row >= self.rows {
                return Err(LayoutError::OutOfGrid {
                    threads,
                    row,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
            if let Some(taken) = placements.iter().find(|p| p.row == row && p.col == col) {
                return Err(LayoutError::Collision {
                    first: taken.threads,
                    second: threads,
                    row,
                    col,
                });
            }
            placements.push(Placement { threads, row, col });
        }

        Ok(placements)
    }
}
