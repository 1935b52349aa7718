//! Dense 2-D arrays of noise levels.

use crate::error::{CommonError, CommonResult};

/// A row-major matrix of levels, shaped `(rows, cols)`.
///
/// Row `r` holds the samples at the r-th y coordinate of the grid (ascending
/// y), column `c` those at the c-th x coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelArray {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl LevelArray {
    /// Wrap row-major data.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> CommonResult<Self> {
        if data.len() != rows * cols {
            return Err(CommonError::ArrayLength {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// An array with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Build an array by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { data, rows, cols }
    }

    /// Build an array from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CommonResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(CommonError::ArrayLength {
                len: bad.len(),
                rows: 1,
                cols: n_cols,
            });
        }
        Self::new(rows.into_iter().flatten().collect(), n_rows, n_cols)
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// One row of the array.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on 0, and a zero-width array has no row content anyway
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major view of the values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable flat row-major view of the values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the array, returning the row-major values.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Apply `f` to every value, returning a new array.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Largest absolute difference to another array of the same shape.
    ///
    /// Returns `None` when the shapes differ.
    pub fn max_abs_diff(&self, other: &LevelArray) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the array holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
