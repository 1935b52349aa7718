//! Interpolation methods for grid resampling.
//!
//! All functions take fractional `(col, row)` indices into a row-major
//! lattice, as produced by [`GridShape::fractional_index`].
//!
//! [`GridShape::fractional_index`]: noise_common::GridShape::fractional_index

use noise_common::LevelArray;

use crate::types::InterpolationMethod;

/// Nearest neighbor interpolation.
///
/// Returns the value of the nearest lattice point.
pub fn nearest_interpolate(array: &LevelArray, x: f64, y: f64) -> f64 {
    if x < 0.0 || y < 0.0 {
        return f64::NAN;
    }
    let col = x.round() as usize;
    let row = y.round() as usize;

    array.get(row, col).unwrap_or(f64::NAN)
}

/// Bilinear interpolation.
///
/// Smoothly interpolates between the four nearest lattice points.
pub fn bilinear_interpolate(array: &LevelArray, x: f64, y: f64) -> f64 {
    let (rows, cols) = array.shape();
    if x < 0.0 || y < 0.0 || rows == 0 || cols == 0 {
        return f64::NAN;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    if x0 >= cols || y0 >= rows {
        return f64::NAN;
    }
    let x1 = (x0 + 1).min(cols - 1);
    let y1 = (y0 + 1).min(rows - 1);

    let xf = x - x0 as f64;
    let yf = y - y0 as f64;

    let data = array.as_slice();
    let v00 = data[y0 * cols + x0];
    let v10 = data[y0 * cols + x1];
    let v01 = data[y1 * cols + x0];
    let v11 = data[y1 * cols + x1];

    // Neighbours with zero weight are never read, so a NaN there cannot leak in
    let lower = blend(v00, v10, xf);
    let upper = blend(v01, v11, xf);
    blend(lower, upper, yf)
}

fn blend(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else {
        a * (1.0 - t) + b * t
    }
}

/// Bicubic interpolation.
///
/// Uses the 16 surrounding points; falls back to bilinear when any of them
/// is NaN.
pub fn cubic_interpolate(array: &LevelArray, x: f64, y: f64) -> f64 {
    let (rows, cols) = array.shape();
    if x < 0.0 || y < 0.0 || x > (cols as f64 - 1.0) || y > (rows as f64 - 1.0) {
        return f64::NAN;
    }

    let xi = x.floor() as i64;
    let yi = y.floor() as i64;

    let xf = x - xi as f64;
    let yf = y - yi as f64;

    let data = array.as_slice();
    let mut values = [[0.0f64; 4]; 4];

    for j in 0..4 {
        for i in 0..4 {
            let px = (xi + i - 1).clamp(0, cols as i64 - 1) as usize;
            let py = (yi + j - 1).clamp(0, rows as i64 - 1) as usize;
            let value = data[py * cols + px];
            if value.is_nan() {
                return bilinear_interpolate(array, x, y);
            }
            values[j as usize][i as usize] = value;
        }
    }

    let mut row_values = [0.0f64; 4];
    for (j, row) in values.iter().enumerate() {
        row_values[j] = cubic_1d(row[0], row[1], row[2], row[3], xf);
    }

    cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf)
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

/// Sample `array` at fractional indices with the given method.
pub fn sample_at(array: &LevelArray, x: f64, y: f64, method: InterpolationMethod) -> f64 {
    match method {
        InterpolationMethod::Nearest => nearest_interpolate(array, x, y),
        InterpolationMethod::Bilinear => bilinear_interpolate(array, x, y),
        InterpolationMethod::Cubic => cubic_interpolate(array, x, y),
    }
}
