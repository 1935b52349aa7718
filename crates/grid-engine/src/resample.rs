//! Refining and resizing grids onto new lattices.

use noise_common::{GridShape, LevelArray};
use tracing::debug;

use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::interpolation::sample_at;
use crate::types::InterpolationMethod;

/// Fractional indices closer than this to a lattice point snap onto it.
const SNAP_TOLERANCE: f64 = 1e-9;

impl Grid {
    /// Refine every layer by an integer factor with bilinear interpolation.
    ///
    /// See [`Grid::refine_with`].
    pub fn refine(&self, factor: usize) -> Result<Grid> {
        self.refine_with(factor, InterpolationMethod::Bilinear)
    }

    /// Refine every layer by an integer factor.
    ///
    /// The bounds stay the same and each axis gets `(n - 1) * factor + 1`
    /// points, so every original lattice point is kept and `factor - 1` new
    /// points are interpolated between neighbours.
    pub fn refine_with(&self, factor: usize, method: InterpolationMethod) -> Result<Grid> {
        if factor == 0 {
            return Err(GridError::invalid_argument("refine factor must be >= 1"));
        }

        let source = self.shape().clone();
        let mut target = source.clone();
        target.set_x_number(refined_count(source.x_number, factor));
        target.set_y_number(refined_count(source.y_number, factor));

        let factor_f = factor as f64;
        let refined = self.map_layers(target.clone(), |array| {
            LevelArray::from_fn(target.y_number, target.x_number, |row, col| {
                sample_at(array, col as f64 / factor_f, row as f64 / factor_f, method)
            })
        });

        debug!(
            factor,
            %method,
            rows = target.y_number,
            cols = target.x_number,
            layers = refined.layer_count(),
            "Refined grid"
        );
        Ok(refined)
    }

    /// Resample every layer onto `shape` with bilinear interpolation.
    pub fn resize(&self, shape: &GridShape) -> Result<Grid> {
        self.resize_with(shape, InterpolationMethod::Bilinear)
    }

    /// Resample every layer onto `shape`.
    ///
    /// Result arrays are shaped `(shape.y_number, shape.x_number)`. Target
    /// points outside the current bounds are NaN.
    pub fn resize_with(&self, shape: &GridShape, method: InterpolationMethod) -> Result<Grid> {
        shape
            .validate()
            .map_err(|e| GridError::invalid_argument(format!("invalid target shape: {}", e)))?;

        let source = self.shape().clone();
        let resized = self.map_layers(shape.clone(), |array| {
            resample_array(array, &source, shape, method)
        });

        debug!(
            %method,
            from = %source,
            to = %shape,
            layers = resized.layer_count(),
            "Resized grid"
        );
        Ok(resized)
    }
}

/// Number of points along an axis of `count` points refined by `factor`.
pub fn refined_count(count: usize, factor: usize) -> usize {
    (count.max(1) - 1) * factor + 1
}

/// Sample `array`, laid out on `source`, at every point of `target`.
pub fn resample_array(
    array: &LevelArray,
    source: &GridShape,
    target: &GridShape,
    method: InterpolationMethod,
) -> LevelArray {
    let xs: Vec<Option<f64>> = target
        .get_x_coordinates()
        .into_iter()
        .map(|x| axis_fraction(source.x_min, source.x_step(), source.x_number, x))
        .collect();
    let ys: Vec<Option<f64>> = target
        .get_y_coordinates()
        .into_iter()
        .map(|y| axis_fraction(source.y_min, source.y_step(), source.y_number, y))
        .collect();

    LevelArray::from_fn(target.y_number, target.x_number, |row, col| {
        match (xs[col], ys[row]) {
            (Some(fx), Some(fy)) => sample_at(array, fx, fy, method),
            _ => f64::NAN,
        }
    })
}

/// Fractional `(col, row)` position of a coordinate on `shape`, or `None`
/// outside it.
pub(crate) fn fractional_position(shape: &GridShape, x: f64, y: f64) -> Option<(f64, f64)> {
    Some((
        axis_fraction(shape.x_min, shape.x_step(), shape.x_number, x)?,
        axis_fraction(shape.y_min, shape.y_step(), shape.y_number, y)?,
    ))
}

/// Fractional index of `value` along an axis, or `None` outside it.
fn axis_fraction(min: f64, step: f64, count: usize, value: f64) -> Option<f64> {
    let last = count.saturating_sub(1) as f64;
    if step <= 0.0 {
        let scale = min.abs().max(1.0);
        return ((value - min).abs() <= SNAP_TOLERANCE * scale).then_some(0.0);
    }

    let fraction = (value - min) / step;
    if fraction < -SNAP_TOLERANCE || fraction > last + SNAP_TOLERANCE {
        return None;
    }

    let nearest = fraction.round();
    if (fraction - nearest).abs() <= SNAP_TOLERANCE {
        Some(nearest.clamp(0.0, last))
    } else {
        Some(fraction)
    }
}
