//! Geometry of a rectangular noise grid.

use crate::error::{CommonError, CommonResult};
use serde::{Deserialize, Serialize};

/// Bounds and sample counts of a regular lattice.
///
/// Sample points include both bounds: along x there are `x_number` points
/// evenly spaced from `x_min` to `x_max` (inclusive). Coordinates are in
/// metres (RD New for Dutch grids).
///
/// `GridShape` is a plain value: cloning it gives an independent copy, which
/// is how a target shape for a resize is usually built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridShape {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_number: usize,
    pub y_number: usize,
}

impl GridShape {
    /// Create a new shape, checking that the counts are positive and the
    /// bounds are ordered.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        x_number: usize,
        y_number: usize,
    ) -> CommonResult<Self> {
        let shape = Self {
            x_min,
            x_max,
            y_min,
            y_max,
            x_number,
            y_number,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Check the structural invariants of this shape.
    pub fn validate(&self) -> CommonResult<()> {
        if self.x_number == 0 || self.y_number == 0 {
            return Err(CommonError::InvalidShape(format!(
                "point counts must be positive, got x_number={} y_number={}",
                self.x_number, self.y_number
            )));
        }

        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(CommonError::InvalidShape(format!(
                "bounds must be finite, got {:?}",
                bounds
            )));
        }

        if self.x_max < self.x_min || self.y_max < self.y_min {
            return Err(CommonError::InvalidShape(format!(
                "bounds are not ordered: x [{}, {}], y [{}, {}]",
                self.x_min, self.x_max, self.y_min, self.y_max
            )));
        }

        Ok(())
    }

    /// Change the number of points along x.
    pub fn set_x_number(&mut self, x_number: usize) {
        self.x_number = x_number;
    }

    /// Change the number of points along y.
    pub fn set_y_number(&mut self, y_number: usize) {
        self.y_number = y_number;
    }

    /// Distance between neighbouring points along x (0 for a single column).
    pub fn x_step(&self) -> f64 {
        axis_step(self.x_min, self.x_max, self.x_number)
    }

    /// Distance between neighbouring points along y (0 for a single row).
    pub fn y_step(&self) -> f64 {
        axis_step(self.y_min, self.y_max, self.y_number)
    }

    /// The x coordinate of every column, ascending.
    pub fn get_x_coordinates(&self) -> Vec<f64> {
        axis_coordinates(self.x_min, self.x_max, self.x_number)
    }

    /// The y coordinate of every row, ascending.
    pub fn get_y_coordinates(&self) -> Vec<f64> {
        axis_coordinates(self.y_min, self.y_max, self.y_number)
    }

    /// Shape of an array sampled on this lattice, as `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.y_number, self.x_number)
    }

    /// Total number of lattice points.
    pub fn len(&self) -> usize {
        self.x_number * self.y_number
    }

    /// Check if the lattice has no points.
    pub fn is_empty(&self) -> bool {
        self.x_number == 0 || self.y_number == 0
    }

    /// Area represented by one lattice point, in square metres.
    pub fn cell_area(&self) -> f64 {
        self.x_step() * self.y_step()
    }

    /// Check if a coordinate lies within the bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Convert a coordinate to fractional `(col, row)` indices.
    ///
    /// Returns `None` when the coordinate is outside the bounds.
    pub fn fractional_index(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.contains(x, y) {
            return None;
        }
        Some((
            fraction_along(self.x_min, self.x_step(), x),
            fraction_along(self.y_min, self.y_step(), y),
        ))
    }

    /// Compare geometry with another shape, tolerating float noise in the
    /// bounds.
    pub fn same_geometry(&self, other: &GridShape) -> bool {
        self.x_number == other.x_number
            && self.y_number == other.y_number
            && approx_eq(self.x_min, other.x_min)
            && approx_eq(self.x_max, other.x_max)
            && approx_eq(self.y_min, other.y_min)
            && approx_eq(self.y_max, other.y_max)
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} points over x [{}, {}], y [{}, {}]",
            self.x_number, self.y_number, self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

fn axis_step(min: f64, max: f64, number: usize) -> f64 {
    if number > 1 {
        (max - min) / (number - 1) as f64
    } else {
        0.0
    }
}

fn axis_coordinates(min: f64, max: f64, number: usize) -> Vec<f64> {
    let step = axis_step(min, max, number);
    (0..number)
        .map(|i| {
            // Pin the last point to the bound so it is not lost to rounding
            if number > 1 && i == number - 1 {
                max
            } else {
                min + i as f64 * step
            }
        })
        .collect()
}

fn fraction_along(min: f64, step: f64, value: f64) -> f64 {
    if step > 0.0 {
        (value - min) / step
    } else {
        0.0
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schiphol() -> GridShape {
        GridShape::new(80000.0, 150000.0, 430000.0, 500000.0, 141, 71).unwrap()
    }

    #[test]
    fn test_steps() {
        let shape = schiphol();
        assert!((shape.x_step() - 500.0).abs() < 1e-9);
        assert!((shape.y_step() - 1000.0).abs() < 1e-9);
        assert!((shape.cell_area() - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_coordinates_include_bounds() {
        let shape = schiphol();
        let x = shape.get_x_coordinates();
        let y = shape.get_y_coordinates();

        assert_eq!(x.len(), 141);
        assert_eq!(y.len(), 71);
        assert_eq!(x[0], 80000.0);
        assert_eq!(x[140], 150000.0);
        assert_eq!(y[0], 430000.0);
        assert_eq!(y[70], 500000.0);
        assert!(y.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_point_axis() {
        let shape = GridShape::new(0.0, 0.0, 0.0, 10.0, 1, 3).unwrap();
        assert_eq!(shape.x_step(), 0.0);
        assert_eq!(shape.get_x_coordinates(), vec![0.0]);
        assert_eq!(shape.fractional_index(0.0, 5.0), Some((0.0, 1.0)));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = schiphol();
        let mut copy = original.clone();
        copy.set_x_number(201);
        copy.set_y_number(79);

        assert_eq!(original.x_number, 141);
        assert_eq!(original.y_number, 71);
        assert_eq!(copy.dims(), (79, 201));
    }

    #[test]
    fn test_fractional_index() {
        let shape = schiphol();
        let (col, row) = shape.fractional_index(80250.0, 431500.0).unwrap();
        assert!((col - 0.5).abs() < 1e-9);
        assert!((row - 1.5).abs() < 1e-9);
        assert!(shape.fractional_index(79999.0, 431500.0).is_none());
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(GridShape::new(0.0, 1.0, 0.0, 1.0, 0, 2).is_err());
        assert!(GridShape::new(1.0, 0.0, 0.0, 1.0, 2, 2).is_err());
        assert!(GridShape::new(0.0, f64::NAN, 0.0, 1.0, 2, 2).is_err());
    }

    #[test]
    fn test_same_geometry_tolerates_rounding() {
        let a = schiphol();
        let mut b = a.clone();
        b.x_max += 1e-8;
        assert!(a.same_geometry(&b));

        b.set_x_number(140);
        assert!(!a.same_geometry(&b));
    }

    #[test]
    fn test_serde_round_trip() {
        let shape = schiphol();
        let json = serde_json::to_string(&shape).unwrap();
        let back: GridShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, back);
    }
}
