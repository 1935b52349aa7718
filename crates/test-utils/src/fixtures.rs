//! Common test fixtures for noise grid tests.
//!
//! This module provides pre-defined lattices, year ranges and survey points
//! that represent common scenarios in noise exposure processing.

/// Common lattice definitions for testing.
pub mod grid {
    /// Tiny 5x4 lattice with 100 m cells
    pub const SMALL: GridSpec = GridSpec {
        x_number: 5,
        y_number: 4,
        x_min: 0.0,
        x_max: 400.0,
        y_min: 0.0,
        y_max: 300.0,
    };

    /// 29x25 lattice with 500 m cells in RD coordinates
    pub const AMSTERDAM: GridSpec = GridSpec {
        x_number: 29,
        y_number: 25,
        x_min: 100000.0,
        x_max: 114000.0,
        y_min: 475000.0,
        y_max: 487000.0,
    };

    /// Same extent as `AMSTERDAM` at half the resolution
    pub const AMSTERDAM_COARSE: GridSpec = GridSpec {
        x_number: 15,
        y_number: 13,
        x_min: 100000.0,
        x_max: 114000.0,
        y_min: 475000.0,
        y_max: 487000.0,
    };

    /// Lattice specification for testing.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GridSpec {
        pub x_number: usize,
        pub y_number: usize,
        pub x_min: f64,
        pub x_max: f64,
        pub y_min: f64,
        pub y_max: f64,
    }

    impl GridSpec {
        /// Returns the total number of lattice points.
        pub fn size(&self) -> usize {
            self.x_number * self.y_number
        }

        /// Returns the cell size as `(dx, dy)`.
        pub fn step(&self) -> (f64, f64) {
            let dx = (self.x_max - self.x_min) / (self.x_number.max(2) - 1) as f64;
            let dy = (self.y_max - self.y_min) / (self.y_number.max(2) - 1) as f64;
            (dx, dy)
        }

        /// Returns the centre of the lattice.
        pub fn center(&self) -> (f64, f64) {
            (
                (self.x_min + self.x_max) / 2.0,
                (self.y_min + self.y_max) / 2.0,
            )
        }
    }
}

/// Year ranges for multigrid tests.
pub mod years {
    /// First year of the meteorological reference period
    pub const FIRST: u16 = 1971;

    /// Last year of the meteorological reference period
    pub const LAST: u16 = 2010;

    /// Every year of the reference period, ascending.
    pub fn reference_period() -> Vec<u16> {
        (FIRST..=LAST).collect()
    }
}

/// Survey respondent locations for health-impact tests.
pub mod survey {
    use super::grid::GridSpec;

    /// Respondents on a regular pattern inside `spec`, as `(x, y, weight)`.
    ///
    /// Points sit at the centres of every `stride`-th cell, so none of them
    /// fall on the outer boundary. Weights cycle through 1.0, 1.5 and 2.0.
    pub fn respondents_in(spec: &GridSpec, stride: usize) -> Vec<(f64, f64, f64)> {
        let (dx, dy) = spec.step();
        let stride = stride.max(1);
        let mut points = Vec::new();
        for row in (0..spec.y_number - 1).step_by(stride) {
            for col in (0..spec.x_number - 1).step_by(stride) {
                let weight = 1.0 + 0.5 * (points.len() % 3) as f64;
                points.push((
                    spec.x_min + (col as f64 + 0.5) * dx,
                    spec.y_min + (row as f64 + 0.5) * dy,
                    weight,
                ));
            }
        }
        points
    }
}
