//! Scalar reductions and level scaling.

use noise_common::db_to_energy;
use tracing::debug;

use crate::error::{GridError, Result};
use crate::grid::Grid;

impl Grid {
    /// Area-weighted total noise ("hoeveelheid geluid") of a single grid.
    ///
    /// `10·log10(Σ 10^(L/10) · A)` with `A` the cell area in km². NaN cells
    /// are skipped.
    pub fn hg(&self) -> Result<f64> {
        let array = self.array().map_err(|_| GridError::single_only("hg"))?;
        let area_km2 = self.shape().cell_area() / 1.0e6;

        let energy: f64 = array
            .as_slice()
            .iter()
            .filter(|v| !v.is_nan())
            .map(|v| db_to_energy(*v) * area_km2)
            .sum();
        Ok(10.0 * energy.log10())
    }

    /// Scale the sound energy of every layer by `factor`, in place.
    ///
    /// Adds `10·log10(factor)` dB to every value, so scaling twice by 2 equals
    /// scaling once by 4.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GridError::invalid_argument(format!(
                "scale factor must be positive and finite, got {}",
                factor
            )));
        }

        let offset = 10.0 * factor.log10();
        for array in self.arrays_mut() {
            for value in array.as_mut_slice() {
                *value += offset;
            }
        }

        debug!(factor, offset_db = offset, "Scaled grid");
        Ok(())
    }
}
