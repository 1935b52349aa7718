//! Per-cell statistics across the layers of a multigrid.

use noise_common::{db_to_energy, energy_to_db, LevelArray};
use tracing::debug;

use crate::config::GridEngineConfig;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::types::BoundPolicy;

/// Mean and spread of a multigrid, each as a single grid of the working
/// shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStatistics {
    /// Energetic mean for decibel units, arithmetic mean otherwise.
    pub mean: Grid,
    /// Distance from the mean up to the upper bound.
    pub dhi: Grid,
    /// Distance from the mean down to the lower bound.
    pub dlo: Grid,
}

impl GridStatistics {
    /// Look up a statistic by name: `"mean"`, `"dhi"` or `"dlo"`.
    pub fn get(&self, name: &str) -> Result<&Grid> {
        match name {
            "mean" => Ok(&self.mean),
            "dhi" => Ok(&self.dhi),
            "dlo" => Ok(&self.dlo),
            other => Err(GridError::invalid_argument(format!(
                "unknown statistic '{}', expected mean, dhi or dlo",
                other
            ))),
        }
    }
}

/// Statistics of one cell's layer values.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellStatistics {
    mean: f64,
    dhi: f64,
    dlo: f64,
}

impl Grid {
    /// Statistics with the default configuration.
    pub fn statistics(&self) -> Result<GridStatistics> {
        self.statistics_with(&GridEngineConfig::default())
    }

    /// Per-cell mean and spread across layers.
    ///
    /// Layers are refined by `config.statistics_refine_factor` first and each
    /// result is resized back to the shape of `self`.
    pub fn statistics_with(&self, config: &GridEngineConfig) -> Result<GridStatistics> {
        if !self.is_multigrid() {
            return Err(GridError::multi_only("statistics"));
        }
        config.validate().map_err(GridError::invalid_argument)?;

        let refined = self.refine_with(config.statistics_refine_factor, config.interpolation)?;
        let (rows, cols) = refined.shape().dims();
        let arrays = refined.arrays();
        let energetic = self.unit().is_decibel();

        let mut cells = Vec::with_capacity(rows * cols);
        let mut values = Vec::with_capacity(arrays.len());
        for index in 0..rows * cols {
            values.clear();
            values.extend(
                arrays
                    .iter()
                    .map(|a| a.as_slice()[index])
                    .filter(|v| !v.is_nan()),
            );
            cells.push(cell_statistics(&values, energetic, config.statistics_bounds));
        }

        let working = self.shape().clone();
        let to_grid = |pick: fn(&CellStatistics) -> f64| -> Result<Grid> {
            let array = LevelArray::from_fn(rows, cols, |r, c| pick(&cells[r * cols + c]));
            refined
                .derive_single(array, refined.shape().clone())
                .resize_with(&working, config.interpolation)
        };

        let statistics = GridStatistics {
            mean: to_grid(|s| s.mean)?,
            dhi: to_grid(|s| s.dhi)?,
            dlo: to_grid(|s| s.dlo)?,
        };

        debug!(
            layers = self.layer_count(),
            refine_factor = config.statistics_refine_factor,
            bounds = %config.statistics_bounds,
            "Computed grid statistics"
        );
        Ok(statistics)
    }
}

fn cell_statistics(values: &[f64], energetic: bool, bounds: BoundPolicy) -> CellStatistics {
    if values.is_empty() {
        return CellStatistics {
            mean: f64::NAN,
            dhi: f64::NAN,
            dlo: f64::NAN,
        };
    }

    let n = values.len() as f64;
    let mean = if energetic {
        energy_to_db(values.iter().map(|v| db_to_energy(*v)).sum::<f64>() / n)
    } else {
        values.iter().sum::<f64>() / n
    };

    let (hi, lo) = match bounds {
        BoundPolicy::Extremes => {
            let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
            // Rounding in the energy domain can push the mean just past a bound
            let mean = mean.clamp(lo, hi);
            return CellStatistics {
                mean,
                dhi: hi - mean,
                dlo: mean - lo,
            };
        }
        BoundPolicy::Confidence { z } => {
            let spread = z * sample_std(values);
            (mean + spread, mean - spread)
        }
    };

    CellStatistics {
        mean,
        dhi: hi - mean,
        dlo: mean - lo,
    }
}

/// Sample standard deviation; 0 for fewer than two values.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::Layers;
    use envira_parser::EnviraHeader;
    use noise_common::{GridShape, NoiseUnit};

    fn multigrid(levels: &[f64], unit: NoiseUnit) -> Grid {
        let shape = GridShape::new(0.0, 200.0, 0.0, 100.0, 3, 2).unwrap();
        let headers = levels
            .iter()
            .map(|_| EnviraHeader::for_shape(&shape, &unit))
            .collect();
        let arrays = levels
            .iter()
            .map(|l| LevelArray::from_fn(2, 3, |r, c| l + r as f64 + c as f64))
            .collect();
        Grid::new(Layers::Many(headers), Layers::Many(arrays), unit).unwrap()
    }

    #[test]
    fn test_cell_statistics_extremes() {
        let stats = cell_statistics(&[50.0, 60.0], true, BoundPolicy::Extremes);
        let mean = 10.0 * ((1e5 + 1e6) / 2.0f64).log10();
        assert!((stats.mean - mean).abs() < 1e-9);
        assert!((stats.dhi - (60.0 - mean)).abs() < 1e-9);
        assert!((stats.dlo - (mean - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cell_statistics_arithmetic_confidence() {
        let stats = cell_statistics(&[1.0, 2.0, 3.0], false, BoundPolicy::Confidence { z: 2.0 });
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.dhi - 2.0).abs() < 1e-12);
        assert!((stats.dlo - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cell_statistics_ignores_nan_only_cells() {
        let stats = cell_statistics(&[], true, BoundPolicy::Extremes);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_statistics_shapes_and_signs() {
        let grid = multigrid(&[50.0, 53.0, 55.0], NoiseUnit::Lden);
        let stats = grid.statistics().unwrap();

        for name in ["mean", "dhi", "dlo"] {
            let g = stats.get(name).unwrap();
            assert!(!g.is_multigrid());
            assert_eq!(g.shape(), grid.shape());
            assert_eq!(g.array().unwrap().shape(), (2, 3));
        }
        for (hi, lo) in stats
            .dhi
            .array()
            .unwrap()
            .as_slice()
            .iter()
            .zip(stats.dlo.array().unwrap().as_slice())
        {
            assert!(*hi >= 0.0 && *lo >= 0.0);
        }

        // Lattice point (0, 0): layers are 50, 53, 55
        let mean = stats.mean.array().unwrap().get(0, 0).unwrap();
        let expected = cell_statistics(&[50.0, 53.0, 55.0], true, BoundPolicy::Extremes);
        assert!((mean - expected.mean).abs() < 1e-9);
        assert!((stats.dhi.array().unwrap().get(0, 0).unwrap() - expected.dhi).abs() < 1e-9);
    }

    #[test]
    fn test_statistics_unknown_name() {
        let stats = multigrid(&[50.0, 51.0], NoiseUnit::Lden).statistics().unwrap();
        assert_eq!(stats.get("median").unwrap_err().kind(), ErrorKind::Value);
    }

    #[test]
    fn test_statistics_needs_multigrid() {
        let grid = multigrid(&[50.0], NoiseUnit::Lden).layer(0).unwrap();
        assert_eq!(grid.statistics().unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_statistics_rejects_invalid_config() {
        let grid = multigrid(&[50.0, 51.0], NoiseUnit::Lden);
        let config = GridEngineConfig {
            statistics_refine_factor: 0,
            ..Default::default()
        };
        assert_eq!(grid.statistics_with(&config).unwrap_err().kind(), ErrorKind::Value);
    }
}
