//! Aircraft Noise Grid Engine
//!
//! This crate turns Envira noise grids into the figures used in noise impact
//! reports:
//!
//! - **Multigrids**: one layer per meteorological year, loaded from a
//!   directory and checked for a shared geometry
//! - **Meteotoeslag**: the energetic mean over a fixed 32-year selection
//! - **Statistics**: per-cell mean and spread across years
//! - **Resampling**: refining and resizing lattices
//! - **Health impact**: severely annoyed and sleep-disturbed people from a
//!   survey dataset
//!
//! # Architecture
//!
//! ```text
//! Envira files (one per year)
//!      │
//!      ▼
//! Grid::load_many(dir, pattern)
//!      │
//!      ├─► meteotoeslag_from_method("hybride") ─► Meteotoeslag
//!      │
//!      ├─► statistics() ─► refine ─► mean/dhi/dlo ─► resize back
//!      │
//!      └─► layer(i) / load_one(path)
//!               │
//!               ├─► hg(), scale()
//!               │
//!               └─► gehinderden(&wbs, "doc29", Some(65.0)) ─► HealthImpact
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_engine::{Grid, Wbs};
//!
//! let years = Grid::load_many("grids/", r"MER2015 - Doc29 - Lden y\d{4}\.dat")?;
//! let composite = years.meteotoeslag_from_method("hybride")?;
//!
//! let grid = Grid::load_one("grids/MER2015 - Doc29 - Lden y1974.dat")?;
//! let wbs = Wbs::read_file("wbs2005.json")?;
//! let impact = grid.gehinderden(&wbs, "doc29", Some(65.0))?;
//! println!("{:.0} severely annoyed", impact.total);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod health;
pub mod interpolation;
pub mod loader;
pub mod meteotoeslag;
pub mod reduction;
pub mod resample;
pub mod statistics;
pub mod types;

// Re-export commonly used types at crate root
pub use config::GridEngineConfig;
pub use error::{ErrorKind, GridError, Result};
pub use grid::{Grid, GridLayers};
pub use health::{
    Diagnostic, DoseEffect, Effect, HealthImpact, SurveyDataset, SurveyRecord, Wbs,
};
pub use interpolation::{bilinear_interpolate, cubic_interpolate, nearest_interpolate};
pub use loader::{extract_year, extract_year_from_path};
pub use meteotoeslag::{meteotoeslag_years, MeteoKey, MeteoMethod, MeteoUnit, Meteotoeslag};
pub use resample::{refined_count, resample_array};
pub use statistics::GridStatistics;
pub use types::{BoundPolicy, InterpolationMethod, Layers};

pub use envira_parser::EnviraHeader;
pub use noise_common::{GridShape, LevelArray, NoiseUnit};
