//! Common types shared across the noise grid workspace.

pub mod array;
pub mod error;
pub mod grid;
pub mod unit;

pub use array::LevelArray;
pub use error::{CommonError, CommonResult};
pub use grid::GridShape;
pub use unit::{db_to_energy, energy_to_db, NoiseUnit};
