//! Noise metrics and decibel arithmetic.

use serde::{Deserialize, Serialize};

/// The metric a grid's values are expressed in.
///
/// Names are matched exactly: `"Lden"` and `"Lnight"` are the two aircraft
/// noise metrics, anything else is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseUnit {
    /// Day-evening-night level.
    Lden,
    /// Night-only level.
    Lnight,
    Other(String),
}

impl NoiseUnit {
    /// Parse a unit name (case-sensitive).
    pub fn parse(name: &str) -> Self {
        match name {
            "Lden" => Self::Lden,
            "Lnight" => Self::Lnight,
            other => Self::Other(other.to_string()),
        }
    }

    /// The unit name as written in grid files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lden => "Lden",
            Self::Lnight => "Lnight",
            Self::Other(name) => name,
        }
    }

    /// Whether values are decibels and must be averaged energetically.
    pub fn is_decibel(&self) -> bool {
        matches!(self, Self::Lden | Self::Lnight)
    }
}

impl std::fmt::Display for NoiseUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a level in dB to relative acoustic energy.
#[inline]
pub fn db_to_energy(level: f64) -> f64 {
    10f64.powf(level / 10.0)
}

/// Convert relative acoustic energy back to a level in dB.
#[inline]
pub fn energy_to_db(energy: f64) -> f64 {
    10.0 * energy.log10()
}
