//! Meteotoeslag: the weather-corrected composite of a multi-year grid.
//!
//! Out of the 1971-2010 reference period, a fixed set of 32 years is selected
//! per calculation method and noise unit. The composite is the energetic mean
//! of the grids of those years.

use std::collections::{BTreeSet, HashMap};

use noise_common::{db_to_energy, energy_to_db, LevelArray, NoiseUnit};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GridError, Result};
use crate::grid::Grid;

/// How the meteorological year selection was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeteoMethod {
    Empirisch,
    Hybride,
}

impl MeteoMethod {
    /// Parse a method name (exact, case-sensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "empirisch" => Some(Self::Empirisch),
            "hybride" => Some(Self::Hybride),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empirisch => "empirisch",
            Self::Hybride => "hybride",
        }
    }
}

/// Noise units that have a year table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeteoUnit {
    Lden,
    Lnight,
}

impl MeteoUnit {
    /// Parse a unit name (exact, case-sensitive).
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_unit(&NoiseUnit::parse(name))
    }

    /// The table unit for a grid unit, if there is one.
    pub fn from_unit(unit: &NoiseUnit) -> Option<Self> {
        match unit {
            NoiseUnit::Lden => Some(Self::Lden),
            NoiseUnit::Lnight => Some(Self::Lnight),
            NoiseUnit::Other(_) => None,
        }
    }
}

/// Key of a year table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeteoKey {
    pub method: MeteoMethod,
    pub unit: MeteoUnit,
}

const EMPIRISCH_LDEN: [u16; 32] = [
    1971, 1973, 1974, 1975, 1977, 1978, 1979, 1980, 1982, 1983, 1984, 1985, 1986, 1987, 1988,
    1989, 1991, 1992, 1993, 1995, 1997, 1998, 1999, 2001, 2002, 2004, 2005, 2006, 2007, 2008,
    2009, 2010,
];

const EMPIRISCH_LNIGHT: [u16; 32] = [
    1971, 1972, 1974, 1975, 1976, 1977, 1978, 1980, 1981, 1982, 1983, 1984, 1986, 1987, 1988,
    1990, 1991, 1992, 1993, 1997, 1998, 1999, 2000, 2001, 2003, 2004, 2005, 2006, 2007, 2008,
    2009, 2010,
];

const HYBRIDE_LDEN: [u16; 32] = [
    1971, 1972, 1973, 1974, 1975, 1976, 1977, 1978, 1979, 1980, 1982, 1983, 1985, 1986, 1987,
    1988, 1989, 1990, 1991, 1992, 1995, 1997, 1998, 1999, 2001, 2003, 2004, 2005, 2006, 2007,
    2008, 2009,
];

const HYBRIDE_LNIGHT: [u16; 32] = [
    1971, 1972, 1974, 1975, 1977, 1978, 1979, 1981, 1982, 1983, 1984, 1985, 1986, 1988, 1989,
    1990, 1991, 1992, 1993, 1997, 1998, 1999, 2000, 2001, 2002, 2003, 2004, 2005, 2006, 2007,
    2008, 2009,
];

impl MeteoKey {
    /// The sorted selection of years for this method and unit.
    pub fn years(&self) -> &'static [u16] {
        match (self.method, self.unit) {
            (MeteoMethod::Empirisch, MeteoUnit::Lden) => &EMPIRISCH_LDEN,
            (MeteoMethod::Empirisch, MeteoUnit::Lnight) => &EMPIRISCH_LNIGHT,
            (MeteoMethod::Hybride, MeteoUnit::Lden) => &HYBRIDE_LDEN,
            (MeteoMethod::Hybride, MeteoUnit::Lnight) => &HYBRIDE_LNIGHT,
        }
    }
}

/// Look up the years for a method and unit by name.
///
/// Names are exact: `"empirisch"` or `"hybride"`, and `"Lden"` or
/// `"Lnight"`.
pub fn meteotoeslag_years(method: &str, unit: &str) -> Result<&'static [u16]> {
    let unknown = || GridError::UnknownYearTable {
        method: method.to_string(),
        unit: unit.to_string(),
    };
    let method = MeteoMethod::parse(method).ok_or_else(unknown)?;
    let unit = MeteoUnit::parse(unit).ok_or_else(unknown)?;
    Ok(MeteoKey { method, unit }.years())
}

/// A meteotoeslag composite and the years it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteotoeslag {
    pub array: LevelArray,
    pub years: Vec<u16>,
}

impl Grid {
    /// Composite over the year table of `method` for this grid's unit.
    pub fn meteotoeslag_from_method(&self, method: &str) -> Result<Meteotoeslag> {
        if !self.is_multigrid() {
            return Err(GridError::multi_only("meteotoeslag"));
        }
        let years = meteotoeslag_years(method, self.unit().as_str())?;
        self.meteotoeslag_from_years(years)
    }

    /// Composite over an explicit set of years.
    ///
    /// Every year must be present exactly once among the layer years.
    pub fn meteotoeslag_from_years(&self, years: &[u16]) -> Result<Meteotoeslag> {
        if !self.is_multigrid() {
            return Err(GridError::multi_only("meteotoeslag"));
        }
        if years.is_empty() {
            return Err(GridError::invalid_argument(
                "meteotoeslag needs at least one year",
            ));
        }

        let mut seen = BTreeSet::new();
        let duplicates: BTreeSet<u16> = years
            .iter()
            .copied()
            .filter(|y| !seen.insert(*y))
            .collect();
        if !duplicates.is_empty() {
            return Err(GridError::DuplicateYears(duplicates.into_iter().collect()));
        }

        // First layer wins when two files carry the same year
        let mut by_year: HashMap<u16, usize> = HashMap::new();
        for (index, year) in self.years().into_iter().enumerate() {
            if let Some(year) = year {
                by_year.entry(year).or_insert(index);
            }
        }

        let missing: Vec<u16> = years
            .iter()
            .copied()
            .filter(|y| !by_year.contains_key(y))
            .collect();
        if !missing.is_empty() {
            return Err(GridError::MissingYears(missing));
        }

        let arrays = self.arrays();
        let selected: Vec<&LevelArray> = years.iter().map(|y| &arrays[by_year[y]]).collect();
        let array = energetic_mean(&selected);

        info!(
            years = years.len(),
            unit = %self.unit(),
            "Computed meteotoeslag"
        );
        Ok(Meteotoeslag {
            array,
            years: years.to_vec(),
        })
    }
}

/// Per-cell `10·log10(mean(10^(L/10)))` over same-shaped arrays.
pub(crate) fn energetic_mean(arrays: &[&LevelArray]) -> LevelArray {
    let (rows, cols) = arrays[0].shape();
    let n = arrays.len() as f64;
    let mut energy = vec![0.0; rows * cols];
    for array in arrays {
        for (acc, level) in energy.iter_mut().zip(array.as_slice()) {
            *acc += db_to_energy(*level);
        }
    }
    LevelArray::from_fn(rows, cols, |row, col| {
        energy_to_db(energy[row * cols + col] / n)
    })
}
