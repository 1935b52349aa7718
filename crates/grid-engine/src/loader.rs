//! Loading grids from Envira files and reading years from file names.

use std::path::{Path, PathBuf};

use envira_parser::{EnviraHeader, EnviraResult};
use noise_common::LevelArray;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::GridEngineConfig;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::types::Layers;

static YEAR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"y([0-9]{4})").expect("valid year pattern"));

/// Read the year from a file name.
///
/// The year is the four digits after the first `y` that is directly followed
/// by at least four digits. Extra digits are ignored.
///
/// ```
/// use grid_engine::extract_year;
///
/// assert_eq!(extract_year("GP2018 - Lnight y2016.dat"), Some(2016));
/// assert_eq!(extract_year("Test for y12345.dat"), Some(1234));
/// assert_eq!(extract_year("1234"), None);
/// ```
pub fn extract_year(name: &str) -> Option<u16> {
    YEAR_MARKER
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Read the year from the file name of `path`.
///
/// Fails when the file name is not valid UTF-8.
pub fn extract_year_from_path(path: &Path) -> Result<Option<u16>> {
    match path.file_name() {
        None => Ok(None),
        Some(name) => name
            .to_str()
            .map(extract_year)
            .ok_or_else(|| GridError::NonUtf8Name(path.to_path_buf())),
    }
}

impl Grid {
    /// Load a single grid from an Envira file.
    pub fn load_one<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (header, array) = envira_parser::decode(path)?;
        let unit = header.unit()?;

        let grid = Grid::new(Layers::One(header), Layers::One(array), unit)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        grid.with_sources(vec![name])
    }

    /// Load every file in `directory` whose name matches `pattern` as one
    /// multigrid.
    ///
    /// Only the directory itself is listed (no recursion). Files are taken in
    /// file-name order and the regex may match anywhere in the name.
    pub fn load_many<P: AsRef<Path>>(directory: P, pattern: &str) -> Result<Self> {
        Self::load_many_with(directory, pattern, &GridEngineConfig::default())
    }

    /// [`Grid::load_many`] with explicit configuration.
    pub fn load_many_with<P: AsRef<Path>>(
        directory: P,
        pattern: &str,
        config: &GridEngineConfig,
    ) -> Result<Self> {
        let directory = directory.as_ref();
        let regex = Regex::new(pattern).map_err(|e| GridError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let matches = list_matching(directory, &regex)?;
        if matches.is_empty() {
            return Err(GridError::NoMatchingFiles {
                directory: directory.to_path_buf(),
                pattern: pattern.to_string(),
            });
        }
        debug!(
            directory = %directory.display(),
            pattern,
            count = matches.len(),
            "Matched grid files"
        );

        let decode = |(path, _): &(PathBuf, String)| envira_parser::decode(path);
        let decoded: Vec<EnviraResult<(EnviraHeader, LevelArray)>> = if config.parallel_decode {
            matches.par_iter().map(decode).collect()
        } else {
            matches.iter().map(decode).collect()
        };

        let mut headers = Vec::with_capacity(decoded.len());
        let mut arrays = Vec::with_capacity(decoded.len());
        for result in decoded {
            let (header, array) = result?;
            headers.push(header);
            arrays.push(array);
        }

        let unit = headers[0].unit()?;
        let names: Vec<String> = matches.into_iter().map(|(_, name)| name).collect();
        let grid = Grid::multi(names.clone(), headers, arrays, unit, Some(names))?;

        info!(
            directory = %directory.display(),
            layers = grid.layer_count(),
            unit = %grid.unit(),
            shape = %grid.shape(),
            "Loaded multigrid"
        );
        Ok(grid)
    }
}

/// Files directly inside `directory` whose names match, sorted by name.
fn list_matching(directory: &Path, regex: &Regex) -> Result<Vec<(PathBuf, String)>> {
    let mut matches = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        // Symlinked grid files count; directories do not
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if regex.is_match(&name) {
            matches.push((entry.into_path(), name));
        }
    }
    Ok(matches)
}
