//! Error types for grid operations.

use std::path::PathBuf;

use envira_parser::EnviraError;
use thiserror::Error;

/// Broad category of a [`GridError`].
///
/// Callers that only need to know what went wrong in general terms (a
/// malformed file versus an unknown parameter versus a missing year) can
/// match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file is structurally malformed.
    Format,
    /// Reading or writing failed.
    Io,
    /// Layers of a multigrid disagree with each other.
    Structure,
    /// Header and array lists have different lengths.
    Index,
    /// The grid variant, unit or argument category does not fit the operation.
    Type,
    /// A parameter value is not recognised or out of range.
    Value,
    /// Requested years or tables do not exist.
    Lookup,
}

/// Errors that can occur during grid processing.
#[derive(Error, Debug)]
pub enum GridError {
    /// Envira file could not be decoded or encoded.
    #[error(transparent)]
    Envira(#[from] EnviraError),

    /// Survey dataset could not be read.
    #[error("invalid survey file {path}: {message}")]
    Survey { path: PathBuf, message: String },

    /// Filesystem error outside the codec.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Layers disagree on geometry or unit.
    #[error("inconsistent grid headers: {first} and {other} describe different grids ({detail})")]
    InconsistentHeaders {
        first: String,
        other: String,
        detail: String,
    },

    /// Headers agree but the arrays have different shapes.
    #[error("inconsistent grid data: {first} has shape {expected:?} but {other} has shape {found:?}")]
    InconsistentData {
        first: String,
        other: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Header and array lists of a multigrid differ in length.
    #[error("{headers} headers supplied for {arrays} arrays")]
    LayerCountMismatch { headers: usize, arrays: usize },

    /// One side is a list and the other a single item.
    #[error("headers and arrays must both be single items or both be lists (got {headers} headers, {arrays} arrays)")]
    LayerArityMismatch {
        headers: &'static str,
        arrays: &'static str,
    },

    /// Operation needs the other grid variant.
    #[error("{operation} requires a {expected}")]
    WrongVariant {
        operation: &'static str,
        expected: &'static str,
    },

    /// Operation needs a different noise unit.
    #[error("{operation} requires a {expected} grid, got {found}")]
    UnitMismatch {
        operation: &'static str,
        expected: String,
        found: String,
    },

    /// File name cannot be read as text.
    #[error("file name {0:?} is not valid UTF-8")]
    NonUtf8Name(PathBuf),

    /// Dose-effect relationship not known to the survey.
    #[error("unknown dose-effect relationship '{name}' for {effect}")]
    UnknownDoseEffect { name: String, effect: String },

    /// Argument outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File name pattern is not a valid regular expression.
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// No file in the directory matches the pattern.
    #[error("no files in {directory} match '{pattern}'")]
    NoMatchingFiles { directory: PathBuf, pattern: String },

    /// No meteotoeslag table exists for this method and unit.
    #[error("no meteotoeslag years for method '{method}' and unit '{unit}'")]
    UnknownYearTable { method: String, unit: String },

    /// Requested years have no layer in the grid.
    #[error("years {0:?} are not present in the grid")]
    MissingYears(Vec<u16>),

    /// A year was requested more than once.
    #[error("years {0:?} are requested more than once")]
    DuplicateYears(Vec<u16>),
}

impl GridError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Envira(EnviraError::IoError(_)) => ErrorKind::Io,
            Self::Envira(err) if matches!(err.root(), EnviraError::IoError(_)) => ErrorKind::Io,
            Self::Envira(_) | Self::Survey { .. } => ErrorKind::Format,
            Self::Io(_) => ErrorKind::Io,
            Self::InconsistentHeaders { .. } | Self::InconsistentData { .. } => {
                ErrorKind::Structure
            }
            Self::LayerCountMismatch { .. } => ErrorKind::Index,
            Self::LayerArityMismatch { .. }
            | Self::WrongVariant { .. }
            | Self::UnitMismatch { .. }
            | Self::NonUtf8Name(_) => ErrorKind::Type,
            Self::UnknownDoseEffect { .. }
            | Self::InvalidArgument(_)
            | Self::InvalidPattern { .. }
            | Self::NoMatchingFiles { .. } => ErrorKind::Value,
            Self::UnknownYearTable { .. } | Self::MissingYears(_) | Self::DuplicateYears(_) => {
                ErrorKind::Lookup
            }
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a WrongVariant error for an operation that needs a single grid.
    pub fn single_only(operation: &'static str) -> Self {
        Self::WrongVariant {
            operation,
            expected: "single grid",
        }
    }

    /// Create a WrongVariant error for an operation that needs a multigrid.
    pub fn multi_only(operation: &'static str) -> Self {
        Self::WrongVariant {
            operation,
            expected: "multigrid",
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
