//! Error types for Envira parsing operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for Envira parser operations.
pub type EnviraResult<T> = Result<T, EnviraError>;

/// Error types for Envira parsing.
#[derive(Error, Debug)]
pub enum EnviraError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised while decoding or encoding a specific file
    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<EnviraError>,
    },

    /// Required header field is absent
    #[error("missing required header field '{0}'")]
    MissingField(String),

    /// Header field present but unusable
    #[error("invalid value '{value}' for header field '{field}'")]
    InvalidField { field: String, value: String },

    /// Geometry field given more than once
    #[error("header field '{0}' is defined more than once")]
    DuplicateField(String),

    /// Header line that is neither a field nor a comment
    #[error("line {line}: malformed header line '{text}'")]
    MalformedLine { line: usize, text: String },

    /// Header geometry is self-contradictory
    #[error("inconsistent grid geometry: {0}")]
    InvalidGeometry(String),

    /// A data row has the wrong number of columns
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The number of data rows differs from the declared count
    #[error("expected {expected} data rows, found {found}")]
    RowCount { expected: usize, found: usize },

    /// A data token is not a number
    #[error("line {line}: '{token}' is not a number")]
    InvalidValue { line: usize, token: String },

    /// Array does not fit the header it is written with
    #[error("array shape {found:?} does not match header shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl EnviraError {
    /// Attach the file this error occurred in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // Already attributed
            Self::InFile { .. } => self,
            other => Self::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, without file attribution.
    pub fn root(&self) -> &EnviraError {
        match self {
            Self::InFile { source, .. } => source.root(),
            other => other,
        }
    }

    /// The file the error occurred in, if known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InFile { path, .. } => Some(path),
            _ => None,
        }
    }
}
