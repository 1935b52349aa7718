//! Envira header block.
//!
//! The header is an ordered list of `key: value` fields and `#` comment
//! lines. Entries are kept in file order and verbatim (trimmed), so a header
//! survives a decode/encode round trip unchanged, including fields this crate
//! does not interpret.

use noise_common::{GridShape, NoiseUnit};

use crate::error::{EnviraError, EnviraResult};

/// Well-known header field names.
pub mod fields {
    pub const X_MIN: &str = "x_min";
    pub const X_MAX: &str = "x_max";
    pub const Y_MIN: &str = "y_min";
    pub const Y_MAX: &str = "y_max";
    pub const X_NUMBER: &str = "x_number";
    pub const Y_NUMBER: &str = "y_number";
    pub const X_STEP: &str = "x_step";
    pub const Y_STEP: &str = "y_step";
    pub const UNIT: &str = "unit";

    /// Fields that describe the lattice and may appear only once.
    pub const GEOMETRY: [&str; 8] = [X_MIN, X_MAX, Y_MIN, Y_MAX, X_NUMBER, Y_NUMBER, X_STEP, Y_STEP];
}

/// Relative tolerance when a bound and a step are both given.
const GEOMETRY_TOLERANCE: f64 = 1e-9;

/// One line of the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderEntry {
    Field { key: String, value: String },
    Comment(String),
}

/// Decoded header of an Envira grid file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnviraHeader {
    entries: Vec<HeaderEntry>,
}

impl EnviraHeader {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a header describing `shape` in `unit`, ready to be encoded.
    pub fn for_shape(shape: &GridShape, unit: &NoiseUnit) -> Self {
        let mut header = Self::new();
        header.set(fields::X_MIN, format_number(shape.x_min));
        header.set(fields::X_MAX, format_number(shape.x_max));
        header.set(fields::Y_MIN, format_number(shape.y_min));
        header.set(fields::Y_MAX, format_number(shape.y_max));
        header.set(fields::X_NUMBER, shape.x_number.to_string());
        header.set(fields::Y_NUMBER, shape.y_number.to_string());
        header.set(fields::UNIT, unit.as_str());
        header
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    /// Iterate over `(key, value)` fields in file order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            HeaderEntry::Field { key, value } => Some((key.as_str(), value.as_str())),
            HeaderEntry::Comment(_) => None,
        })
    }

    /// Iterate over comment lines in file order.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            HeaderEntry::Comment(text) => Some(text.as_str()),
            HeaderEntry::Field { .. } => None,
        })
    }

    /// Append a field, keeping any earlier field with the same key.
    pub fn push_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(HeaderEntry::Field {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Append a comment line.
    pub fn push_comment(&mut self, text: impl Into<String>) {
        self.entries.push(HeaderEntry::Comment(text.into()));
    }

    /// Value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Replace the value of the first field named `key`, or append it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for entry in &mut self.entries {
            if let HeaderEntry::Field { key: k, value: v } = entry {
                if k == key {
                    *v = value;
                    return;
                }
            }
        }
        self.push_field(key, value);
    }

    /// Check if a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of columns declared by the header.
    pub fn x_number(&self) -> EnviraResult<usize> {
        self.required(fields::X_NUMBER)
    }

    /// Number of rows declared by the header.
    pub fn y_number(&self) -> EnviraResult<usize> {
        self.required(fields::Y_NUMBER)
    }

    /// The unit the grid values are expressed in.
    pub fn unit(&self) -> EnviraResult<NoiseUnit> {
        self.get(fields::UNIT)
            .map(NoiseUnit::parse)
            .ok_or_else(|| EnviraError::MissingField(fields::UNIT.to_string()))
    }

    /// Decode the lattice geometry.
    ///
    /// Each axis needs its minimum and point count, plus the maximum, the
    /// step, or both. When both are given they must agree.
    pub fn shape(&self) -> EnviraResult<GridShape> {
        for key in fields::GEOMETRY {
            if self.fields().filter(|(k, _)| *k == key).count() > 1 {
                return Err(EnviraError::DuplicateField(key.to_string()));
            }
        }

        let x_number: usize = self.required(fields::X_NUMBER)?;
        let y_number: usize = self.required(fields::Y_NUMBER)?;
        let x_min: f64 = self.required(fields::X_MIN)?;
        let y_min: f64 = self.required(fields::Y_MIN)?;

        let x_max = self.axis_max("x", x_min, x_number, fields::X_MAX, fields::X_STEP)?;
        let y_max = self.axis_max("y", y_min, y_number, fields::Y_MAX, fields::Y_STEP)?;

        GridShape::new(x_min, x_max, y_min, y_max, x_number, y_number)
            .map_err(|e| EnviraError::InvalidGeometry(e.to_string()))
    }

    /// A copy of this header whose geometry fields describe `shape`.
    ///
    /// Step fields are rewritten only if the header already carries them;
    /// bounds are always written. All other entries are untouched.
    pub fn with_shape(&self, shape: &GridShape) -> EnviraHeader {
        let mut header = self.clone();
        header.set(fields::X_MIN, format_number(shape.x_min));
        header.set(fields::X_MAX, format_number(shape.x_max));
        header.set(fields::Y_MIN, format_number(shape.y_min));
        header.set(fields::Y_MAX, format_number(shape.y_max));
        header.set(fields::X_NUMBER, shape.x_number.to_string());
        header.set(fields::Y_NUMBER, shape.y_number.to_string());
        if header.contains(fields::X_STEP) {
            header.set(fields::X_STEP, format_number(shape.x_step()));
        }
        if header.contains(fields::Y_STEP) {
            header.set(fields::Y_STEP, format_number(shape.y_step()));
        }
        header
    }

    fn required<T: std::str::FromStr>(&self, key: &str) -> EnviraResult<T> {
        let value = self
            .get(key)
            .ok_or_else(|| EnviraError::MissingField(key.to_string()))?;
        self.parse_value(key, value)
    }

    fn optional<T: std::str::FromStr>(&self, key: &str) -> EnviraResult<Option<T>> {
        self.get(key)
            .map(|value| self.parse_value(key, value))
            .transpose()
    }

    fn parse_value<T: std::str::FromStr>(&self, key: &str, value: &str) -> EnviraResult<T> {
        value.parse().map_err(|_| EnviraError::InvalidField {
            field: key.to_string(),
            value: value.to_string(),
        })
    }

    fn axis_max(
        &self,
        axis: &str,
        min: f64,
        number: usize,
        max_key: &str,
        step_key: &str,
    ) -> EnviraResult<f64> {
        let max: Option<f64> = self.optional(max_key)?;
        let step: Option<f64> = self.optional(step_key)?;
        let from_step = step.map(|s| min + s * number.saturating_sub(1) as f64);

        match (max, from_step) {
            (Some(max), Some(derived)) => {
                let scale = max.abs().max(derived.abs()).max(1.0);
                if (max - derived).abs() > GEOMETRY_TOLERANCE * scale {
                    return Err(EnviraError::InvalidGeometry(format!(
                        "{} = {} but {} + {} x ({} - 1) = {}",
                        max_key,
                        max,
                        min,
                        step.unwrap_or_default(),
                        number,
                        derived
                    )));
                }
                Ok(max)
            }
            (Some(max), None) => Ok(max),
            (None, Some(derived)) => Ok(derived),
            (None, None) => Err(EnviraError::MissingField(format!(
                "{} or {} (extent of the {} axis)",
                max_key, step_key, axis
            ))),
        }
    }
}

/// Format a number the way the encoder writes it.
///
/// Uses the shortest representation that parses back to the same `f64`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}
