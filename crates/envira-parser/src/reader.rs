//! Decoding of Envira grid files.

use std::path::Path;

use noise_common::LevelArray;
use tracing::debug;

use crate::error::{EnviraError, EnviraResult};
use crate::header::EnviraHeader;

/// Read and decode an Envira grid file.
///
/// Errors are attributed to `path` (see [`EnviraError::path`]).
pub fn decode<P: AsRef<Path>>(path: P) -> EnviraResult<(EnviraHeader, LevelArray)> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| EnviraError::from(e).in_file(path))?;
    let decoded = decode_str(&text).map_err(|e| e.in_file(path))?;

    debug!(
        path = %path.display(),
        rows = decoded.1.rows(),
        cols = decoded.1.cols(),
        "Decoded Envira grid"
    );
    Ok(decoded)
}

/// Decode an Envira grid held in memory.
pub fn decode_str(text: &str) -> EnviraResult<(EnviraHeader, LevelArray)> {
    let mut header = EnviraHeader::new();
    let mut lines = text.lines().enumerate().peekable();

    // Header block: fields and comments up to the first data line
    while let Some(&(index, line)) = lines.peek() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            lines.next();
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            header.push_comment(comment.trim());
            lines.next();
            continue;
        }
        match trimmed.split_once(':') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    return Err(EnviraError::MalformedLine {
                        line: index + 1,
                        text: trimmed.to_string(),
                    });
                }
                header.push_field(key, value.trim());
                lines.next();
            }
            None => break,
        }
    }

    let shape = header.shape()?;
    // Unit is required even though the lattice does not need it
    header.unit()?;

    let (rows, cols) = shape.dims();
    let mut data = Vec::with_capacity(rows * cols);
    let mut found_rows = 0;

    for (index, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let start = data.len();
        for token in trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token.parse().map_err(|_| EnviraError::InvalidValue {
                line: index + 1,
                token: token.to_string(),
            })?;
            data.push(value);
        }

        let found = data.len() - start;
        if found != cols {
            return Err(EnviraError::ColumnCount {
                line: index + 1,
                expected: cols,
                found,
            });
        }
        found_rows += 1;
    }

    if found_rows != rows {
        return Err(EnviraError::RowCount {
            expected: rows,
            found: found_rows,
        });
    }

    let array = LevelArray::new(data, rows, cols)
        .map_err(|e| EnviraError::InvalidGeometry(e.to_string()))?;
    Ok((header, array))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
# MER2015 - Doc29
x_min: 0
x_max: 20
y_min : 100
y_max: 110
x_number: 3
y_number: 2
unit: Lden
scale: 1.0
40.5 41 42
43 44.25 45
";

    #[test]
    fn test_decode_small() {
        let (header, array) = decode_str(SMALL).unwrap();

        assert_eq!(array.shape(), (2, 3));
        assert_eq!(array.get(0, 0), Some(40.5));
        assert_eq!(array.get(1, 1), Some(44.25));
        assert_eq!(header.get("y_min"), Some("100"));
        assert_eq!(header.get("scale"), Some("1.0"));
        assert_eq!(header.comments().next(), Some("MER2015 - Doc29"));
    }

    #[test]
    fn test_comma_delimited_rows() {
        let text = SMALL.replace("40.5 41 42", "40.5, 41, 42");
        let (_, array) = decode_str(&text).unwrap();
        assert_eq!(array.row(0), Some(&[40.5, 41.0, 42.0][..]));
    }

    #[test]
    fn test_missing_row() {
        let text = SMALL.replace("43 44.25 45\n", "");
        assert!(matches!(
            decode_str(&text),
            Err(EnviraError::RowCount {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_extra_row() {
        let text = format!("{}46 47 48\n", SMALL);
        assert!(matches!(
            decode_str(&text),
            Err(EnviraError::RowCount {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_short_row() {
        let text = SMALL.replace("43 44.25 45", "43 44.25");
        assert!(matches!(
            decode_str(&text),
            Err(EnviraError::ColumnCount {
                line: 11,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_bad_value() {
        let text = SMALL.replace("44.25", "loud");
        assert!(matches!(
            decode_str(&text),
            Err(EnviraError::InvalidValue { token, .. }) if token == "loud"
        ));
    }

    #[test]
    fn test_missing_unit() {
        let text = SMALL.replace("unit: Lden\n", "");
        assert!(matches!(
            decode_str(&text),
            Err(EnviraError::MissingField(f)) if f == "unit"
        ));
    }

    #[test]
    fn test_empty_key_is_malformed() {
        let text = SMALL.replace("scale: 1.0", ": 1.0");
        assert!(matches!(
            decode_str(&text),
            Err(EnviraError::MalformedLine { line: 9, .. })
        ));
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode("/nonexistent/grid.dat").unwrap_err();
        assert!(matches!(err.root(), EnviraError::IoError(_)));
        assert!(err.to_string().starts_with("/nonexistent/grid.dat"));
    }
}
