//! Encoding of Envira grid files.

use std::fmt::Write as _;
use std::path::Path;

use noise_common::LevelArray;
use tracing::debug;

use crate::error::{EnviraError, EnviraResult};
use crate::header::{format_number, EnviraHeader, HeaderEntry};

/// Write a header and array as an Envira grid file.
///
/// The output decodes back to an equal header and array.
pub fn encode<P: AsRef<Path>>(
    header: &EnviraHeader,
    array: &LevelArray,
    path: P,
) -> EnviraResult<()> {
    let path = path.as_ref();
    let text = encode_to_string(header, array).map_err(|e| e.in_file(path))?;
    std::fs::write(path, text).map_err(|e| EnviraError::from(e).in_file(path))?;

    debug!(
        path = %path.display(),
        rows = array.rows(),
        cols = array.cols(),
        "Encoded Envira grid"
    );
    Ok(())
}

/// Render a header and array in the Envira text layout.
pub fn encode_to_string(header: &EnviraHeader, array: &LevelArray) -> EnviraResult<String> {
    let expected = header.shape()?.dims();
    if array.shape() != expected {
        return Err(EnviraError::ShapeMismatch {
            expected,
            found: array.shape(),
        });
    }

    let mut out = String::with_capacity(array.len() * 8 + 256);
    for entry in header.entries() {
        // Writing to a String cannot fail
        let _ = match entry {
            HeaderEntry::Comment(text) => writeln!(out, "# {}", text),
            HeaderEntry::Field { key, value } => writeln!(out, "{}: {}", key, value),
        };
    }

    for row in array.iter_rows() {
        let line: Vec<String> = row.iter().map(|&v| format_number(v)).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    Ok(out)
}
