//! Test data generators for creating synthetic noise grids.
//!
//! These generators create predictable, verifiable test data patterns
//! and write them in the Envira text layout, so tests do not depend on
//! production grid exports.

use std::path::{Path, PathBuf};

use crate::fixtures::grid::GridSpec;

/// Creates a noise field that decays away from the lattice centre.
///
/// The level is `peak_db + offset_db` at the centre and falls off
/// logarithmically with distance, like a point source. Values are returned
/// row-major with row 0 at `y_min`.
///
/// # Example
///
/// ```
/// use test_utils::{noise_field, fixtures::grid::SMALL};
///
/// let field = noise_field(&SMALL, 60.0, 0.0);
/// assert_eq!(field.len(), 20);
/// assert!(field.iter().all(|v| *v <= 60.0));
/// ```
pub fn noise_field(spec: &GridSpec, peak_db: f64, offset_db: f64) -> Vec<f64> {
    let (cx, cy) = spec.center();
    let (dx, dy) = spec.step();
    let reference = dx.max(dy).max(1.0);

    let mut data = Vec::with_capacity(spec.size());
    for row in 0..spec.y_number {
        for col in 0..spec.x_number {
            let x = spec.x_min + col as f64 * dx;
            let y = spec.y_min + row as f64 * dy;
            let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            data.push(peak_db + offset_db - 15.0 * (1.0 + distance / reference).log10());
        }
    }
    data
}

/// Deterministic per-year level offset in `[-1, 1]` dB.
///
/// Lets multigrid tests tell the layers apart without randomness.
pub fn year_offset(year: u16) -> f64 {
    (year as i64 * 37 % 17) as f64 / 8.0 - 1.0
}

/// Renders a lattice and its values in the Envira text layout.
pub fn envira_text(spec: &GridSpec, unit: &str, values: &[f64], comment: &str) -> String {
    let mut text = format!(
        "# {}\nx_min: {}\nx_max: {}\ny_min: {}\ny_max: {}\nx_number: {}\ny_number: {}\nunit: {}\n",
        comment,
        spec.x_min,
        spec.x_max,
        spec.y_min,
        spec.y_max,
        spec.x_number,
        spec.y_number,
        unit
    );
    for row in values.chunks(spec.x_number.max(1)) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

/// Writes a single Envira grid file and returns its path.
pub fn write_envira_grid(
    dir: &Path,
    file_name: &str,
    spec: &GridSpec,
    unit: &str,
    values: &[f64],
) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, envira_text(spec, unit, values, file_name))
        .expect("Failed to write Envira test grid");
    path
}

/// Writes one grid per year named `"{prefix} y{year}.dat"`.
///
/// Each year's field is `noise_field(spec, peak_db, year_offset(year))`.
pub fn write_year_series(
    dir: &Path,
    prefix: &str,
    unit: &str,
    spec: &GridSpec,
    years: &[u16],
    peak_db: f64,
) -> Vec<PathBuf> {
    years
        .iter()
        .map(|&year| {
            let values = noise_field(spec, peak_db, year_offset(year));
            write_envira_grid(dir, &format!("{} y{}.dat", prefix, year), spec, unit, &values)
        })
        .collect()
}

/// Writes a survey file with `(x, y, weight)` respondents.
pub fn write_survey_json(dir: &Path, file_name: &str, records: &[(f64, f64, f64)]) -> PathBuf {
    let records: Vec<serde_json::Value> = records
        .iter()
        .map(|(x, y, weight)| serde_json::json!({ "x": x, "y": y, "weight": weight }))
        .collect();
    let document = serde_json::json!({ "records": records });

    let path = dir.join(file_name);
    std::fs::write(&path, document.to_string()).expect("Failed to write survey test file");
    path
}
