//! Loading Envira files into single grids and multigrids.

use std::path::PathBuf;

use grid_engine::{ErrorKind, Grid, GridError, NoiseUnit};
use test_utils::{init_test_logging, require_test_file};

/// Directory holding the committed Schiphol test grids.
fn testdata_dir(sample: PathBuf) -> PathBuf {
    sample
        .parent()
        .map(|p| p.to_path_buf())
        .expect("test file has a parent directory")
}

// ============================================================================
// Single grids
// ============================================================================

#[test]
fn test_load_one_lnight() {
    init_test_logging();
    let path = require_test_file!("GP2018 - Lnight y2016.dat");

    let grid = Grid::load_one(&path).unwrap();
    assert!(!grid.is_multigrid());
    assert_eq!(grid.layer_count(), 1);
    assert_eq!(grid.unit(), &NoiseUnit::Lnight);

    let shape = grid.shape();
    assert_eq!(shape.dims(), (7, 9));
    assert_eq!(shape.x_min, 110000.0);
    assert_eq!(shape.y_max, 481000.0);
    assert_eq!(shape.x_step(), 500.0);

    // Peak in the middle of the lattice
    assert_eq!(grid.array().unwrap().get(3, 4), Some(58.0));
    assert_eq!(grid.years(), vec![Some(2016)]);
}

#[test]
fn test_load_one_keeps_extra_header_fields() {
    let path = require_test_file!("GP2018 - Lnight y2016.dat");

    let grid = Grid::load_one(&path).unwrap();
    assert_eq!(grid.header().get("scale"), Some("1.0"));
}

#[test]
fn test_to_envira_round_trip() {
    init_test_logging();
    let path = require_test_file!("GP2018 - Lnight y2016.dat");
    let grid = Grid::load_one(&path).unwrap();

    let dir = test_utils::temp_test_dir();
    let copy = dir.path().join("copy y2016.dat");
    grid.to_envira(&copy).unwrap();

    let reloaded = Grid::load_one(&copy).unwrap();
    assert_eq!(reloaded.shape(), grid.shape());
    assert_eq!(reloaded.unit(), grid.unit());
    assert_eq!(reloaded.array().unwrap(), grid.array().unwrap());
}

#[test]
fn test_load_one_missing_file_is_io_error() {
    let dir = test_utils::temp_test_dir();
    let err = Grid::load_one(dir.path().join("absent y2016.dat")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

// ============================================================================
// Multigrids
// ============================================================================

#[test]
fn test_load_many_two_years() {
    init_test_logging();
    let dir = testdata_dir(require_test_file!("GP2018 - Lnight y2016.dat"));

    let grid = Grid::load_many(&dir, r"GP2018 - Lnight y201[67]\.dat").unwrap();
    assert!(grid.is_multigrid());
    assert_eq!(grid.layer_count(), 2);
    assert_eq!(grid.unit(), &NoiseUnit::Lnight);
    assert_eq!(grid.years(), vec![Some(2016), Some(2017)]);

    let arrays = grid.arrays();
    let centre_2016 = arrays[0].get(3, 4).unwrap();
    let centre_2017 = arrays[1].get(3, 4).unwrap();
    assert!((centre_2017 - centre_2016 - 0.4).abs() < 1e-9);
}

#[test]
fn test_layer_matches_single_load() {
    let sample = require_test_file!("GP2018 - Lnight y2016.dat");
    let dir = testdata_dir(sample.clone());

    let multi = Grid::load_many(&dir, r"GP2018 - Lnight y201[67]\.dat").unwrap();
    let single = Grid::load_one(&sample).unwrap();

    let first = multi.layer(0).unwrap();
    assert!(!first.is_multigrid());
    assert_eq!(first.array().unwrap(), single.array().unwrap());
    assert_eq!(first.years(), vec![Some(2016)]);

    assert_eq!(multi.layer(2).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(single.layer(0).unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn test_load_many_rejects_different_lattice() {
    init_test_logging();
    let dir = testdata_dir(require_test_file!("GP2018 - Lnight y2016h.dat"));

    let err = Grid::load_many(&dir, r"GP2018 - Lnight y2016h?\.dat").unwrap_err();
    assert!(matches!(err, GridError::InconsistentHeaders { .. }), "{err}");
    assert_eq!(err.kind(), ErrorKind::Structure);
}

#[test]
fn test_load_many_truncated_file_is_format_error() {
    let dir = testdata_dir(require_test_file!("GP2018 - Lnight y2016r.dat"));

    let err = Grid::load_many(&dir, r"GP2018 - Lnight y2016r?\.dat").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_load_many_bad_number_is_format_error() {
    let dir = testdata_dir(require_test_file!("GP2018 - Lnight y2016e.dat"));

    let err = Grid::load_many(&dir, r"GP2018 - Lnight y2016e?\.dat").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("y2016e"), "{err}");
}

#[test]
fn test_load_many_no_match_and_bad_pattern() {
    let dir = testdata_dir(require_test_file!("GP2018 - Lnight y2016.dat"));

    let err = Grid::load_many(&dir, r"Lden y2099\.dat").unwrap_err();
    assert!(matches!(err, GridError::NoMatchingFiles { .. }));
    assert_eq!(err.kind(), ErrorKind::Value);

    let err = Grid::load_many(&dir, "y(20").unwrap_err();
    assert!(matches!(err, GridError::InvalidPattern { .. }));
}

#[test]
fn test_multigrid_rejects_single_grid_operations() {
    let dir = testdata_dir(require_test_file!("GP2018 - Lnight y2016.dat"));
    let grid = Grid::load_many(&dir, r"GP2018 - Lnight y201[67]\.dat").unwrap();

    assert_eq!(grid.array().unwrap_err().kind(), ErrorKind::Type);
    assert_eq!(grid.hg().unwrap_err().kind(), ErrorKind::Type);

    let out = test_utils::temp_test_dir();
    let err = grid.to_envira(out.path().join("multi.dat")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}
