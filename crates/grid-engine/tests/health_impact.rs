//! Health impact estimates on the committed Schiphol sample grids.

use grid_engine::health::dose_effect::{DOC29_ANNOYANCE, GES2002_ANNOYANCE};
use grid_engine::{
    Diagnostic, DoseEffect, Effect, ErrorKind, Grid, GridError, SurveyDataset, SurveyRecord, Wbs,
};
use test_utils::fixtures::grid::GridSpec;
use test_utils::fixtures::survey::respondents_in;
use test_utils::{
    assert_approx_eq, init_test_logging, require_test_file, temp_test_dir, write_survey_json,
};

/// Lattice of the committed sample grids.
const SAMPLE: GridSpec = GridSpec {
    x_number: 9,
    y_number: 7,
    x_min: 110000.0,
    x_max: 114000.0,
    y_min: 478000.0,
    y_max: 481000.0,
};

fn sample_survey() -> (tempfile::TempDir, Wbs) {
    let dir = temp_test_dir();
    let path = write_survey_json(dir.path(), "wbs.json", &respondents_in(&SAMPLE, 1));
    let wbs = Wbs::read_file(path).unwrap();
    (dir, wbs)
}

fn weighted_total(wbs: &Wbs, levels: &[f64], curve: &dyn DoseEffect) -> f64 {
    levels
        .iter()
        .zip(wbs.records())
        .filter(|(level, _)| **level >= curve.lower_cutoff())
        .map(|(level, record)| curve.probability(*level) * record.weight)
        .sum()
}

#[test]
fn test_gehinderden_doc29_and_ges2002() {
    init_test_logging();
    let path = require_test_file!("MER2015 - Doc29 - Lden y1974.dat");
    let grid = Grid::load_one(path).unwrap();
    let (_dir, wbs) = sample_survey();

    let levels = grid.interpolate_at(&wbs).unwrap();
    assert_eq!(levels.len(), 48);
    assert!(levels.iter().all(|l| *l > 60.0 && *l < 72.0));

    let doc29 = grid.gehinderden(&wbs, "doc29", None).unwrap();
    assert_eq!(doc29.levels, levels);
    let expected = weighted_total(&wbs, &levels, &DOC29_ANNOYANCE);
    assert_approx_eq!(doc29.total, expected, 1e-9);
    assert!(doc29.total > 0.0 && doc29.total < wbs.population());

    let ges2002 = grid.gehinderden(&wbs, "ges2002", None).unwrap();
    let expected = weighted_total(&wbs, &levels, &GES2002_ANNOYANCE);
    assert_approx_eq!(ges2002.total, expected, 1e-9);
    assert_ne!(doc29.total, ges2002.total);
}

#[test]
fn test_gehinderden_flags_levels_above_max_db() {
    init_test_logging();
    let path = require_test_file!("MER2015 - Doc29 - Lden y1974.dat");
    let grid = Grid::load_one(path).unwrap();
    let (_dir, wbs) = sample_survey();

    let bounded = grid.gehinderden(&wbs, "doc29", Some(65.0)).unwrap();
    let unbounded = grid.gehinderden(&wbs, "doc29", None).unwrap();

    // The diagnostic does not change the estimate
    assert_eq!(bounded.total, unbounded.total);
    assert!(bounded.was_extrapolated());
    assert_eq!(bounded.diagnostics.len(), 1);

    let above = bounded.levels.iter().filter(|l| **l > 65.0).count();
    match &bounded.diagnostics[0] {
        Diagnostic::Extrapolation {
            relationship,
            points,
            highest_level,
            ..
        } => {
            assert_eq!(relationship, "doc29");
            assert_eq!(*points, above);
            assert!(*highest_level > 65.0 && *highest_level < 72.0);
        }
    }

    let generous = grid.gehinderden(&wbs, "doc29", Some(80.0)).unwrap();
    assert!(!generous.was_extrapolated());
}

#[test]
fn test_slaapverstoorden_on_lnight_grid() {
    init_test_logging();
    let path = require_test_file!("GP2018 - Lnight y2016.dat");
    let grid = Grid::load_one(path).unwrap();
    let (_dir, wbs) = sample_survey();

    let impact = grid.slaapverstoorden(&wbs, "doc29", Some(50.0)).unwrap();
    assert!(impact.total > 0.0);
    assert!(impact.was_extrapolated());

    let err = grid.gehinderden(&wbs, "doc29", None).unwrap_err();
    assert!(matches!(err, GridError::UnitMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_unknown_relationship_is_value_error() {
    let path = require_test_file!("MER2015 - Doc29 - Lden y1974.dat");
    let grid = Grid::load_one(path).unwrap();
    let (_dir, wbs) = sample_survey();

    let err = grid.gehinderden(&wbs, "random123", None).unwrap_err();
    assert!(matches!(err, GridError::UnknownDoseEffect { .. }));
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_points_outside_grid_contribute_nothing() {
    let path = require_test_file!("MER2015 - Doc29 - Lden y1974.dat");
    let grid = Grid::load_one(path).unwrap();

    let dir = temp_test_dir();
    let inside = (112000.0, 479500.0, 10.0);
    let outside = (90000.0, 479500.0, 1000.0);
    let wbs = Wbs::read_file(write_survey_json(dir.path(), "wbs.json", &[inside, outside])).unwrap();
    let only_inside = Wbs::read_file(write_survey_json(dir.path(), "in.json", &[inside])).unwrap();

    let impact = grid.gehinderden(&wbs, "doc29", None).unwrap();
    assert!(impact.levels[1].is_nan());
    let reference = grid.gehinderden(&only_inside, "doc29", None).unwrap();
    assert_approx_eq!(impact.total, reference.total, 1e-12);
}

/// A survey that is not backed by a file.
struct Household {
    records: Vec<SurveyRecord>,
}

impl SurveyDataset for Household {
    fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    fn dose_effect(&self, name: &str, effect: Effect) -> Option<&dyn DoseEffect> {
        match (name, effect) {
            ("doc29", Effect::Annoyance) => Some(&DOC29_ANNOYANCE),
            _ => None,
        }
    }
}

#[test]
fn test_custom_survey_dataset() {
    let path = require_test_file!("MER2015 - Doc29 - Lden y1974.dat");
    let grid = Grid::load_one(path).unwrap();

    // On the peak lattice point
    let household = Household {
        records: vec![SurveyRecord {
            x: 112000.0,
            y: 479500.0,
            weight: 2.0,
        }],
    };
    let impact = grid.gehinderden(&household, "doc29", None).unwrap();
    assert_eq!(impact.levels, vec![72.0]);
    assert!((impact.total - 2.0 * DOC29_ANNOYANCE.probability(72.0)).abs() < 1e-12);

    let err = grid.gehinderden(&household, "ges2002", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
}
