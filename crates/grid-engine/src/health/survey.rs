//! Survey datasets: where people live and which dose-effect curves apply.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dose_effect::{builtin_relationships, DoseEffect, Effect};
use crate::error::{GridError, Result};

/// One respondent location, weighted by the number of people it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

/// Population points and dose-effect relationships for health estimates.
pub trait SurveyDataset {
    /// Respondent records, in a stable order.
    fn records(&self) -> &[SurveyRecord];

    /// The relationship `name` for `effect`, if known.
    fn dose_effect(&self, name: &str, effect: Effect) -> Option<&dyn DoseEffect>;
}

#[derive(Deserialize)]
struct WbsDocument {
    records: Vec<SurveyRecord>,
}

/// A survey dataset ("woningbestand") read from JSON.
///
/// The document holds `{"records": [{"x": .., "y": .., "weight": ..}, ..]}`.
/// The Doc29 and GES 2002 relationships are registered for both effects.
#[derive(Debug)]
pub struct Wbs {
    records: Vec<SurveyRecord>,
    relationships: HashMap<(String, Effect), Box<dyn DoseEffect>>,
}

impl Wbs {
    /// Read a survey from a JSON file.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let document: WbsDocument =
            serde_json::from_str(&text).map_err(|e| GridError::Survey {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some((index, record)) = document
            .records
            .iter()
            .enumerate()
            .find(|(_, r)| !valid_record(r))
        {
            return Err(GridError::Survey {
                path: path.to_path_buf(),
                message: format!(
                    "record {} has an invalid position or weight: {:?}",
                    index, record
                ),
            });
        }

        debug!(
            path = %path.display(),
            records = document.records.len(),
            "Read survey dataset"
        );
        Ok(Self::from_records(document.records))
    }

    /// Build a survey from records held in memory.
    pub fn from_records(records: Vec<SurveyRecord>) -> Self {
        let relationships = builtin_relationships()
            .into_iter()
            .map(|(name, effect, curve)| ((name.to_string(), effect), curve))
            .collect();
        Self {
            records,
            relationships,
        }
    }

    /// Register (or replace) a relationship.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        effect: Effect,
        curve: Box<dyn DoseEffect>,
    ) {
        self.relationships.insert((name.into(), effect), curve);
    }

    /// Total weight of all records.
    pub fn population(&self) -> f64 {
        self.records.iter().map(|r| r.weight).sum()
    }
}

impl SurveyDataset for Wbs {
    fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    fn dose_effect(&self, name: &str, effect: Effect) -> Option<&dyn DoseEffect> {
        self.relationships
            .get(&(name.to_string(), effect))
            .map(|curve| curve.as_ref())
    }
}

fn valid_record(record: &SurveyRecord) -> bool {
    record.x.is_finite()
        && record.y.is_finite()
        && record.weight.is_finite()
        && record.weight >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_utils::{temp_test_dir, write_survey_json};

    #[test]
    fn test_read_file() {
        let dir = temp_test_dir();
        let path = write_survey_json(dir.path(), "wbs.json", &[(1.0, 2.0, 3.0), (4.0, 5.0, 0.5)]);

        let wbs = Wbs::read_file(&path).unwrap();
        assert_eq!(wbs.records().len(), 2);
        assert_eq!(wbs.records()[1], SurveyRecord { x: 4.0, y: 5.0, weight: 0.5 });
        assert!((wbs.population() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_read_file_errors() {
        let dir = temp_test_dir();

        let missing = Wbs::read_file(dir.path().join("missing.json")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Io);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{\"records\": [{\"x\": 1.0}]}").unwrap();
        assert_eq!(Wbs::read_file(&bad).unwrap_err().kind(), ErrorKind::Format);

        let negative = write_survey_json(dir.path(), "negative.json", &[(1.0, 2.0, -1.0)]);
        assert_eq!(Wbs::read_file(&negative).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_builtin_relationships_registered() {
        let wbs = Wbs::from_records(Vec::new());
        for name in ["doc29", "ges2002"] {
            assert!(wbs.dose_effect(name, Effect::Annoyance).is_some());
            assert!(wbs.dose_effect(name, Effect::SleepDisturbance).is_some());
        }
        assert!(wbs.dose_effect("random123", Effect::Annoyance).is_none());
        assert!(wbs.dose_effect("Doc29", Effect::Annoyance).is_none());
    }

    #[test]
    fn test_register_custom_curve() {
        use super::super::dose_effect::LogisticCurve;

        let mut wbs = Wbs::from_records(Vec::new());
        let curve = LogisticCurve {
            intercept: -5.0,
            slope: 0.1,
            cutoff: 45.0,
        };
        wbs.register("local", Effect::Annoyance, Box::new(curve));

        let found = wbs.dose_effect("local", Effect::Annoyance).unwrap();
        assert_eq!(found.lower_cutoff(), 45.0);
    }
}
