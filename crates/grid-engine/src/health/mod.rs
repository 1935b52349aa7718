//! Health impact: people severely annoyed or sleep-disturbed by a noise grid.
//!
//! The grid is evaluated at every survey location, the level is turned into
//! a probability with a dose-effect relationship, and the probabilities are
//! summed weighted by the number of people per location.

pub mod dose_effect;
pub mod survey;

use noise_common::NoiseUnit;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::interpolation::bilinear_interpolate;
use crate::resample::fractional_position;

pub use dose_effect::{DoseEffect, Effect, LogisticCurve, PolynomialCurve};
pub use survey::{SurveyDataset, SurveyRecord, Wbs};

/// The relationship whose validity range is checked against `max_db`.
const CHECKED_RELATIONSHIP: &str = "doc29";

/// A non-fatal remark attached to a health estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Some levels lie above the range the relationship was fitted on.
    Extrapolation {
        relationship: String,
        max_db: f64,
        highest_level: f64,
        points: usize,
    },
}

/// Result of a health impact estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthImpact {
    /// Weighted number of affected people.
    pub total: f64,
    /// Level at every survey record, in survey order (NaN outside the grid).
    pub levels: Vec<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

impl HealthImpact {
    /// Whether any level was beyond the relationship's validity range.
    pub fn was_extrapolated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Extrapolation { .. }))
    }
}

impl Grid {
    /// Bilinear level at every survey record; NaN outside the grid.
    pub fn interpolate_at<S: SurveyDataset + ?Sized>(&self, survey: &S) -> Result<Vec<f64>> {
        let array = self
            .array()
            .map_err(|_| GridError::single_only("interpolate_at"))?;
        let shape = self.shape();

        Ok(survey
            .records()
            .iter()
            .map(|record| match fractional_position(shape, record.x, record.y) {
                Some((col, row)) => bilinear_interpolate(array, col, row),
                None => f64::NAN,
            })
            .collect())
    }

    /// Weighted number of severely annoyed people ("ernstig gehinderden").
    ///
    /// Needs an Lden grid. `de` names the annoyance relationship; `max_db`
    /// bounds the validity range of the Doc29 curve.
    pub fn gehinderden<S: SurveyDataset + ?Sized>(
        &self,
        survey: &S,
        de: &str,
        max_db: Option<f64>,
    ) -> Result<HealthImpact> {
        self.health_impact(
            survey,
            Effect::Annoyance,
            NoiseUnit::Lden,
            "gehinderden",
            de,
            max_db,
        )
    }

    /// Weighted number of severely sleep-disturbed people
    /// ("ernstig slaapverstoorden").
    ///
    /// Needs an Lnight grid. `de` names the sleep-disturbance relationship;
    /// `max_db` bounds the validity range of the Doc29 curve.
    pub fn slaapverstoorden<S: SurveyDataset + ?Sized>(
        &self,
        survey: &S,
        de: &str,
        max_db: Option<f64>,
    ) -> Result<HealthImpact> {
        self.health_impact(
            survey,
            Effect::SleepDisturbance,
            NoiseUnit::Lnight,
            "slaapverstoorden",
            de,
            max_db,
        )
    }

    fn health_impact<S: SurveyDataset + ?Sized>(
        &self,
        survey: &S,
        effect: Effect,
        unit: NoiseUnit,
        operation: &'static str,
        de: &str,
        max_db: Option<f64>,
    ) -> Result<HealthImpact> {
        if self.is_multigrid() {
            return Err(GridError::single_only(operation));
        }
        if self.unit() != &unit {
            return Err(GridError::UnitMismatch {
                operation,
                expected: unit.to_string(),
                found: self.unit().to_string(),
            });
        }

        let curve = survey
            .dose_effect(de, effect)
            .ok_or_else(|| GridError::UnknownDoseEffect {
                name: de.to_string(),
                effect: effect.to_string(),
            })?;

        let levels = self.interpolate_at(survey)?;
        let cutoff = curve.lower_cutoff();
        let total: f64 = levels
            .iter()
            .zip(survey.records())
            .filter(|(level, _)| !level.is_nan() && **level >= cutoff)
            .map(|(level, record)| curve.probability(*level) * record.weight)
            .sum();

        let mut diagnostics = Vec::new();
        if let Some(max_db) = max_db.filter(|_| de == CHECKED_RELATIONSHIP) {
            let above: Vec<f64> = levels.iter().copied().filter(|l| *l > max_db).collect();
            if !above.is_empty() {
                let highest_level = above.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                warn!(
                    relationship = de,
                    max_db,
                    highest_level,
                    points = above.len(),
                    "Levels above the validity range of the dose-effect relationship; \
                     probabilities are extrapolated"
                );
                diagnostics.push(Diagnostic::Extrapolation {
                    relationship: de.to_string(),
                    max_db,
                    highest_level,
                    points: above.len(),
                });
            }
        }

        info!(
            %effect,
            relationship = de,
            records = levels.len(),
            total,
            "Estimated health impact"
        );
        Ok(HealthImpact {
            total,
            levels,
            diagnostics,
        })
    }
}
