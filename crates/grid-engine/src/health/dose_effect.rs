//! Dose-effect relationships: the share of people affected at a noise level.

use serde::{Deserialize, Serialize};

/// The health effect a relationship describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Severe annoyance, driven by Lden.
    Annoyance,
    /// Severe sleep disturbance, driven by Lnight.
    SleepDisturbance,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annoyance => write!(f, "annoyance"),
            Self::SleepDisturbance => write!(f, "sleep disturbance"),
        }
    }
}

/// A dose-effect curve.
pub trait DoseEffect: std::fmt::Debug + Send + Sync {
    /// Probability in `[0, 1]` that a person exposed to `level_db` is
    /// affected.
    fn probability(&self, level_db: f64) -> f64;

    /// Levels below this contribute nothing.
    fn lower_cutoff(&self) -> f64;
}

/// `1 / (1 + exp(-(intercept + slope·L)))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticCurve {
    pub intercept: f64,
    pub slope: f64,
    pub cutoff: f64,
}

impl DoseEffect for LogisticCurve {
    fn probability(&self, level_db: f64) -> f64 {
        let x = self.intercept + self.slope * level_db;
        (1.0 / (1.0 + (-x).exp())).clamp(0.0, 1.0)
    }

    fn lower_cutoff(&self) -> f64 {
        self.cutoff
    }
}

/// Cubic in `d = L - offset`, in percent: `Σ c[i]·d^i / 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialCurve {
    pub offset: f64,
    pub coefficients: [f64; 4],
    pub cutoff: f64,
}

impl DoseEffect for PolynomialCurve {
    fn probability(&self, level_db: f64) -> f64 {
        let d = level_db - self.offset;
        let percent = self
            .coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * d + c);
        (percent / 100.0).clamp(0.0, 1.0)
    }

    fn lower_cutoff(&self) -> f64 {
        self.cutoff
    }
}

/// Doc29 severe annoyance.
pub const DOC29_ANNOYANCE: LogisticCurve = LogisticCurve {
    intercept: -8.1101,
    slope: 0.1333,
    cutoff: 48.0,
};

/// GES 2002 severe annoyance.
pub const GES2002_ANNOYANCE: PolynomialCurve = PolynomialCurve {
    offset: 42.0,
    coefficients: [0.0, 0.2939, 3.932e-2, -9.199e-5],
    cutoff: 48.0,
};

/// Doc29 severe sleep disturbance.
pub const DOC29_SLEEP_DISTURBANCE: LogisticCurve = LogisticCurve {
    intercept: -6.642,
    slope: 0.1046,
    cutoff: 40.0,
};

/// GES 2002 severe sleep disturbance.
pub const GES2002_SLEEP_DISTURBANCE: PolynomialCurve = PolynomialCurve {
    offset: 0.0,
    coefficients: [18.147, -0.956, 0.01482, 0.0],
    cutoff: 40.0,
};

/// The relationships every survey knows, as `(name, effect, curve)`.
pub fn builtin_relationships() -> Vec<(&'static str, Effect, Box<dyn DoseEffect>)> {
    let mut relationships: Vec<(&'static str, Effect, Box<dyn DoseEffect>)> = Vec::new();
    relationships.push(("doc29", Effect::Annoyance, Box::new(DOC29_ANNOYANCE)));
    relationships.push(("ges2002", Effect::Annoyance, Box::new(GES2002_ANNOYANCE)));
    relationships.push(("doc29", Effect::SleepDisturbance, Box::new(DOC29_SLEEP_DISTURBANCE)));
    relationships.push(("ges2002", Effect::SleepDisturbance, Box::new(GES2002_SLEEP_DISTURBANCE)));
    relationships
}
