//! Core types shared by the grid operations.

use serde::{Deserialize, Serialize};

/// Interpolation method for grid resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Nearest lattice point (preserves exact values).
    Nearest,
    /// Bilinear interpolation (smooth, slight value changes).
    #[default]
    Bilinear,
    /// Catmull-Rom bicubic interpolation (smoothest, more compute).
    Cubic,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nearest" => Self::Nearest,
            "cubic" | "bicubic" => Self::Cubic,
            _ => Self::Bilinear,
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
            Self::Cubic => write!(f, "cubic"),
        }
    }
}

/// How the upper and lower bounds of a multigrid's spread are defined.
///
/// The statistics engine reports `dhi`/`dlo` as distances from the mean to
/// these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BoundPolicy {
    /// Per-cell maximum and minimum across layers.
    #[default]
    Extremes,
    /// Mean plus or minus `z` sample standard deviations of the layer levels.
    Confidence { z: f64 },
}

impl BoundPolicy {
    /// Parse `"extremes"` or `"confidence:<z>"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower == "extremes" {
            return Some(Self::Extremes);
        }
        let z = lower.strip_prefix("confidence:")?.trim().parse().ok()?;
        Some(Self::Confidence { z })
    }
}

impl std::fmt::Display for BoundPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extremes => write!(f, "extremes"),
            Self::Confidence { z } => write!(f, "confidence:{}", z),
        }
    }
}

/// One item or a list of items, used to build single grids and multigrids
/// through the same constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Layers<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Layers<T> {
    /// `"single"` or `"list"`, for error messages.
    pub fn arity(&self) -> &'static str {
        match self {
            Self::One(_) => "single",
            Self::Many(_) => "list",
        }
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Check if no items are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_method_from_str() {
        assert_eq!(
            InterpolationMethod::from_str("nearest"),
            InterpolationMethod::Nearest
        );
        assert_eq!(
            InterpolationMethod::from_str("BILINEAR"),
            InterpolationMethod::Bilinear
        );
        assert_eq!(
            InterpolationMethod::from_str("bicubic"),
            InterpolationMethod::Cubic
        );
        assert_eq!(
            InterpolationMethod::from_str("invalid"),
            InterpolationMethod::Bilinear
        );
    }

    #[test]
    fn test_bound_policy_parse() {
        assert_eq!(BoundPolicy::parse("extremes"), Some(BoundPolicy::Extremes));
        assert_eq!(
            BoundPolicy::parse("Confidence:1.96"),
            Some(BoundPolicy::Confidence { z: 1.96 })
        );
        assert_eq!(BoundPolicy::parse("confidence:"), None);
        assert_eq!(BoundPolicy::parse("spread"), None);
    }

    #[test]
    fn test_bound_policy_display_parses_back() {
        let policy = BoundPolicy::Confidence { z: 2.5 };
        assert_eq!(BoundPolicy::parse(&policy.to_string()), Some(policy));
    }

    #[test]
    fn test_layers_arity() {
        let one = Layers::One(3u8);
        let many = Layers::Many(vec![1u8, 2]);
        assert_eq!(one.arity(), "single");
        assert_eq!(many.arity(), "list");
        assert_eq!(many.len(), 2);
        assert!(Layers::<u8>::Many(vec![]).is_empty());
    }
}
