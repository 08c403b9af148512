//! Orbital feature vector and hazard prediction types

use serde::{Deserialize, Serialize};

/// Number of features the PHA classifier consumes.
pub const FEATURE_COUNT: usize = 6;

/// Feature names in the positional order the classifier was trained on.
///
/// This differs from the order the form lists them in; see
/// [`OrbitalFeatureVector::to_model_order`].
pub const MODEL_FEATURE_ORDER: [&str; FEATURE_COUNT] = ["H", "e", "a", "q", "i", "moid"];

/// Positional feature array as presented to a predictor.
pub type FeatureArray = [f64; FEATURE_COUNT];

// ============================================================================
// Feature Vector
// ============================================================================

/// The six orbital elements a user enters to run a classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalFeatureVector {
    /// Absolute magnitude H
    #[serde(alias = "H")]
    pub h: f64,
    /// Eccentricity
    pub e: f64,
    /// Semi-major axis (AU)
    pub a: f64,
    /// Perihelion distance (AU)
    pub q: f64,
    /// Inclination (degrees)
    pub i: f64,
    /// Earth minimum orbit intersection distance (AU)
    pub moid: f64,
}

impl Default for OrbitalFeatureVector {
    fn default() -> Self {
        Self {
            h: 22.0,
            e: 0.5,
            a: 2.0,
            q: 1.0,
            i: 10.0,
            moid: 0.05,
        }
    }
}

impl OrbitalFeatureVector {
    /// Map named fields onto the classifier's positional order `[H, e, a, q, i, moid]`.
    ///
    /// The model has no notion of field names at inference time, so this is the
    /// only place the order is decided.
    pub fn to_model_order(&self) -> FeatureArray {
        [self.h, self.e, self.a, self.q, self.i, self.moid]
    }

    /// Check every field against [`FEATURE_BOUNDS`], collecting all violations.
    pub fn check_bounds(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = FEATURE_BOUNDS
            .iter()
            .zip(self.to_model_order())
            .filter_map(|(bound, value)| bound.violation(value))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Input Bounds
// ============================================================================

/// Input range and default for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureBound {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FeatureBound {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }

    fn violation(&self, value: f64) -> Option<String> {
        if self.contains(value) {
            None
        } else {
            Some(format!(
                "{} must be within [{}, {}], got {}",
                self.name, self.min, self.max, value
            ))
        }
    }
}

/// Form bounds, in model order. These are input guidance, not physical limits.
pub const FEATURE_BOUNDS: [FeatureBound; FEATURE_COUNT] = [
    FeatureBound { name: "H", label: "Absolute Magnitude (H)", min: 10.0, max: 30.0, default: 22.0, step: 0.1 },
    FeatureBound { name: "e", label: "Eccentricity (e)", min: 0.0, max: 2.0, default: 0.5, step: 0.01 },
    FeatureBound { name: "a", label: "Semi-Major Axis (a)", min: 0.1, max: 10.0, default: 2.0, step: 0.01 },
    FeatureBound { name: "q", label: "Perihelion Distance (q)", min: 0.1, max: 5.0, default: 1.0, step: 0.01 },
    FeatureBound { name: "i", label: "Inclination (i) in degrees", min: 0.0, max: 180.0, default: 10.0, step: 0.1 },
    FeatureBound { name: "moid", label: "Earth MOID (moid)", min: 0.0, max: 0.2, default: 0.05, step: 0.001 },
];

// ============================================================================
// Prediction
// ============================================================================

/// Binary PHA classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardLabel {
    Safe,
    Hazardous,
}

impl HazardLabel {
    pub fn verdict(self) -> &'static str {
        match self {
            HazardLabel::Safe => "SAFE (PHA = 0)",
            HazardLabel::Hazardous => "HAZARDOUS (PHA = 1)",
        }
    }
}

impl std::fmt::Display for HazardLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HazardLabel::Safe => write!(f, "Safe"),
            HazardLabel::Hazardous => write!(f, "Hazardous"),
        }
    }
}

/// Outcome of one classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: HazardLabel,
    /// Probability of the hazardous class, in [0, 1]
    pub hazard_probability: f64,
    /// Inputs the prediction was made from
    pub features: OrbitalFeatureVector,
}

impl PredictionResult {
    pub fn is_hazardous(&self) -> bool {
        self.label == HazardLabel::Hazardous
    }

    /// Danger probability as a percentage with two decimals, e.g. `"87.00%"`.
    ///
    /// Shown for both labels: a safe result still reports how likely danger was.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.hazard_probability * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_order_is_pinned() {
        let v = OrbitalFeatureVector {
            h: 22.0,
            e: 0.5,
            a: 2.0,
            q: 1.0,
            i: 10.0,
            moid: 0.05,
        };
        assert_eq!(v.to_model_order(), [22.0, 0.5, 2.0, 1.0, 10.0, 0.05]);
    }

    #[test]
    fn test_bounds_follow_model_order() {
        let names: Vec<_> = FEATURE_BOUNDS.iter().map(|b| b.name).collect();
        assert_eq!(names, MODEL_FEATURE_ORDER);
    }

    #[test]
    fn test_defaults_are_in_bounds() {
        let v = OrbitalFeatureVector::default();
        assert!(v.check_bounds().is_ok());
        for (bound, value) in FEATURE_BOUNDS.iter().zip(v.to_model_order()) {
            assert_eq!(bound.default, value, "default mismatch for {}", bound.name);
        }
    }

    #[test]
    fn test_out_of_bounds_reports_each_field() {
        let v = OrbitalFeatureVector {
            h: 35.0,
            moid: -0.1,
            ..Default::default()
        };
        let errors = v.check_bounds().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("H "));
        assert!(errors[1].starts_with("moid "));
    }

    #[test]
    fn test_nan_is_out_of_bounds() {
        let v = OrbitalFeatureVector {
            e: f64::NAN,
            ..Default::default()
        };
        assert!(v.check_bounds().is_err());
    }

    #[test]
    fn test_confidence_display() {
        let hazardous = PredictionResult {
            label: HazardLabel::Hazardous,
            hazard_probability: 0.87,
            features: OrbitalFeatureVector::default(),
        };
        assert!(hazardous.is_hazardous());
        assert_eq!(hazardous.confidence_display(), "87.00%");

        let safe = PredictionResult {
            label: HazardLabel::Safe,
            hazard_probability: 0.12,
            features: OrbitalFeatureVector::default(),
        };
        assert!(!safe.is_hazardous());
        assert_eq!(safe.confidence_display(), "12.00%");
    }

    #[test]
    fn test_label_verdicts() {
        assert_eq!(HazardLabel::Safe.verdict(), "SAFE (PHA = 0)");
        assert_eq!(HazardLabel::Hazardous.verdict(), "HAZARDOUS (PHA = 1)");
    }
}
