//! Single-sample PHA inference.
//!
//! Bounds are the caller's concern: the HTTP handler and the CLI check
//! [`OrbitalFeatureVector::check_bounds`] before calling in here.

use tracing::debug;

use crate::model::HazardPredictor;
use crate::types::{OrbitalFeatureVector, PredictionResult};

/// Classify one feature vector. Calls `predict` then `predict_proba`, once each.
pub fn run_inference(
    predictor: &dyn HazardPredictor,
    features: &OrbitalFeatureVector,
) -> PredictionResult {
    let x = features.to_model_order();
    let label = predictor.predict(&x);
    let [_, hazard_probability] = predictor.predict_proba(&x);

    debug!(?label, hazard_probability, "PHA inference complete");

    PredictionResult {
        label,
        hazard_probability,
        features: *features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeatureArray, HazardLabel};
    use std::sync::Mutex;

    /// Returns fixed outputs and records every array it is handed.
    struct RecordingPredictor {
        label: HazardLabel,
        proba: [f64; 2],
        seen: Mutex<Vec<FeatureArray>>,
    }

    impl RecordingPredictor {
        fn new(label: HazardLabel, proba: [f64; 2]) -> Self {
            Self {
                label,
                proba,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HazardPredictor for RecordingPredictor {
        fn predict(&self, features: &FeatureArray) -> HazardLabel {
            self.seen.lock().unwrap().push(*features);
            self.label
        }

        fn predict_proba(&self, features: &FeatureArray) -> [f64; 2] {
            self.seen.lock().unwrap().push(*features);
            self.proba
        }
    }

    #[test]
    fn test_features_reach_model_in_training_order() {
        let predictor = RecordingPredictor::new(HazardLabel::Safe, [0.9, 0.1]);
        run_inference(&predictor, &OrbitalFeatureVector::default());

        let seen = predictor.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        for x in seen.iter() {
            assert_eq!(*x, [22.0, 0.5, 2.0, 1.0, 10.0, 0.05]);
        }
    }

    #[test]
    fn test_hazardous_result() {
        let predictor = RecordingPredictor::new(HazardLabel::Hazardous, [0.13, 0.87]);
        let result = run_inference(&predictor, &OrbitalFeatureVector::default());
        assert!(result.is_hazardous());
        assert_eq!(result.label.verdict(), "HAZARDOUS (PHA = 1)");
        assert_eq!(result.confidence_display(), "87.00%");
    }

    #[test]
    fn test_safe_result_still_reports_hazard_probability() {
        let predictor = RecordingPredictor::new(HazardLabel::Safe, [0.88, 0.12]);
        let features = OrbitalFeatureVector {
            h: 27.3,
            moid: 0.18,
            ..OrbitalFeatureVector::default()
        };
        let result = run_inference(&predictor, &features);
        assert!(!result.is_hazardous());
        assert_eq!(result.label.verdict(), "SAFE (PHA = 0)");
        assert_eq!(result.confidence_display(), "12.00%");
        assert_eq!(result.features, features);
    }
}
