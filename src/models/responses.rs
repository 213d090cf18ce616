//! Rendered prediction results

use serde::Serialize;

use crate::pipeline::schema::LayoutInfo;
use crate::pipeline::{risk_percent, Grade, ModelStatus, Prediction};

/// What the dashboard renders after one inference call
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    /// Letter grade, or "Unknown" when the classifier returned an
    /// unmapped class
    pub grade: String,

    /// Trained class index; absent for unknown results so the raw
    /// integer never leaks to the UI
    pub class_index: Option<u8>,

    /// Gauge value, 0 for the best class through 100 for the worst
    pub risk_percent: Option<f32>,

    /// Drives the alternate alert styling for grades D and F
    pub at_risk: bool,

    pub message: String,
}

impl PredictResponse {
    pub fn from_prediction(prediction: Prediction) -> Self {
        match prediction.grade {
            Grade::Unknown => Self {
                grade: Grade::Unknown.letter().to_string(),
                class_index: None,
                risk_percent: None,
                at_risk: false,
                message: "Prediction unavailable: the model returned an unrecognized class"
                    .to_string(),
            },
            grade => Self {
                grade: grade.letter().to_string(),
                class_index: Some(prediction.class_index as u8),
                risk_percent: risk_percent(prediction.class_index),
                at_risk: grade.is_at_risk(),
                message: format!("Predicted Grade: {}", grade.letter()),
            },
        }
    }
}

/// Model observability for the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatusResponse {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,
    pub model: ModelStatus,
}

impl ModelStatusResponse {
    pub fn new(model: ModelStatus) -> Self {
        let layout = LayoutInfo::current();
        Self {
            feature_version: layout.version,
            layout_hash: layout.hash,
            feature_count: layout.feature_count,
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_grade_response() {
        let response = PredictResponse::from_prediction(Prediction {
            class_index: 1,
            grade: Grade::B,
        });

        assert_eq!(response.grade, "B");
        assert_eq!(response.class_index, Some(1));
        assert_eq!(response.risk_percent, Some(25.0));
        assert!(!response.at_risk);
        assert_eq!(response.message, "Predicted Grade: B");
    }

    #[test]
    fn test_failing_grade_flags_at_risk() {
        let response = PredictResponse::from_prediction(Prediction {
            class_index: 4,
            grade: Grade::F,
        });

        assert_eq!(response.grade, "F");
        assert_eq!(response.risk_percent, Some(100.0));
        assert!(response.at_risk);
    }

    #[test]
    fn test_unknown_class_never_leaks_raw_index() {
        let response = PredictResponse::from_prediction(Prediction {
            class_index: 7,
            grade: Grade::Unknown,
        });

        assert_eq!(response.grade, "Unknown");
        assert_eq!(response.class_index, None);
        assert_eq!(response.risk_percent, None);
        assert!(!response.at_risk);
    }
}
