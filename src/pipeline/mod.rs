//! Input-to-prediction pipeline
//!
//! The ordered assembly of a validated form submission into a feature vector,
//! the fitted scaling step, classifier inference, and the mapping of the
//! resulting class index onto the grade/risk presentation.

pub mod assemble;
pub mod engine;
pub mod grade;
pub mod scaler;
pub mod schema;
pub mod student;

pub use assemble::{assemble, FeatureVector};
pub use engine::{GradeModel, InferenceError, ModelStatus};
pub use grade::{risk_percent, Grade};
pub use scaler::StandardScaler;
pub use student::StudentRecord;

use std::path::Path;

/// A model or scaler artifact could not be loaded or is incompatible
/// with this build's feature layout. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact not found: {path}")]
    Missing { path: String },
    #[error("malformed scaler artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] schema::LayoutMismatchError),
    #[error("scaler length mismatch: expected {expected}, got mean={mean} scale={scale}")]
    WrongLength {
        expected: usize,
        mean: usize,
        scale: usize,
    },
    #[error("non-finite or zero scale for feature {feature}: {value}")]
    BadScale { feature: String, value: f32 },
    #[error("failed to load model {path}: {source}")]
    Model {
        path: String,
        #[source]
        source: ort::Error,
    },
}

/// One classifier verdict, already lifted onto the closed grade enumeration
#[derive(Debug, Clone, Copy)]
pub struct Prediction {
    pub class_index: usize,
    pub grade: Grade,
}

/// The loaded artifacts, constructed once at startup and shared read-only
/// with every request
pub struct Predictor {
    scaler: StandardScaler,
    model: GradeModel,
}

impl Predictor {
    /// Load both artifacts; any failure here must abort startup
    pub fn load(model_path: &str, scaler_path: &str) -> Result<Self, ArtifactError> {
        let scaler = StandardScaler::load(Path::new(scaler_path))?;
        tracing::info!("Scaler parameters loaded from: {}", scaler_path);

        let model = GradeModel::load(model_path)?;

        Ok(Self { scaler, model })
    }

    /// Assemble, scale, classify
    pub fn predict(&self, record: &StudentRecord) -> Result<Prediction, InferenceError> {
        let vector = assemble(record);
        let scaled = self.scaler.transform(&vector);
        let class_index = self.model.predict(&scaled)?;

        Ok(Prediction {
            class_index,
            grade: Grade::from_class_index(class_index),
        })
    }

    pub fn status(&self) -> ModelStatus {
        self.model.status()
    }
}
