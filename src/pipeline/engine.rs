//! Grade classifier engine - ONNX Runtime integration
//!
//! Wraps the pre-trained multiclass classifier artifact. The session is
//! created once at startup and only ever read after that; the mutex exists
//! because ONNX Runtime needs `&mut` to run, not because anything is
//! reassigned.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::schema::FEATURE_COUNT;
use super::ArtifactError;

/// Inference failed at request time
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("onnx runtime: {0}")]
    Runtime(String),
    #[error("model produced no output")]
    MissingOutput,
}

/// Engine state for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub model_path: String,
    pub inference_device: String,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub loaded_at: DateTime<Utc>,
}

/// Pre-trained grade classifier
///
/// Contract: takes one scaled feature vector of FEATURE_COUNT values and
/// returns a discrete class index. The index is mapped to a `Grade` by the
/// caller; anything outside the trained classes falls out of the grade table
/// there.
#[derive(Debug)]
pub struct GradeModel {
    session: Mutex<Session>,
    model_path: String,
    loaded_at: DateTime<Utc>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl GradeModel {
    /// Load the ONNX artifact from disk
    pub fn load(model_path: &str) -> Result<Self, ArtifactError> {
        tracing::info!("Loading grade model from: {}", model_path);

        if !Path::new(model_path).exists() {
            return Err(ArtifactError::Missing {
                path: model_path.to_string(),
            });
        }

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|source| ArtifactError::Model {
                path: model_path.to_string(),
                source,
            })?;

        tracing::info!("Grade model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            model_path: model_path.to_string(),
            loaded_at: Utc::now(),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    /// Run the classifier on one scaled feature vector
    pub fn predict(&self, features: &[f32; FEATURE_COUNT]) -> Result<usize, InferenceError> {
        let start_time = Instant::now();

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("array error: {e}")))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("tensor error: {e}")))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or(InferenceError::MissingOutput)?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(format!("inference failed: {e}")))?;

        let output = outputs
            .get(&output_name)
            .ok_or(InferenceError::MissingOutput)?;

        // Classifier exports differ between converter versions: some emit the
        // winning label directly as int64, others a [1, n_classes] score row.
        let class_index = if let Ok((_, labels)) = output.try_extract_tensor::<i64>() {
            let raw = *labels.first().ok_or(InferenceError::MissingOutput)?;
            // Negative labels fall out of the grade table downstream
            usize::try_from(raw).unwrap_or(usize::MAX)
        } else {
            let (_, scores) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| InferenceError::Runtime(format!("extract error: {e}")))?;
            argmax(scores).ok_or(InferenceError::MissingOutput)?
        };

        let elapsed_us = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(class_index)
    }

    pub fn status(&self) -> ModelStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        };

        ModelStatus {
            loaded: true,
            model_path: self.model_path.clone(),
            inference_device: "ONNX Runtime (CPU)".to_string(),
            inference_count: count,
            avg_latency_ms: avg,
            loaded_at: self.loaded_at,
        }
    }
}

/// Index of the highest score in a row of class scores
fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_fails() {
        let err = GradeModel::load("/nonexistent/grade_model.onnx").unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
    }

    #[test]
    fn test_argmax_picks_highest_score() {
        assert_eq!(argmax(&[0.1, 0.2, 0.6, 0.05, 0.05]), Some(2));
        assert_eq!(argmax(&[0.9, 0.05, 0.02, 0.02, 0.01]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_tolerates_nan() {
        // NaN scores must not panic; some class still wins
        assert!(argmax(&[f32::NAN, 0.5, 0.3]).is_some());
    }
}
