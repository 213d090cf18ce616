//! Standard scaler artifact
//!
//! The scaler is fitted at training time (zero mean, unit variance per
//! feature) and persisted as JSON next to the model. It is loaded once at
//! startup and never refitted here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::assemble::FeatureVector;
use super::schema::{feature_name, validate_layout, FEATURE_COUNT};
use super::ArtifactError;

/// Persisted scaler parameters, as written by the training job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

/// Pre-fitted per-feature affine transform
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: [f32; FEATURE_COUNT],
    scale: [f32; FEATURE_COUNT],
}

impl StandardScaler {
    /// Load scaler parameters from a JSON artifact
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let raw = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params: ScalerParams = serde_json::from_slice(&raw)?;
        Self::from_params(params)
    }

    /// Validate fitted parameters against the current feature layout
    pub fn from_params(params: ScalerParams) -> Result<Self, ArtifactError> {
        validate_layout(params.feature_version, params.layout_hash)?;

        if params.mean.len() != FEATURE_COUNT || params.scale.len() != FEATURE_COUNT {
            return Err(ArtifactError::WrongLength {
                expected: FEATURE_COUNT,
                mean: params.mean.len(),
                scale: params.scale.len(),
            });
        }

        if let Some(index) = params.scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ArtifactError::BadScale {
                feature: feature_name(index).unwrap_or("?").to_string(),
                value: params.scale[index],
            });
        }

        let mut mean = [0.0f32; FEATURE_COUNT];
        let mut scale = [0.0f32; FEATURE_COUNT];
        mean.copy_from_slice(&params.mean);
        scale.copy_from_slice(&params.scale);

        Ok(Self { mean, scale })
    }

    /// Identity transform, for wiring tests
    #[cfg(test)]
    pub fn identity() -> Self {
        Self {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
        }
    }

    /// Apply the fitted transform: `(x - mean) / scale` per feature
    pub fn transform(&self, vector: &FeatureVector) -> [f32; FEATURE_COUNT] {
        let mut out = [0.0f32; FEATURE_COUNT];
        for (i, value) in vector.as_array().iter().enumerate() {
            out[i] = (value - self.mean[i]) / self.scale[i];
        }
        out
    }
}
