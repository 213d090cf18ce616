//! Prediction handler

use axum::{extract::State, Json};

use crate::middleware::auth::AuthUser;
use crate::models::{PredictRequest, PredictResponse};
use crate::pipeline::StudentRecord;
use crate::{AppResult, AppState};

/// One click, one synchronous inference call
pub async fn predict(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    let record = StudentRecord::try_from(req)?;
    let prediction = state.predictor.predict(&record)?;

    tracing::info!(
        "Prediction for {}: grade {} (class {})",
        user.username,
        prediction.grade.letter(),
        prediction.class_index
    );

    Ok(Json(PredictResponse::from_prediction(prediction)))
}
