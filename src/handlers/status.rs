//! Model status handler

use axum::{extract::State, Json};

use crate::models::ModelStatusResponse;
use crate::AppState;

/// Report the loaded model and the feature schema it was checked against
pub async fn model_status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    Json(ModelStatusResponse::new(state.predictor.status()))
}
