//! Intervention list download handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{AppError, AppResult, AppState};

/// Download the static intervention list CSV
///
/// When the file is absent this is an explicit no-op (204), never an error
/// and never an empty download.
pub async fn intervention_list(State(state): State<AppState>) -> AppResult<Response> {
    match read_intervention_list(&state.config.intervention_list_path).await? {
        Some(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"intervention_list.csv\"",
                ),
            ],
            bytes,
        )
            .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn read_intervention_list(path: &str) -> Result<Option<Vec<u8>>, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::InternalError(format!(
            "reading intervention list: {e}"
        ))),
    }
}
