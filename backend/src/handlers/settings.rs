//! Export settings handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::services::settings::{SettingsService, UpdateSettingsInput};
use crate::AppState;

/// Current export settings, created with defaults on first read
pub async fn get_export_settings(State(state): State<AppState>) -> impl IntoResponse {
    let service = SettingsService::new(state.db.clone());

    match service.get_settings().await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update export settings
pub async fn update_export_settings(
    State(state): State<AppState>,
    Json(input): Json<UpdateSettingsInput>,
) -> impl IntoResponse {
    let service = SettingsService::new(state.db.clone());

    match service.update_settings(input).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => e.into_response(),
    }
}
