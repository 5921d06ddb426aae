//! Lot management HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::LotStatus;
use shared::types::Pagination;

use crate::services::lot::{CreateLotInput, LotFilter, LotService, UpdateLotInput};
use crate::AppState;

#[derive(Deserialize)]
pub struct ListLotsQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListLotsQuery {
    pub fn filter(&self) -> LotFilter {
        LotFilter {
            search: self
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            status: self.status.as_deref().and_then(LotStatus::from_code),
        }
    }
}

/// List lots with search, status filter, pagination and status counts
pub async fn list_lots(
    State(state): State<AppState>,
    Query(query): Query<ListLotsQuery>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());
    let pagination = Pagination::clamped(query.page, query.per_page);

    match service
        .list_lots(&query.filter(), &pagination, Utc::now().date_naive())
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific lot with its computed status
pub async fn get_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.get_lot(lot_id, Utc::now().date_naive()).await {
        Ok(lot) => (StatusCode::OK, Json(lot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new lot
pub async fn create_lot(
    State(state): State<AppState>,
    Json(input): Json<CreateLotInput>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.create_lot(input).await {
        Ok(lot) => (StatusCode::CREATED, Json(lot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a lot
pub async fn update_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    Json(input): Json<UpdateLotInput>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.update_lot(lot_id, input).await {
        Ok(lot) => (StatusCode::OK, Json(lot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a lot
pub async fn delete_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LotService::new(state.db.clone());

    match service.delete_lot(lot_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
