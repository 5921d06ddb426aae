//! Audit log handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use shared::types::Pagination;

use crate::services::audit::AuditService;
use crate::AppState;

#[derive(Deserialize)]
pub struct AuditQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Recent audit entries, newest first
pub async fn list_audit_entries(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> impl IntoResponse {
    let service = AuditService::new(state.db.clone());
    let pagination = Pagination::clamped(query.page, query.per_page);

    match service.list_entries(&pagination).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => e.into_response(),
    }
}
