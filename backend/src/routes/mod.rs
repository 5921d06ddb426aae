//! Route definitions for the LotWatch expiry tracking service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Lot management
        .nest("/lots", lot_routes())
        // Export settings
        .nest("/settings", settings_routes())
        // Scheduled export trigger
        .nest("/exports", export_routes())
        // Audit trail
        .nest("/audit", audit_routes())
}

/// Lot management routes
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots).post(handlers::create_lot))
        .route("/export/csv", get(handlers::export_lots_csv))
        .route("/export/pdf", get(handlers::export_lots_pdf))
        .route(
            "/:lot_id",
            get(handlers::get_lot)
                .put(handlers::update_lot)
                .delete(handlers::delete_lot),
        )
}

/// Export settings routes
fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/export",
        get(handlers::get_export_settings).put(handlers::update_export_settings),
    )
}

/// Scheduled export routes
fn export_routes() -> Router<AppState> {
    Router::new().route("/run", post(handlers::run_export))
}

/// Audit trail routes
fn audit_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_audit_entries))
}
