//! Document export handlers
//!
//! Manual downloads render on demand and bypass the monthly idempotency
//! guard entirely; only the scheduled run in [`ExportService`] advances it.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use shared::models::LotStatus;
use shared::types::{ExportFormat, Language};

use crate::error::{AppError, AppResult};
use crate::external::mailer::SmtpMailer;
use crate::services::export::ExportService;
use crate::services::lot::{LotFilter, LotService};
use crate::services::report::ReportService;
use crate::store::PgExportStore;
use crate::AppState;

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub lang: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct RunExportInput {
    pub language: Option<String>,
}

/// Download the current lot report as CSV
pub async fn export_lots_csv(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<impl IntoResponse> {
    download(state, query, ExportFormat::Csv).await
}

/// Download the current lot report as PDF
pub async fn export_lots_pdf(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<impl IntoResponse> {
    download(state, query, ExportFormat::Pdf).await
}

async fn download(
    state: AppState,
    query: DownloadQuery,
    format: ExportFormat,
) -> AppResult<impl IntoResponse> {
    let reference = Utc::now().date_naive();
    let language = query
        .lang
        .as_deref()
        .and_then(Language::from_code)
        .or_else(|| Language::from_code(&state.config.report.default_language))
        .unwrap_or_default();

    let filter = LotFilter {
        search: query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(String::from),
        status: query.status.as_deref().and_then(LotStatus::from_code),
    };

    let lots = LotService::new(state.db.clone())
        .lots_matching(&filter, reference)
        .await?;

    let renderer = ReportService::new(&state.config.report.font_dir);
    let document = renderer.render(&lots, language, format, reference)?;

    let filename = format!(
        "LotWatch_Export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.file_extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        document,
    ))
}

/// Trigger the monthly auto-export decision now.
///
/// The response always carries `sent` plus a human-readable status so a
/// cron caller can log why nothing went out.
pub async fn run_export(
    State(state): State<AppState>,
    body: Option<Json<RunExportInput>>,
) -> impl IntoResponse {
    let input = body.map(|Json(input)| input).unwrap_or_default();

    let mailer = match SmtpMailer::from_config(&state.config.mail) {
        Ok(mailer) => mailer,
        Err(e) => return AppError::from(e).into_response(),
    };

    let service = ExportService::new(
        Arc::new(PgExportStore::new(state.db.clone())),
        Arc::new(mailer),
        ReportService::new(&state.config.report.font_dir),
    );

    let language = input.language.as_deref().and_then(Language::from_code);
    match service.run(Utc::now().date_naive(), language).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "sent": outcome.sent,
                "status": outcome.status.to_string(),
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
