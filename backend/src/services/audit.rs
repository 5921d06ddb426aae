//! Audit log queries

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::AuditLogEntry;
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};

use crate::error::AppResult;

/// Read side of the audit log. Writers insert their entries inside the
/// transaction of the action being recorded.
#[derive(Clone)]
pub struct AuditService {
    db: PgPool,
}

impl AuditService {
    /// Create a new AuditService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List audit entries, newest first
    pub async fn list_entries(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<AuditLogEntry>> {
        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_log")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, (Uuid, String, Option<Uuid>, DateTime<Utc>)>(
            r#"
            SELECT id, action, user_id, created_at
            FROM audit_log
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let data = rows
            .into_iter()
            .map(|r| AuditLogEntry {
                id: r.0,
                action: r.1,
                user_id: r.2,
                created_at: r.3,
            })
            .collect();

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }
}
