//! PostgreSQL implementation of the export store

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::{ExportSettings, Lot};
use shared::types::{ExportFormat, Language};

use crate::error::AppResult;
use crate::store::ExportStore;

/// Export store backed by the application database
#[derive(Clone)]
pub struct PgExportStore {
    db: PgPool,
}

type SettingsRow = (
    Uuid,
    bool,
    Option<String>,
    Option<String>,
    i32,
    String,
    String,
    Option<String>,
    Option<DateTime<Utc>>,
    DateTime<Utc>,
);

type LotRow = (
    Uuid,
    String,
    String,
    String,
    Option<NaiveDate>,
    String,
    i32,
    DateTime<Utc>,
    DateTime<Utc>,
);

fn settings_from_row(row: SettingsRow) -> ExportSettings {
    ExportSettings {
        id: row.0,
        auto_export_enabled: row.1,
        quality_emails: row.2,
        quality_email: row.3,
        export_day: row.4,
        export_format: ExportFormat::from_code(&row.5).unwrap_or_default(),
        report_language: Language::from_code(&row.6).unwrap_or_default(),
        last_export_month: row.7,
        last_export_at: row.8,
        updated_at: row.9,
    }
}

fn lot_from_row(row: LotRow) -> Lot {
    Lot {
        id: row.0,
        product_name: row.1,
        part_number: row.2,
        lot_number: row.3,
        expiry_date: row.4,
        product_type: row.5,
        quantity: row.6,
        created_at: row.7,
        updated_at: row.8,
    }
}

const SELECT_SETTINGS: &str = r#"
    SELECT id, auto_export_enabled, quality_emails, quality_email, export_day,
           export_format, report_language, last_export_month, last_export_at, updated_at
    FROM export_settings
    LIMIT 1
"#;

impl PgExportStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExportStore for PgExportStore {
    async fn load_settings(&self) -> AppResult<ExportSettings> {
        if let Some(row) = sqlx::query_as::<_, SettingsRow>(SELECT_SETTINGS)
            .fetch_optional(&self.db)
            .await?
        {
            return Ok(settings_from_row(row));
        }

        // First read creates the singleton; the unique constraint makes
        // concurrent first reads converge on one row
        sqlx::query(
            "INSERT INTO export_settings (singleton) VALUES (TRUE) ON CONFLICT (singleton) DO NOTHING",
        )
        .execute(&self.db)
        .await?;

        let row = sqlx::query_as::<_, SettingsRow>(SELECT_SETTINGS)
            .fetch_one(&self.db)
            .await?;
        Ok(settings_from_row(row))
    }

    async fn lots_for_report(&self) -> AppResult<Vec<Lot>> {
        let rows = sqlx::query_as::<_, LotRow>(
            r#"
            SELECT id, product_name, part_number, lot_number, expiry_date, product_type,
                   quantity, created_at, updated_at
            FROM lots
            ORDER BY expiry_date ASC NULLS LAST, product_name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(lot_from_row).collect())
    }

    async fn commit_export(
        &self,
        month_key: &str,
        at: DateTime<Utc>,
        audit_action: &str,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE export_settings
            SET last_export_month = $1, last_export_at = $2, updated_at = $2
            "#,
        )
        .bind(month_key)
        .bind(at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO audit_log (action, user_id, created_at) VALUES ($1, NULL, $2)")
            .bind(audit_action)
            .bind(at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
