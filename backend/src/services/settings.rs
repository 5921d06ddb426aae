//! Export settings service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::{ExportSettings, EXPORT_DAY_MAX, EXPORT_DAY_MIN};
use shared::types::{ExportFormat, Language};
use shared::validation::resolve_recipients;

use crate::error::{AppError, AppResult};

/// Settings service managing the export configuration singleton
#[derive(Clone)]
pub struct SettingsService {
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

const SELECT_SETTINGS: &str = r#"
    SELECT id, auto_export_enabled, quality_emails, quality_email, export_day,
           export_format, report_language, last_export_month, last_export_at, updated_at
    FROM export_settings
    LIMIT 1
"#;

/// Input for updating export settings. Absent fields keep their stored
/// value; a blank email field clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsInput {
    pub auto_export_enabled: Option<bool>,
    pub quality_emails: Option<String>,
    pub quality_email: Option<String>,
    pub export_day: Option<i32>,
    pub export_format: Option<String>,
    pub report_language: Option<String>,
}

fn blank_to_none(raw: String) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}

impl SettingsService {
    /// Create a new SettingsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the settings row, creating it with defaults on first read
    pub async fn get_settings(&self) -> AppResult<ExportSettings> {
        if let Some(row) = sqlx::query_as::<_, SettingsRow>(SELECT_SETTINGS)
            .fetch_optional(&self.db)
            .await?
        {
            return Ok(settings_from_row(row));
        }

        // The unique singleton column makes concurrent first reads converge
        // on one row
        sqlx::query("INSERT INTO export_settings (singleton) VALUES (TRUE) ON CONFLICT (singleton) DO NOTHING")
            .execute(&self.db)
            .await?;

        let row = sqlx::query_as::<_, SettingsRow>(SELECT_SETTINGS)
            .fetch_one(&self.db)
            .await?;
        Ok(settings_from_row(row))
    }

    /// Update export settings
    pub async fn update_settings(&self, input: UpdateSettingsInput) -> AppResult<ExportSettings> {
        let current = self.get_settings().await?;

        let auto_export_enabled = input
            .auto_export_enabled
            .unwrap_or(current.auto_export_enabled);
        let quality_emails = match input.quality_emails {
            Some(raw) => blank_to_none(raw),
            None => current.quality_emails,
        };
        let quality_email = match input.quality_email {
            Some(raw) => blank_to_none(raw),
            None => current.quality_email,
        };
        let export_day = input.export_day.unwrap_or(current.export_day);
        let export_format = match input.export_format.as_deref() {
            Some(code) => ExportFormat::from_code(code).ok_or_else(|| AppError::Validation {
                field: "export_format".to_string(),
                message: format!("Unknown export format: {}", code),
                message_fr: format!("Format d'export inconnu : {}", code),
            })?,
            None => current.export_format,
        };
        let report_language = match input.report_language.as_deref() {
            Some(code) => Language::from_code(code).ok_or_else(|| AppError::Validation {
                field: "report_language".to_string(),
                message: format!("Unknown report language: {}", code),
                message_fr: format!("Langue de rapport inconnue : {}", code),
            })?,
            None => current.report_language,
        };

        if !(EXPORT_DAY_MIN..=EXPORT_DAY_MAX).contains(&export_day) {
            return Err(AppError::Validation {
                field: "export_day".to_string(),
                message: format!(
                    "Export day must be between {} and {}",
                    EXPORT_DAY_MIN, EXPORT_DAY_MAX
                ),
                message_fr: format!(
                    "Le jour d'export doit être compris entre {} et {}",
                    EXPORT_DAY_MIN, EXPORT_DAY_MAX
                ),
            });
        }

        // An enabled schedule with nobody to mail is a misconfiguration,
        // reject it at write time rather than skipping silently every month
        if auto_export_enabled
            && resolve_recipients(quality_emails.as_deref(), quality_email.as_deref()).is_empty()
        {
            return Err(AppError::Validation {
                field: "quality_emails".to_string(),
                message: "Cannot enable auto-export without at least one valid recipient address"
                    .to_string(),
                message_fr:
                    "Impossible d'activer l'export automatique sans au moins une adresse destinataire valide"
                        .to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            UPDATE export_settings
            SET auto_export_enabled = $2, quality_emails = $3, quality_email = $4,
                export_day = $5, export_format = $6, report_language = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, auto_export_enabled, quality_emails, quality_email, export_day,
                      export_format, report_language, last_export_month, last_export_at, updated_at
            "#,
        )
        .bind(current.id)
        .bind(auto_export_enabled)
        .bind(&quality_emails)
        .bind(&quality_email)
        .bind(export_day)
        .bind(export_format.code())
        .bind(report_language.code())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO audit_log (action, user_id) VALUES ($1, NULL)")
            .bind("Export settings updated")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(settings_from_row(row))
    }
}
