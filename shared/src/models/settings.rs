//! Export settings singleton

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ExportFormat, Language};

/// Earliest day of month an auto-export may run on
pub const EXPORT_DAY_MIN: i32 = 1;
/// Latest day of month an auto-export may run on. Capped at 28 so the
/// configured day exists in every month, February included.
pub const EXPORT_DAY_MAX: i32 = 28;

/// Application-wide export configuration. Exactly one row exists; reading
/// it creates the row with defaults when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    pub id: Uuid,
    pub auto_export_enabled: bool,
    /// Free-form recipient list, split on commas, semicolons and newlines
    pub quality_emails: Option<String>,
    /// Single-address field kept from older installs, merged in last
    pub quality_email: Option<String>,
    pub export_day: i32,
    pub export_format: ExportFormat,
    pub report_language: Language,
    /// Month key (`YYYY-MM`) of the last committed auto-export
    pub last_export_month: Option<String>,
    pub last_export_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ExportSettings {
    /// Row content as created on first read
    pub fn with_defaults(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            auto_export_enabled: false,
            quality_emails: None,
            quality_email: None,
            export_day: EXPORT_DAY_MIN,
            export_format: ExportFormat::default(),
            report_language: Language::default(),
            last_export_month: None,
            last_export_at: None,
            updated_at: now,
        }
    }
}
