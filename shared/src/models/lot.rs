//! Lot model and expiry status classification

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::i18n::{translate, MessageKey};
use crate::types::Language;

/// Days before expiry during which a lot counts as expiring soon.
/// The boundary day itself is inside the window.
pub const WARNING_WINDOW_DAYS: i64 = 30;

/// A perishable product lot in stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub id: Uuid,
    pub product_name: String,
    /// Manufacturer part number, unique per lot line
    pub part_number: String,
    pub lot_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub product_type: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lot {
    pub fn status(&self, reference: NaiveDate) -> LotStatus {
        classify_status(self.expiry_date, reference)
    }
}

/// Expiry status bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LotStatus {
    Expired,
    Warning,
    Valid,
    Unknown,
}

impl LotStatus {
    /// Stable wire code, also used for query-string filters
    pub fn code(&self) -> &'static str {
        match self {
            LotStatus::Expired => "expired",
            LotStatus::Warning => "warning",
            LotStatus::Valid => "valid",
            LotStatus::Unknown => "unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<LotStatus> {
        match code.trim().to_ascii_lowercase().as_str() {
            "expired" => Some(LotStatus::Expired),
            "warning" => Some(LotStatus::Warning),
            "valid" => Some(LotStatus::Valid),
            "unknown" => Some(LotStatus::Unknown),
            _ => None,
        }
    }

    /// Localized label shown on reports
    pub fn label(&self, language: Language) -> &'static str {
        let key = match self {
            LotStatus::Expired => MessageKey::StatusExpired,
            LotStatus::Warning => MessageKey::StatusWarning,
            LotStatus::Valid => MessageKey::StatusValid,
            LotStatus::Unknown => MessageKey::StatusUnknown,
        };
        translate(key, language)
    }
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Classify a lot's expiry status against a reference date.
///
/// This is the single source of truth for status everywhere a status is
/// shown or exported: list filters, counts, CSV cells, PDF row tints and
/// mail legends all go through here.
pub fn classify_status(expiry_date: Option<NaiveDate>, reference: NaiveDate) -> LotStatus {
    let Some(expiry) = expiry_date else {
        return LotStatus::Unknown;
    };
    if expiry < reference {
        LotStatus::Expired
    } else if expiry <= reference + Duration::days(WARNING_WINDOW_DAYS) {
        LotStatus::Warning
    } else {
        LotStatus::Valid
    }
}
