//! Audit log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only record of a state-changing action. System-initiated actions
/// (such as the monthly auto-export) carry no user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub action: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
