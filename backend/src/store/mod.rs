//! Persistence seams for the auto-export engine
//!
//! The scheduler talks to storage through [`ExportStore`] so its decision
//! logic can be exercised against an in-memory implementation. The running
//! service wires in [`PgExportStore`].

mod memory;
mod postgres;

pub use memory::MemoryExportStore;
pub use postgres::PgExportStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{ExportSettings, Lot};

use crate::error::AppResult;

#[async_trait]
pub trait ExportStore: Send + Sync {
    /// Load the settings row, creating it with defaults when missing
    async fn load_settings(&self) -> AppResult<ExportSettings>;

    /// Every lot, ordered for reporting: expiry ascending with absent
    /// dates last, then product name. Renderers must not re-sort.
    async fn lots_for_report(&self) -> AppResult<Vec<Lot>>;

    /// Record a committed export. The idempotency fields and the audit
    /// entry are written atomically; a partial commit must not be
    /// observable.
    async fn commit_export(
        &self,
        month_key: &str,
        at: DateTime<Utc>,
        audit_action: &str,
    ) -> AppResult<()>;
}
