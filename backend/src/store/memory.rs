//! In-memory export store used by tests and local development

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use shared::models::{AuditLogEntry, ExportSettings, Lot};

use crate::error::{AppError, AppResult};
use crate::store::ExportStore;

/// Export store holding its state behind a mutex. Commits can be made to
/// fail on demand so rollback behavior is observable.
pub struct MemoryExportStore {
    state: Mutex<MemoryState>,
    fail_commits: AtomicBool,
}

struct MemoryState {
    settings: ExportSettings,
    lots: Vec<Lot>,
    audit: Vec<AuditLogEntry>,
}

impl MemoryExportStore {
    pub fn new(settings: ExportSettings, lots: Vec<Lot>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                settings,
                lots,
                audit: Vec::new(),
            }),
            fail_commits: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current settings row
    pub fn settings(&self) -> AppResult<ExportSettings> {
        Ok(self.lock()?.settings.clone())
    }

    /// Snapshot of the audit log, oldest first
    pub fn audit_entries(&self) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self.lock()?.audit.clone())
    }

    /// Make every subsequent commit fail
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("export store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ExportStore for MemoryExportStore {
    async fn load_settings(&self) -> AppResult<ExportSettings> {
        self.settings()
    }

    async fn lots_for_report(&self) -> AppResult<Vec<Lot>> {
        let mut lots = self.lock()?.lots.clone();
        lots.sort_by(|a, b| {
            let a_key = (a.expiry_date.unwrap_or(NaiveDate::MAX), &a.product_name);
            let b_key = (b.expiry_date.unwrap_or(NaiveDate::MAX), &b.product_name);
            a_key.cmp(&b_key)
        });
        Ok(lots)
    }

    async fn commit_export(
        &self,
        month_key: &str,
        at: DateTime<Utc>,
        audit_action: &str,
    ) -> AppResult<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(AppError::Internal("commit rejected".to_string()));
        }

        let mut state = self.lock()?;
        state.settings.last_export_month = Some(month_key.to_string());
        state.settings.last_export_at = Some(at);
        state.settings.updated_at = at;
        state.audit.push(AuditLogEntry {
            id: Uuid::new_v4(),
            action: audit_action.to_string(),
            user_id: None,
            created_at: at,
        });
        Ok(())
    }
}
