//! Monthly auto-export engine
//!
//! Decides whether a scheduled export should run, renders the report,
//! delivers it and only then advances the idempotency guard. The guard
//! (`last_export_month`) must only ever reflect a delivered report, so a
//! render or transport failure leaves the month eligible for a retry.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};

use shared::format::month_key;
use shared::i18n::{translate, MessageKey};
use shared::types::Language;
use shared::validation::resolve_recipients;

use crate::error::AppResult;
use crate::external::mailer::{MailTransport, OutgoingMail};
use crate::services::report::ReportService;
use crate::store::ExportStore;

/// Orchestrates one auto-export run against the storage and mail seams
pub struct ExportService {
    store: Arc<dyn ExportStore>,
    mailer: Arc<dyn MailTransport>,
    renderer: ReportService,
}

/// Result of one run: whether a report went out, and why or why not
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub sent: bool,
    pub status: ExportStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Committed {
        month_key: String,
        recipient_count: usize,
    },
    SkippedDisabled,
    SkippedNoRecipients,
    SkippedNotExportDay {
        today: u32,
        export_day: i32,
    },
    SkippedAlreadySent {
        month_key: String,
    },
    Failed {
        reason: String,
    },
}

impl ExportStatus {
    fn outcome(self) -> ExportOutcome {
        let sent = matches!(self, ExportStatus::Committed { .. });
        ExportOutcome { sent, status: self }
    }
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportStatus::Committed {
                month_key,
                recipient_count,
            } => write!(
                f,
                "sent report for {} to {} recipient(s)",
                month_key, recipient_count
            ),
            ExportStatus::SkippedDisabled => write!(f, "auto-export is disabled"),
            ExportStatus::SkippedNoRecipients => {
                write!(f, "no valid recipient addresses configured")
            }
            ExportStatus::SkippedNotExportDay { today, export_day } => write!(
                f,
                "not the export day (today={}, export_day={})",
                today, export_day
            ),
            ExportStatus::SkippedAlreadySent { month_key } => {
                write!(f, "already sent for {}", month_key)
            }
            ExportStatus::Failed { reason } => write!(f, "export failed: {}", reason),
        }
    }
}

impl ExportService {
    /// Create a new ExportService instance
    pub fn new(
        store: Arc<dyn ExportStore>,
        mailer: Arc<dyn MailTransport>,
        renderer: ReportService,
    ) -> Self {
        Self {
            store,
            mailer,
            renderer,
        }
    }

    /// Run the auto-export decision chain for `today`.
    ///
    /// Gates are checked in a fixed order: enabled flag, resolvable
    /// recipients, day-of-month match, then the month guard. Render and
    /// delivery failures are reported in the outcome rather than as
    /// errors; only storage failures propagate.
    pub async fn run(
        &self,
        today: NaiveDate,
        language_override: Option<Language>,
    ) -> AppResult<ExportOutcome> {
        let settings = self.store.load_settings().await?;

        if !settings.auto_export_enabled {
            tracing::info!("[AUTOEXPORT] disabled");
            return Ok(ExportStatus::SkippedDisabled.outcome());
        }

        let recipients = resolve_recipients(
            settings.quality_emails.as_deref(),
            settings.quality_email.as_deref(),
        );
        if recipients.is_empty() {
            tracing::warn!("[AUTOEXPORT] no valid recipient addresses");
            return Ok(ExportStatus::SkippedNoRecipients.outcome());
        }

        if today.day() as i32 != settings.export_day {
            tracing::info!(
                "[AUTOEXPORT] not today (today={}, export_day={})",
                today.day(),
                settings.export_day
            );
            return Ok(ExportStatus::SkippedNotExportDay {
                today: today.day(),
                export_day: settings.export_day,
            }
            .outcome());
        }

        let mk = month_key(today);
        if settings.last_export_month.as_deref() == Some(mk.as_str()) {
            tracing::info!("[AUTOEXPORT] already sent for {}", mk);
            return Ok(ExportStatus::SkippedAlreadySent { month_key: mk }.outcome());
        }

        let language = language_override.unwrap_or(settings.report_language);
        let format = settings.export_format;
        tracing::info!(
            "[AUTOEXPORT] running for {} (language={}, format={})",
            mk,
            language.code(),
            format.code()
        );

        let lots = self.store.lots_for_report().await?;
        let document = match self.renderer.render(&lots, language, format, today) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("[AUTOEXPORT] render failed: {}", e);
                return Ok(ExportStatus::Failed {
                    reason: e.to_string(),
                }
                .outcome());
            }
        };

        let mail = OutgoingMail {
            recipients: recipients.clone(),
            subject: translate(MessageKey::MailSubject, language).to_string(),
            body: format!(
                "{}\n\n{}",
                translate(MessageKey::MailBody, language),
                translate(MessageKey::MailLegend, language)
            ),
            attachment_name: format!("LotWatch_Report_{}.{}", mk, format.file_extension()),
            attachment_mime: format.mime_type().to_string(),
            attachment: document,
        };

        if let Err(e) = self.mailer.send(mail).await {
            tracing::error!("[AUTOEXPORT] send failed: {}", e);
            return Ok(ExportStatus::Failed {
                reason: e.to_string(),
            }
            .outcome());
        }

        // The report is delivered; only now may the guard advance
        let audit_action = format!(
            "Auto export sent ({}) to {}",
            format.code(),
            recipients.join(", ")
        );
        if let Err(e) = self.store.commit_export(&mk, Utc::now(), &audit_action).await {
            // The month still looks eligible, so the next run may send a
            // duplicate; that beats marking a month sent that never was
            tracing::error!("[AUTOEXPORT] commit failed after send: {:?}", e);
            return Ok(ExportStatus::Failed {
                reason: "export state could not be persisted".to_string(),
            }
            .outcome());
        }

        tracing::info!(
            "[AUTOEXPORT] sent to {} recipient(s) ({})",
            recipients.len(),
            format.code()
        );
        Ok(ExportStatus::Committed {
            month_key: mk,
            recipient_count: recipients.len(),
        }
        .outcome())
    }
}
