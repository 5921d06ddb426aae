//! Auto-export engine tests
//!
//! Exercises the scheduled export decision chain against the in-memory
//! store and a recording mail transport:
//! - Gate order: enabled flag, recipient resolution, day match, month guard
//! - Send-then-commit: the idempotency guard only advances after delivery
//! - One report per calendar month, retried months stay eligible
//! - Render, transport and commit failures

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use lotwatch_backend::external::{MailTransport, OutgoingMail, TransportError};
use lotwatch_backend::services::export::{ExportService, ExportStatus};
use lotwatch_backend::services::report::ReportService;
use lotwatch_backend::store::MemoryExportStore;
use shared::i18n::{translate, MessageKey};
use shared::models::{ExportSettings, Lot};
use shared::types::{ExportFormat, Language};

// ============================================================================
// Test Doubles
// ============================================================================

/// Mail transport that records deliveries; sends can be made to fail
struct RecordingMailer {
    deliveries: Mutex<Vec<OutgoingMail>>,
    fail_sends: AtomicBool,
}

impl RecordingMailer {
    fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    fn deliveries(&self) -> Vec<OutgoingMail> {
        self.deliveries.lock().unwrap().clone()
    }

    fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Send("SMTP relay unavailable".to_string()));
        }
        self.deliveries.lock().unwrap().push(mail);
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Settings with auto-export switched on and two recipients
fn enabled_settings(export_day: i32) -> ExportSettings {
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
    let mut settings = ExportSettings::with_defaults(Uuid::new_v4(), now);
    settings.auto_export_enabled = true;
    settings.quality_emails = Some("qa1@plant.example, qa2@plant.example".to_string());
    settings.export_day = export_day;
    settings
}

fn sample_lots() -> Vec<Lot> {
    let created = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
    let lot = |name: &str, part: &str, lot_no: &str, expiry: Option<NaiveDate>| Lot {
        id: Uuid::new_v4(),
        product_name: name.to_string(),
        part_number: part.to_string(),
        lot_number: lot_no.to_string(),
        expiry_date: expiry,
        product_type: "consumable".to_string(),
        quantity: 3,
        created_at: created,
        updated_at: created,
    };
    vec![
        lot("Reagent Kit A", "PN-1001", "LOT-A1", Some(date(2025, 6, 30))),
        lot("Calibration Fluid", "PN-1002", "LOT-B2", Some(date(2025, 8, 20))),
        lot("Spare Gasket", "PN-1004", "LOT-D4", None),
    ]
}

struct Harness {
    store: Arc<MemoryExportStore>,
    mailer: Arc<RecordingMailer>,
    service: ExportService,
}

fn harness(settings: ExportSettings) -> Harness {
    let store = Arc::new(MemoryExportStore::new(settings, sample_lots()));
    let mailer = Arc::new(RecordingMailer::new());
    let service = ExportService::new(
        store.clone(),
        mailer.clone(),
        ReportService::new("/nonexistent/fonts"),
    );
    Harness {
        store,
        mailer,
        service,
    }
}

// ============================================================================
// Gate Tests
// ============================================================================

#[tokio::test]
async fn test_disabled_schedule_skips_without_sending() {
    let mut settings = enabled_settings(1);
    settings.auto_export_enabled = false;
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(!outcome.sent);
    assert_eq!(outcome.status, ExportStatus::SkippedDisabled);
    assert!(h.mailer.deliveries().is_empty());
    assert!(h.store.settings().unwrap().last_export_month.is_none());
}

#[tokio::test]
async fn test_disabled_gate_wins_over_every_other_gate() {
    // Disabled, no recipients, wrong day: the enabled flag is checked first
    let mut settings = enabled_settings(5);
    settings.auto_export_enabled = false;
    settings.quality_emails = None;
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();
    assert_eq!(outcome.status, ExportStatus::SkippedDisabled);
}

#[tokio::test]
async fn test_unresolvable_recipients_skip_the_run() {
    let mut settings = enabled_settings(1);
    settings.quality_emails = Some("not-an-address; also@bad".to_string());
    settings.quality_email = None;
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(!outcome.sent);
    assert_eq!(outcome.status, ExportStatus::SkippedNoRecipients);
    assert!(h.mailer.deliveries().is_empty());
}

#[tokio::test]
async fn test_wrong_day_of_month_skips() {
    let h = harness(enabled_settings(5));

    let outcome = h.service.run(date(2025, 8, 4), None).await.unwrap();

    assert!(!outcome.sent);
    assert_eq!(
        outcome.status,
        ExportStatus::SkippedNotExportDay {
            today: 4,
            export_day: 5,
        }
    );
    assert!(h.mailer.deliveries().is_empty());
}

#[tokio::test]
async fn test_month_guard_skips_an_already_sent_month() {
    let mut settings = enabled_settings(1);
    settings.last_export_month = Some("2025-08".to_string());
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(!outcome.sent);
    assert_eq!(
        outcome.status,
        ExportStatus::SkippedAlreadySent {
            month_key: "2025-08".to_string(),
        }
    );
    assert!(h.mailer.deliveries().is_empty());
}

#[tokio::test]
async fn test_stale_guard_from_a_previous_month_does_not_block() {
    let mut settings = enabled_settings(1);
    settings.last_export_month = Some("2025-07".to_string());
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(outcome.sent);
    assert_eq!(h.store.settings().unwrap().last_export_month.as_deref(), Some("2025-08"));
}

// ============================================================================
// Delivery Tests
// ============================================================================

#[tokio::test]
async fn test_sends_and_commits_on_the_export_day() {
    let h = harness(enabled_settings(1));

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(outcome.sent);
    assert_eq!(
        outcome.status,
        ExportStatus::Committed {
            month_key: "2025-08".to_string(),
            recipient_count: 2,
        }
    );

    let deliveries = h.mailer.deliveries();
    assert_eq!(deliveries.len(), 1);
    let mail = &deliveries[0];
    assert_eq!(
        mail.recipients,
        vec!["qa1@plant.example", "qa2@plant.example"]
    );
    // Default settings: French, PDF
    assert_eq!(mail.subject, translate(MessageKey::MailSubject, Language::Fr));
    assert!(mail.body.starts_with(translate(MessageKey::MailBody, Language::Fr)));
    assert!(mail.body.ends_with(translate(MessageKey::MailLegend, Language::Fr)));
    assert_eq!(mail.attachment_name, "LotWatch_Report_2025-08.pdf");
    assert_eq!(mail.attachment_mime, "application/pdf");
    assert!(mail.attachment.starts_with(b"%PDF-1.5"));

    let settings = h.store.settings().unwrap();
    assert_eq!(settings.last_export_month.as_deref(), Some("2025-08"));
    assert!(settings.last_export_at.is_some());
}

#[tokio::test]
async fn test_committed_run_appends_one_audit_entry() {
    let h = harness(enabled_settings(1));

    h.service.run(date(2025, 8, 1), None).await.unwrap();

    let audit = h.store.audit_entries().unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(
        audit[0].action,
        "Auto export sent (pdf) to qa1@plant.example, qa2@plant.example"
    );
    assert!(audit[0].user_id.is_none());
}

#[tokio::test]
async fn test_second_run_in_the_same_month_is_idempotent() {
    let h = harness(enabled_settings(1));

    let first = h.service.run(date(2025, 8, 1), None).await.unwrap();
    let second = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(first.sent);
    assert!(!second.sent);
    assert_eq!(
        second.status,
        ExportStatus::SkippedAlreadySent {
            month_key: "2025-08".to_string(),
        }
    );
    assert_eq!(h.mailer.deliveries().len(), 1);
    assert_eq!(h.store.audit_entries().unwrap().len(), 1);
}

#[tokio::test]
async fn test_next_month_sends_again() {
    let h = harness(enabled_settings(1));

    let august = h.service.run(date(2025, 8, 1), None).await.unwrap();
    let september = h.service.run(date(2025, 9, 1), None).await.unwrap();

    assert!(august.sent);
    assert!(september.sent);
    assert_eq!(h.mailer.deliveries().len(), 2);
    assert_eq!(
        h.store.settings().unwrap().last_export_month.as_deref(),
        Some("2025-09")
    );
}

#[tokio::test]
async fn test_csv_format_produces_csv_attachment() {
    let mut settings = enabled_settings(1);
    settings.export_format = ExportFormat::Csv;
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(outcome.sent);
    let deliveries = h.mailer.deliveries();
    let mail = &deliveries[0];
    assert_eq!(mail.attachment_name, "LotWatch_Report_2025-08.csv");
    assert_eq!(mail.attachment_mime, "text/csv; charset=utf-8");
    assert_eq!(&mail.attachment[..3], &[0xEF, 0xBB, 0xBF]);

    let audit = h.store.audit_entries().unwrap();
    assert!(audit[0].action.starts_with("Auto export sent (csv) to "));
}

#[tokio::test]
async fn test_recipients_merge_both_settings_fields() {
    let mut settings = enabled_settings(1);
    settings.quality_emails = Some("qa1@plant.example\nqa2@plant.example, bad-entry".to_string());
    settings.quality_email = Some("Legacy@Plant.example".to_string());
    let h = harness(settings);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert_eq!(
        outcome.status,
        ExportStatus::Committed {
            month_key: "2025-08".to_string(),
            recipient_count: 3,
        }
    );
    let deliveries = h.mailer.deliveries();
    assert_eq!(
        deliveries[0].recipients,
        vec![
            "qa1@plant.example",
            "qa2@plant.example",
            "legacy@plant.example"
        ]
    );
    let audit = h.store.audit_entries().unwrap();
    assert!(audit[0].action.contains("legacy@plant.example"));
}

#[tokio::test]
async fn test_language_override_beats_configured_language() {
    let h = harness(enabled_settings(1));

    h.service
        .run(date(2025, 8, 1), Some(Language::En))
        .await
        .unwrap();

    let deliveries = h.mailer.deliveries();
    assert_eq!(
        deliveries[0].subject,
        translate(MessageKey::MailSubject, Language::En)
    );
    assert!(deliveries[0]
        .body
        .contains(translate(MessageKey::MailLegend, Language::En)));
}

#[tokio::test]
async fn test_configured_language_applies_without_override() {
    let mut settings = enabled_settings(1);
    settings.report_language = Language::Ar;
    let h = harness(settings);

    h.service.run(date(2025, 8, 1), None).await.unwrap();

    let deliveries = h.mailer.deliveries();
    assert_eq!(
        deliveries[0].subject,
        translate(MessageKey::MailSubject, Language::Ar)
    );
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_send_failure_leaves_the_month_eligible() {
    let h = harness(enabled_settings(1));
    h.mailer.set_fail_sends(true);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(!outcome.sent);
    assert!(matches!(outcome.status, ExportStatus::Failed { .. }));
    assert!(h.store.settings().unwrap().last_export_month.is_none());
    assert!(h.store.audit_entries().unwrap().is_empty());

    // The transport recovers; the same month can still be sent
    h.mailer.set_fail_sends(false);
    let retry = h.service.run(date(2025, 8, 1), None).await.unwrap();
    assert!(retry.sent);
    assert_eq!(h.mailer.deliveries().len(), 1);
}

#[tokio::test]
async fn test_commit_failure_after_send_reports_failure() {
    let h = harness(enabled_settings(1));
    h.store.set_fail_commits(true);

    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();

    assert!(!outcome.sent);
    assert_eq!(
        outcome.status,
        ExportStatus::Failed {
            reason: "export state could not be persisted".to_string(),
        }
    );
    // The mail went out before the commit was attempted; the guard did
    // not advance, so the month stays eligible for a retry
    assert_eq!(h.mailer.deliveries().len(), 1);
    assert!(h.store.settings().unwrap().last_export_month.is_none());
}

#[tokio::test]
async fn test_outcome_status_renders_for_cron_logs() {
    let h = harness(enabled_settings(1));
    let outcome = h.service.run(date(2025, 8, 1), None).await.unwrap();
    assert_eq!(
        outcome.status.to_string(),
        "sent report for 2025-08 to 2 recipient(s)"
    );

    let skipped = h.service.run(date(2025, 8, 1), None).await.unwrap();
    assert_eq!(skipped.status.to_string(), "already sent for 2025-08");
}
