//! Business logic services for LotWatch

pub mod audit;
pub mod export;
pub mod lot;
pub mod report;
pub mod settings;

pub use audit::AuditService;
pub use export::{ExportOutcome, ExportService, ExportStatus};
pub use lot::LotService;
pub use report::{ReportService, RenderError};
pub use settings::SettingsService;
