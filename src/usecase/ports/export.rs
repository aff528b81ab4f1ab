use crate::config::ReportConfig;
use crate::domain::entities::dataset::BudgetRow;
use crate::domain::rules::aggregate::UnitSummary;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_MIME: &str = "application/pdf";
pub const CSV_MIME: &str = "text/csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to build spreadsheet: {0}")]
    Spreadsheet(String),
    #[error("failed to build pdf: {0}")]
    Pdf(String),
    #[error("failed to build csv: {0}")]
    Csv(String),
}

/// A generated download, held in memory until the user saves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Detail export of the active rows.
pub struct RincianRequest<'a> {
    pub sheet_name: &'a str,
    pub scope: &'a str,
    pub rows: &'a [BudgetRow],
    pub total: f64,
    pub include_signature: bool,
    pub report: &'a ReportConfig,
}

/// Unit/total export of the whole sheet.
pub struct RekapRequest<'a> {
    pub sheet_name: &'a str,
    pub summary: &'a [UnitSummary],
    pub report: &'a ReportConfig,
}

pub trait RincianExporter {
    fn export_rincian(&self, request: &RincianRequest<'_>) -> Result<Artifact, ExportError>;
}

pub trait RekapExporter {
    fn export_rekap(&self, request: &RekapRequest<'_>) -> Result<Artifact, ExportError>;
}
