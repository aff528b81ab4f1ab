use std::sync::Arc;

use anyhow::{bail, Result};

use crate::config::ReportConfig;
use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::view::ViewMode;
use crate::domain::rules::aggregate::{per_unit_summary, total_six_digit};
use crate::infra::export::csv::CsvExporter;
use crate::infra::export::pdf::document::PdfExporter;
use crate::infra::export::xlsx::XlsxExporter;
use crate::usecase::ports::export::{
    Artifact, RekapExporter, RekapRequest, RincianExporter, RincianRequest,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RekapTable {
    /// The xlsx summary, or the csv fallback when the workbook failed.
    pub artifact: Artifact,
    pub used_fallback: bool,
}

pub struct ExportService {
    report: ReportConfig,
    rincian_sheet: Arc<dyn RincianExporter>,
    rincian_pdf: Arc<dyn RincianExporter>,
    rekap_sheet: Arc<dyn RekapExporter>,
    rekap_fallback: Arc<dyn RekapExporter>,
    rekap_pdf: Arc<dyn RekapExporter>,
}

impl ExportService {
    pub fn new(report: ReportConfig) -> Self {
        Self {
            report,
            rincian_sheet: Arc::new(XlsxExporter),
            rincian_pdf: Arc::new(PdfExporter),
            rekap_sheet: Arc::new(XlsxExporter),
            rekap_fallback: Arc::new(CsvExporter),
            rekap_pdf: Arc::new(PdfExporter),
        }
    }

    #[cfg(test)]
    pub fn with_rekap_exporters(
        mut self,
        sheet: Arc<dyn RekapExporter>,
        fallback: Arc<dyn RekapExporter>,
        pdf: Arc<dyn RekapExporter>,
    ) -> Self {
        self.rekap_sheet = sheet;
        self.rekap_fallback = fallback;
        self.rekap_pdf = pdf;
        self
    }

    #[cfg(test)]
    pub fn with_rincian_exporters(
        mut self,
        sheet: Arc<dyn RincianExporter>,
        pdf: Arc<dyn RincianExporter>,
    ) -> Self {
        self.rincian_sheet = sheet;
        self.rincian_pdf = pdf;
        self
    }

    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    fn with_rincian_request<T>(
        &self,
        dataset: &Dataset,
        mode: &ViewMode,
        include_signature: bool,
        export: impl FnOnce(&RincianRequest<'_>) -> T,
    ) -> Result<T> {
        if !mode.shows_detail() {
            bail!("detail export is only available for a unit selection");
        }
        let rows = mode.active_rows(dataset);
        let request = RincianRequest {
            sheet_name: &dataset.sheet_name,
            scope: mode.scope_label(),
            rows: &rows,
            total: total_six_digit(&rows),
            include_signature,
            report: &self.report,
        };
        Ok(export(&request))
    }

    /// Detail workbook of the active view.
    pub fn rincian_spreadsheet(&self, dataset: &Dataset, mode: &ViewMode) -> Result<Artifact> {
        let artifact = self
            .with_rincian_request(dataset, mode, false, |request| {
                self.rincian_sheet.export_rincian(request)
            })?
            .inspect_err(|err| {
                tracing::error!(error = %err, scope = mode.scope_label(), "rincian spreadsheet failed")
            })?;
        tracing::info!(scope = mode.scope_label(), file = %artifact.file_name, "built rincian spreadsheet");
        Ok(artifact)
    }

    /// Detail PDF of the active view, signed on the last page when asked.
    pub fn rincian_pdf(
        &self,
        dataset: &Dataset,
        mode: &ViewMode,
        include_signature: bool,
    ) -> Result<Artifact> {
        let artifact = self
            .with_rincian_request(dataset, mode, include_signature, |request| {
                self.rincian_pdf.export_rincian(request)
            })?
            .inspect_err(|err| {
                tracing::error!(error = %err, scope = mode.scope_label(), "rincian pdf failed")
            })?;
        tracing::info!(
            scope = mode.scope_label(),
            signature = include_signature,
            file = %artifact.file_name,
            "built rincian pdf"
        );
        Ok(artifact)
    }

    fn with_rekap_request<T>(
        &self,
        dataset: &Dataset,
        export: impl FnOnce(&RekapRequest<'_>) -> T,
    ) -> T {
        let summary = per_unit_summary(&dataset.rows);
        tracing::debug!(
            units = summary.len(),
            six_digit_rows = summary.iter().map(|entry| entry.count).sum::<usize>(),
            "summarised units"
        );
        export(&RekapRequest {
            sheet_name: &dataset.sheet_name,
            summary: &summary,
            report: &self.report,
        })
    }

    /// Summary table. A failing workbook degrades to csv.
    pub fn rekap_table(&self, dataset: &Dataset) -> Result<RekapTable> {
        self.with_rekap_request(dataset, |request| -> Result<RekapTable> {
            match self.rekap_sheet.export_rekap(request) {
                Ok(artifact) => Ok(RekapTable {
                    artifact,
                    used_fallback: false,
                }),
                Err(err) => {
                    tracing::warn!(error = %err, "rekap spreadsheet failed, falling back to csv");
                    Ok(RekapTable {
                        artifact: self.rekap_fallback.export_rekap(request)?,
                        used_fallback: true,
                    })
                }
            }
        })
    }

    /// Summary PDF. Best-effort: `None` when it cannot be built.
    pub fn rekap_pdf(&self, dataset: &Dataset) -> Option<Artifact> {
        self.with_rekap_request(dataset, |request| {
            self.rekap_pdf.export_rekap(request)
        })
        .inspect_err(|err| tracing::warn!(error = %err, "rekap pdf skipped"))
        .ok()
    }
}
