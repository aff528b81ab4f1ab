use anyhow::{Context, Result};

use crate::domain::rules::aggregate::UnitSummary;
use crate::domain::rules::format::format_plain;
use crate::usecase::ports::export::{
    Artifact, ExportError, RekapExporter, RekapRequest, CSV_MIME,
};

pub const REKAP_CSV_FILE: &str = "Rekap_Per_Unit.csv";

pub fn rekap_csv_bytes(summary: &[UnitSummary]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["UNIT", "Total_JUMLAH"])
        .context("failed to write csv header")?;
    for entry in summary {
        writer
            .write_record([entry.unit.as_str(), format_plain(entry.total).as_str()])
            .context("failed to write csv record")?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv: {err}"))
}

/// Plain-text fallback for the summary download.
pub struct CsvExporter;

impl RekapExporter for CsvExporter {
    fn export_rekap(&self, request: &RekapRequest<'_>) -> Result<Artifact, ExportError> {
        let bytes =
            rekap_csv_bytes(request.summary).map_err(|err| ExportError::Csv(format!("{err:#}")))?;
        Ok(Artifact {
            file_name: REKAP_CSV_FILE.to_string(),
            mime: CSV_MIME,
            bytes,
        })
    }
}
