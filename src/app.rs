use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::domain::entities::view::{view_options, ViewMode};
use crate::infra::import::xlsx::CalamineWorkbook;
use crate::ui::state::app_state::{AppState, Screen};
use crate::usecase::ports::export::{Artifact, CSV_MIME, PDF_MIME};
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::{build_snapshot, METRIC_LABEL, SUMMARY_HINT};

const SIDEBAR_STYLE: &str = "width: 260px; flex-shrink: 0; padding: 12px; background: #f3f4f6; display: flex; flex-direction: column; gap: 10px; min-height: 100vh;";
const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 6px 10px; border-radius: 6px; cursor: pointer; text-align: left;";
const SUMMARY_CELL_STYLE: &str = "border: 1px solid #bbb; padding: 4px 8px;";

fn extension_filter(artifact: &Artifact) -> (&'static str, &'static str) {
    match artifact.mime {
        PDF_MIME => ("PDF", "pdf"),
        CSV_MIME => ("CSV", "csv"),
        _ => ("Excel", "xlsx"),
    }
}

/// Asks where to store the artifact and writes it. `Ok(None)` means the
/// user cancelled the dialog.
fn save_artifact(artifact: &Artifact) -> Result<Option<PathBuf>> {
    let (label, ext) = extension_filter(artifact);
    let Some(path) = FileDialog::new()
        .set_file_name(artifact.file_name.as_str())
        .add_filter(label, &[ext])
        .save_file()
    else {
        return Ok(None);
    };
    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "saved artifact");
    Ok(Some(path))
}

fn save_status(result: Result<Option<PathBuf>>) -> String {
    match result {
        Ok(Some(path)) => format!("Tersimpan: {}", path.display()),
        Ok(None) => "Unduhan dibatalkan".to_string(),
        Err(err) => format!("Gagal menyimpan: {err:#}"),
    }
}

fn export_status(built: Result<Artifact>) -> String {
    match built {
        Ok(artifact) => save_status(save_artifact(&artifact)),
        Err(err) => format!("Gagal export: {err:#}"),
    }
}

fn open_workbook(path: &Path) -> Result<ImportService> {
    let workbook = CalamineWorkbook::open(path)?;
    Ok(ImportService::new(Box::new(workbook)))
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let export_service = use_hook(|| Rc::new(ExportService::new(config.report.clone())));

    let AppState {
        mut source_name,
        mut workbook,
        mut sheets,
        mut selected_sheet,
        mut dataset,
        mut view_value,
        mut include_signature,
        mut busy,
        mut status,
    } = AppState::new(config.report.signature.enabled);

    let title = export_service.report().dashboard_title();
    let mode = ViewMode::from_option_value(&view_value());
    let snapshot = dataset.read().as_ref().map(|data| build_snapshot(data, &mode));
    let options = dataset.read().as_ref().map(view_options).unwrap_or_default();
    let screen = Screen::for_state(workbook.read().is_some(), snapshot.is_some());

    let upload_button = rsx! {
        button {
            style: "{BUTTON_STYLE}",
            disabled: busy(),
            onclick: move |_| {
                if busy() {
                    return;
                }
                let Some(path) = FileDialog::new()
                    .add_filter("File Excel", &["xlsx"])
                    .pick_file() else {
                    *status.write() = "Unggah dibatalkan".to_string();
                    return;
                };

                *busy.write() = true;
                match open_workbook(&path) {
                    Ok(mut service) => {
                        let names = service.sheet_names();
                        let first = names.first().cloned();
                        let loaded = first
                            .as_deref()
                            .map(|sheet| service.load_dataset(sheet))
                            .transpose();
                        match loaded {
                            Ok(data) => {
                                *status.write() = format!(
                                    "Memuat {} ({} baris)",
                                    path.display(),
                                    data.as_ref().map(|d| d.rows.len()).unwrap_or(0)
                                );
                                *dataset.write() = data;
                            }
                            Err(err) => {
                                *dataset.write() = None;
                                *status.write() = format!("Gagal membaca sheet: {err:#}");
                            }
                        }
                        *source_name.write() = path
                            .file_name()
                            .and_then(|name| name.to_str())
                            .map(str::to_string);
                        *sheets.write() = names;
                        *selected_sheet.write() = first;
                        *view_value.write() = ViewMode::Summary.option_value();
                        *workbook.write() = Some(service);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "upload failed");
                        *status.write() = format!("Gagal membuka file: {err:#}");
                    }
                }
                *busy.write() = false;
            },
            "Upload File Excel"
        }
    };

    let sheet_selector = screen.shows_sheet_selector().then(|| {
        rsx! {
            if let Some(name) = source_name() {
                span { style: "font-size: 12px;", "{name}" }
            }
            label { "Pilih Sheet" }
            select {
                disabled: busy(),
                value: selected_sheet().unwrap_or_default(),
                onchange: move |event| {
                    let sheet = event.value();
                    *busy.write() = true;
                    let loaded = workbook
                        .write()
                        .as_mut()
                        .map(|service| service.load_dataset(&sheet));
                    match loaded {
                        Some(Ok(data)) => {
                            *status.write() = format!("Sheet {sheet} ({} baris)", data.rows.len());
                            *dataset.write() = Some(data);
                            *view_value.write() = ViewMode::Summary.option_value();
                        }
                        Some(Err(err)) => {
                            *dataset.write() = None;
                            *status.write() = format!("Gagal membaca sheet: {err:#}");
                        }
                        None => {
                            *status.write() = "Belum ada file".to_string();
                        }
                    }
                    *selected_sheet.write() = Some(sheet);
                    *busy.write() = false;
                },
                for sheet in sheets() {
                    option { value: "{sheet}", "{sheet}" }
                }
            }
        }
    });

    let service_for_rincian_xlsx = export_service.clone();
    let service_for_rincian_pdf = export_service.clone();
    let service_for_rekap = export_service.clone();
    let service_for_rekap_pdf = export_service.clone();
    let detail_mode = mode.clone();
    let detail_mode_pdf = mode.clone();
    let shows_detail = mode.shows_detail();

    let view_controls = (screen == Screen::Dashboard).then(|| {
        rsx! {
            h3 { "Filter" }
            label { "Pilih Unit" }
            select {
                disabled: busy(),
                value: "{view_value}",
                onchange: move |event| {
                    *view_value.write() = event.value();
                },
                for opt in options {
                    option { value: "{opt.value}", "{opt.label}" }
                }
            }

            label {
                input {
                    r#type: "checkbox",
                    checked: include_signature(),
                    onchange: move |event| {
                        let checked = event.value().parse::<bool>().unwrap_or(false);
                        *include_signature.write() = checked;
                    },
                }
                " Sertakan tanda tangan pada PDF"
            }

            if shows_detail {
                h3 { "Export" }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(data) = dataset() else {
                            return;
                        };
                        *busy.write() = true;
                        *status.write() = export_status(
                            service_for_rincian_xlsx.rincian_spreadsheet(&data, &detail_mode),
                        );
                        *busy.write() = false;
                    },
                    "⬇ Download Excel"
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(data) = dataset() else {
                            return;
                        };
                        *busy.write() = true;
                        *status.write() = export_status(service_for_rincian_pdf.rincian_pdf(
                            &data,
                            &detail_mode_pdf,
                            include_signature(),
                        ));
                        *busy.write() = false;
                    },
                    "⬇ Download PDF (Landscape)"
                }
            }
        }
    });

    let main_body = match snapshot {
        Some(snapshot) if screen == Screen::Dashboard => rsx! {
            div {
                style: "margin-bottom: 12px;",
                div { style: "font-size: 14px; color: #4b5563;", "{METRIC_LABEL}" }
                div { style: "font-size: 32px; font-weight: 600;", "{snapshot.total_display}" }
                div { style: "font-size: 12px; color: #6b7280;", "{snapshot.row_count} baris" }
            }

            if let Some(summary) = snapshot.summary.clone() {
                h2 { "Rekap Per Unit" }
                table {
                    style: "border-collapse: collapse; background: #fff;",
                    thead {
                        tr {
                            th { style: "{SUMMARY_CELL_STYLE} background: #E0E0E0;", "UNIT" }
                            th { style: "{SUMMARY_CELL_STYLE} background: #E0E0E0;", "Total JUMLAH" }
                        }
                    }
                    tbody {
                        for line in summary {
                            tr {
                                td { style: "{SUMMARY_CELL_STYLE}", "{line.unit}" }
                                td { style: "{SUMMARY_CELL_STYLE} text-align: right;", "{line.total_display}" }
                            }
                        }
                    }
                }
                div {
                    style: "display: flex; gap: 8px; margin: 12px 0;",
                    button {
                        style: "{BUTTON_STYLE}",
                        disabled: busy(),
                        onclick: move |_| {
                            let Some(data) = dataset() else {
                                return;
                            };
                            *busy.write() = true;
                            let message = match service_for_rekap.rekap_table(&data) {
                                Ok(table) if table.used_fallback => format!(
                                    "Excel gagal, memakai CSV. {}",
                                    save_status(save_artifact(&table.artifact))
                                ),
                                Ok(table) => save_status(save_artifact(&table.artifact)),
                                Err(err) => format!("Gagal export rekap: {err:#}"),
                            };
                            *status.write() = message;
                            *busy.write() = false;
                        },
                        "⬇ Download Rekap Excel"
                    }
                    button {
                        style: "{BUTTON_STYLE}",
                        disabled: busy(),
                        onclick: move |_| {
                            let Some(data) = dataset() else {
                                return;
                            };
                            *busy.write() = true;
                            let message = match service_for_rekap_pdf.rekap_pdf(&data) {
                                Some(pdf) => save_status(save_artifact(&pdf)),
                                None => "PDF rekap tidak tersedia".to_string(),
                            };
                            *status.write() = message;
                            *busy.write() = false;
                        },
                        "⬇ Download Rekap PDF"
                    }
                }
                p {
                    style: "padding: 8px 12px; background: #e0f2fe; border-radius: 6px;",
                    "{SUMMARY_HINT}"
                }
            }

            if let Some(html) = snapshot.table_html.clone() {
                h2 { "Tabel Data" }
                div { dangerous_inner_html: "{html}" }
            }
        },
        _ if screen == Screen::SheetPicker => rsx! {
            p { "Sheet ini tidak dapat dibaca. Pilih sheet lain di sidebar." }
        },
        _ => rsx! {
            p { "Unggah file Excel untuk memulai." }
        },
    };

    rsx! {
        div {
            style: "display: flex; font-family: Arial, Helvetica, sans-serif;",
            aside {
                style: "{SIDEBAR_STYLE}",
                {upload_button}
                {sheet_selector}
                {view_controls}
                span { style: "font-size: 12px; color: #374151;", "{status}" }
            }

            main {
                style: "padding: 16px; flex: 1; min-width: 0;",
                h1 { "📊 {title}" }
                {main_body}
            }
        }
    }
}
