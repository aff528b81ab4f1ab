use crate::config::{PdfLayoutConfig, ReportConfig};
use crate::domain::entities::dataset::{BudgetRow, Column};
use crate::domain::rules::classify::classify_row;
use crate::domain::rules::format::{display_amount, format_thousands};
use crate::domain::rules::style::{style_for, RenderTarget, TEXT_ROW_FILL};
use crate::infra::export::pdf::layout::{
    fit_widths, stamp_pages, Align, ComposedPage, Composer, PageGeometry, Rgb, SignatureBlock,
    TableCell, TableColumn, TableRow, TableStyle, MM,
};
use crate::infra::export::pdf::metrics::Face;
use crate::infra::export::pdf::render::render_pdf;
use crate::infra::render::html::display_cell;
use crate::usecase::ports::export::{
    Artifact, ExportError, RekapExporter, RekapRequest, RincianExporter, RincianRequest, PDF_MIME,
};

pub const REKAP_PDF_FILE: &str = "Rekap_Per_Unit.pdf";

const HEADER_GREY: u32 = 0xD3D3D3;
const GRID_GREY: u32 = 0x808080;

fn column_width_mm(column: Column) -> f32 {
    match column {
        Column::Unit => 33.0,
        Column::Mak => 35.0,
        Column::Kode => 19.0,
        Column::Uraian => 150.0,
        Column::Vol => 15.0,
        Column::Sat => 15.0,
        Column::Harga => 27.0,
        Column::Jumlah => 30.0,
        Column::Ro => 7.0,
        Column::Sd => 10.0,
    }
}

fn rincian_table_style() -> TableStyle {
    TableStyle {
        font_size: 8.0,
        leading: 10.0,
        padding_x: 4.0,
        padding_y: 4.0,
        header_background: Rgb::from_hex(HEADER_GREY),
        grid: Rgb::from_hex(GRID_GREY),
        grid_width: 0.25,
    }
}

fn rekap_table_style() -> TableStyle {
    TableStyle {
        font_size: 10.0,
        leading: 12.0,
        padding_x: 6.0,
        padding_y: 3.0,
        ..rincian_table_style()
    }
}

fn rincian_columns(geometry: &PageGeometry) -> Vec<TableColumn> {
    let targets: Vec<f32> = Column::ALL
        .iter()
        .map(|col| column_width_mm(*col) * MM)
        .collect();
    let widths = fit_widths(&targets, geometry.printable_width());
    Column::ALL
        .iter()
        .zip(widths)
        .map(|(col, width)| TableColumn {
            title: col.header().to_string(),
            width,
            align: if col.is_numeric() {
                Align::Right
            } else {
                Align::Left
            },
        })
        .collect()
}

fn rincian_row(row: &BudgetRow) -> TableRow {
    let style = style_for(classify_row(row), RenderTarget::Pdf);
    TableRow {
        cells: Column::ALL
            .iter()
            .map(|col| TableCell {
                text: display_cell(*col, row.cell(*col)),
                face: if style.emphasize(*col, row.cell(*col)) {
                    Face::BoldOblique
                } else {
                    Face::Regular
                },
            })
            .collect(),
        background: style.background.then(|| Rgb::from_hex(TEXT_ROW_FILL)),
    }
}

pub fn unit_line(scope: &str, total: f64) -> String {
    format!(
        "Unit: {scope}                                        Total: {}",
        format_thousands(total)
    )
}

/// Composes and stamps the detail document. `signature` holds the lines of
/// the signature block, or `None` when it is switched off.
pub fn compose_rincian(
    request: &RincianRequest<'_>,
    signature: Option<Vec<String>>,
) -> (PageGeometry, Vec<ComposedPage>) {
    let geometry = PageGeometry::a4_landscape(&request.report.pdf);
    let mut composer = Composer::new(geometry);

    composer.paragraph(
        &request.report.document_title(request.sheet_name),
        Face::Bold,
        11.0,
        14.0,
        true,
    );
    composer.spacer(6.0 + 4.0);
    composer.paragraph(
        &unit_line(request.scope, request.total),
        Face::Regular,
        9.0,
        12.0,
        false,
    );
    composer.spacer(6.0);

    let columns = rincian_columns(&geometry);
    let rows: Vec<TableRow> = request.rows.iter().map(rincian_row).collect();
    composer.table(&columns, &rows, &rincian_table_style());

    let mut pages = composer.finish();
    let block = signature.map(|lines| SignatureBlock {
        lines,
        caret_indent: request.report.signature.caret_indent_mm * MM,
    });
    stamp_pages(&mut pages, &geometry, block.as_ref());
    (geometry, pages)
}

fn rekap_geometry(report: &ReportConfig) -> PageGeometry {
    PageGeometry::a4_landscape(&PdfLayoutConfig {
        margin_bottom_mm: report.pdf.margin_top_mm,
        ..report.pdf.clone()
    })
}

/// Summary document: title and a two-column unit/total table, no footer.
pub fn compose_rekap(request: &RekapRequest<'_>) -> (PageGeometry, Vec<ComposedPage>) {
    let geometry = rekap_geometry(request.report);
    let mut composer = Composer::new(geometry);

    composer.paragraph(
        &request.report.document_title(request.sheet_name),
        Face::Bold,
        14.0,
        18.0,
        true,
    );
    composer.spacer(6.0 + 6.0);

    let widths = fit_widths(&[160.0 * MM, 50.0 * MM], geometry.printable_width());
    let columns = vec![
        TableColumn {
            title: "UNIT".to_string(),
            width: widths[0],
            align: Align::Left,
        },
        TableColumn {
            title: "Total JUMLAH".to_string(),
            width: widths[1],
            align: Align::Right,
        },
    ];
    let rows: Vec<TableRow> = request
        .summary
        .iter()
        .map(|entry| TableRow {
            cells: vec![
                TableCell {
                    text: entry.unit.clone(),
                    face: Face::Regular,
                },
                TableCell {
                    text: display_amount(Some(entry.total)),
                    face: Face::Regular,
                },
            ],
            background: None,
        })
        .collect();
    composer.table(&columns, &rows, &rekap_table_style());

    (geometry, composer.finish())
}

pub struct PdfExporter;

impl RincianExporter for PdfExporter {
    fn export_rincian(&self, request: &RincianRequest<'_>) -> Result<Artifact, ExportError> {
        let signature = request
            .include_signature
            .then(|| request.report.signature.lines_for_today());
        let (geometry, pages) = compose_rincian(request, signature);
        let title = request.report.document_title(request.sheet_name);
        let bytes = render_pdf(&title, &geometry, &pages)
            .map_err(|err| ExportError::Pdf(err.to_string()))?;
        tracing::debug!(pages = pages.len(), scope = request.scope, "rendered rincian pdf");
        Ok(Artifact {
            file_name: format!("Rincian_{}.pdf", request.scope),
            mime: PDF_MIME,
            bytes,
        })
    }
}

impl RekapExporter for PdfExporter {
    fn export_rekap(&self, request: &RekapRequest<'_>) -> Result<Artifact, ExportError> {
        let (geometry, pages) = compose_rekap(request);
        let title = request.report.document_title(request.sheet_name);
        let bytes = render_pdf(&title, &geometry, &pages)
            .map_err(|err| ExportError::Pdf(err.to_string()))?;
        Ok(Artifact {
            file_name: REKAP_PDF_FILE.to_string(),
            mime: PDF_MIME,
            bytes,
        })
    }
}
