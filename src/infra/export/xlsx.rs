use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::domain::entities::dataset::{BudgetRow, CellValue, Column};
use crate::domain::rules::aggregate::UnitSummary;
use crate::domain::rules::classify::classify_row;
use crate::domain::rules::style::{style_for, RenderTarget, HEADER_FILL, TEXT_ROW_FILL};
use crate::usecase::ports::export::{
    Artifact, ExportError, RekapExporter, RekapRequest, RincianExporter, RincianRequest,
    XLSX_MIME,
};

pub const RINCIAN_SHEET: &str = "Rincian";
pub const REKAP_SHEET: &str = "Rekap Per Unit";
pub const REKAP_XLSX_FILE: &str = "Rekap_Per_Unit.xlsx";
const DATA_ROW_HEIGHT: f64 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellLook {
    fill: bool,
    bold_italic: bool,
}

fn cell_look(row: &BudgetRow, column: Column) -> CellLook {
    let style = style_for(classify_row(row), RenderTarget::Spreadsheet);
    CellLook {
        fill: style.fill_cell(column),
        bold_italic: style.emphasize(column, row.cell(column)),
    }
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_background_color(Color::RGB(HEADER_FILL))
}

fn data_format(look: CellLook) -> Format {
    let mut format = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    if look.fill {
        format = format.set_background_color(Color::RGB(TEXT_ROW_FILL));
    }
    if look.bold_italic {
        format = format.set_bold().set_italic();
    }
    format
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: CellValue<'_>,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Number(Some(n)) => {
            worksheet.write_number_with_format(row, col, n, format)?;
        }
        CellValue::Text(text) if !text.is_empty() => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        _ => {
            worksheet.write_blank(row, col, format)?;
        }
    }
    Ok(())
}

/// Detail workbook: one header row plus one row per data row on a sheet
/// named "Rincian". Numbers are written as numbers, nulls as blanks.
pub fn rincian_workbook_bytes(rows: &[BudgetRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RINCIAN_SHEET)?;

    let header = header_format();
    for col in Column::ALL {
        worksheet.write_string_with_format(0, col.index() as u16, col.header(), &header)?;
    }

    for (idx, data_row) in rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for col in Column::ALL {
            let format = data_format(cell_look(data_row, col));
            write_value(
                worksheet,
                row_num,
                col.index() as u16,
                data_row.cell(col),
                &format,
            )?;
        }
        worksheet.set_row_height(row_num, DATA_ROW_HEIGHT)?;
    }

    workbook.save_to_buffer()
}

/// Two-column unit/total workbook. Totals stay raw numbers, zero included.
pub fn rekap_workbook_bytes(summary: &[UnitSummary]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REKAP_SHEET)?;

    let header = Format::new().set_bold().set_align(FormatAlign::Center);
    worksheet.write_string_with_format(0, 0, "UNIT", &header)?;
    worksheet.write_string_with_format(0, 1, "Total JUMLAH", &header)?;

    for (idx, entry) in summary.iter().enumerate() {
        let row_num = idx as u32 + 1;
        if !entry.unit.is_empty() {
            worksheet.write_string(row_num, 0, &entry.unit)?;
        }
        worksheet.write_number(row_num, 1, entry.total)?;
    }
    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 18)?;

    workbook.save_to_buffer()
}

pub struct XlsxExporter;

impl RincianExporter for XlsxExporter {
    fn export_rincian(&self, request: &RincianRequest<'_>) -> Result<Artifact, ExportError> {
        let bytes = rincian_workbook_bytes(request.rows)
            .map_err(|err| ExportError::Spreadsheet(err.to_string()))?;
        Ok(Artifact {
            file_name: format!("Rincian_{}.xlsx", request.scope),
            mime: XLSX_MIME,
            bytes,
        })
    }
}

impl RekapExporter for XlsxExporter {
    fn export_rekap(&self, request: &RekapRequest<'_>) -> Result<Artifact, ExportError> {
        let bytes = rekap_workbook_bytes(request.summary)
            .map_err(|err| ExportError::Spreadsheet(err.to_string()))?;
        Ok(Artifact {
            file_name: REKAP_XLSX_FILE.to_string(),
            mime: XLSX_MIME,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::import::xlsx::CalamineWorkbook;
    use crate::usecase::ports::source::WorkbookSource;
    use crate::usecase::services::import_service::normalize_table;

    fn row(kode: &str, uraian: &str, jumlah: Option<f64>) -> BudgetRow {
        BudgetRow {
            unit: "Biro A".to_string(),
            mak: "025.01.WA".to_string(),
            kode: kode.to_string(),
            uraian: uraian.to_string(),
            vol: Some(3.0),
            sat: "OK".to_string(),
            harga: Some(250_000.0),
            jumlah,
            ro: "12".to_string(),
            sd: String::new(),
        }
    }

    #[test]
    fn text_row_fills_every_cell() {
        let data = row("AB1234", "Program", None);
        for col in Column::ALL {
            assert!(cell_look(&data, col).fill, "column {col:?}");
            assert!(!cell_look(&data, col).bold_italic, "column {col:?}");
        }
    }

    #[test]
    fn numeric_row_emphasizes_numeric_looking_cells_only() {
        let data = row("42", "Honor", Some(750_000.0));

        assert!(cell_look(&data, Column::Kode).bold_italic);
        assert!(cell_look(&data, Column::Vol).bold_italic);
        assert!(cell_look(&data, Column::Jumlah).bold_italic);
        assert!(cell_look(&data, Column::Ro).bold_italic);
        assert!(!cell_look(&data, Column::Uraian).bold_italic);
        assert!(!cell_look(&data, Column::Mak).bold_italic);
        assert!(!cell_look(&data, Column::Sd).bold_italic);
        assert!(Column::ALL.iter().all(|col| !cell_look(&data, *col).fill));
    }

    #[test]
    fn numeric_row_checks_each_text_cell_for_a_number() {
        let decimal = BudgetRow {
            mak: "12.5".to_string(),
            sat: "-3".to_string(),
            sd: "1.2.3".to_string(),
            ..row("42", "Honor", Some(750_000.0))
        };

        assert!(cell_look(&decimal, Column::Mak).bold_italic);
        assert!(cell_look(&decimal, Column::Sat).bold_italic);
        assert!(!cell_look(&decimal, Column::Sd).bold_italic);
        assert!(!cell_look(&decimal, Column::Uraian).bold_italic);
    }

    #[test]
    fn six_digit_row_code_cell_takes_text_fill() {
        let data = row("521211", "Belanja Bahan", Some(750_000.0));

        assert!(cell_look(&data, Column::Kode).fill);
        assert!(!cell_look(&data, Column::Uraian).fill);
        assert!(Column::ALL
            .iter()
            .all(|col| cell_look(&data, *col).bold_italic));
    }

    #[test]
    fn rincian_values_survive_a_reread() {
        let rows = vec![
            row("521211", "Belanja Bahan", Some(1_000_000.0)),
            row("AB1234", "Program", None),
            BudgetRow {
                vol: Some(2.5),
                ..row("", "", Some(500.0))
            },
        ];

        let bytes = rincian_workbook_bytes(&rows).expect("workbook should build");
        let mut workbook = CalamineWorkbook::from_bytes(bytes).expect("workbook should open");
        assert_eq!(workbook.sheet_names(), vec![RINCIAN_SHEET]);

        let table = workbook.read_sheet(RINCIAN_SHEET).expect("sheet should read");
        let reread = normalize_table(RINCIAN_SHEET, &table);

        assert_eq!(reread.rows, rows);
    }

    #[test]
    fn rekap_keeps_zero_totals_as_numbers() {
        let summary = vec![
            UnitSummary {
                unit: "Biro A".to_string(),
                count: 1,
                total: 1_000_000.0,
            },
            UnitSummary {
                unit: "Biro B".to_string(),
                count: 0,
                total: 0.0,
            },
        ];

        let bytes = rekap_workbook_bytes(&summary).expect("workbook should build");
        let mut workbook = CalamineWorkbook::from_bytes(bytes).expect("workbook should open");
        let table = workbook.read_sheet(REKAP_SHEET).expect("sheet should read");

        assert_eq!(table.columns, vec!["UNIT", "Total JUMLAH"]);
        assert_eq!(
            table.rows,
            vec![vec!["Biro A", "1000000"], vec!["Biro B", "0"]]
        );
    }
}
