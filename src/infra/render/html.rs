use std::fmt::Write;

use crate::domain::entities::dataset::{BudgetRow, CellValue, Column};
use crate::domain::rules::classify::classify_row;
use crate::domain::rules::format::{display_amount, display_volume};
use crate::domain::rules::style::{style_for, Emphasis, RenderTarget, RowStyle};

const TABLE_CSS: &str = concat!(
    "<style>",
    "table.dataframe{border-collapse:collapse;width:100%;font-family:Arial,Helvetica,sans-serif}",
    "table.dataframe td, table.dataframe th{padding:2px 6px;font-size:11px;line-height:1.1}",
    "table.dataframe thead th{position:sticky;top:0;background:#E0E0E0;z-index:3;text-align:center}",
    "table.dataframe td.numeric{text-align:right}",
    ".kode-text td{background:#CCE5FF}",
    ".kode-numeric td.numeric{font-weight:700;font-style:italic}",
    ".kode-6digit td{font-weight:700;font-style:italic}",
    "</style>",
);

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Display text of a cell as shown on screen and in the PDF.
pub fn display_cell(column: Column, value: CellValue<'_>) -> String {
    match value {
        CellValue::Text(text) => text.to_string(),
        CellValue::Number(n) if column == Column::Vol => display_volume(n),
        CellValue::Number(n) => display_amount(n),
    }
}

fn row_class(style: &RowStyle) -> &'static str {
    if style.background {
        "kode-text"
    } else {
        match style.emphasis {
            Emphasis::WholeRow => "kode-6digit",
            Emphasis::NumericCells => "kode-numeric",
            Emphasis::None => "",
        }
    }
}

/// Renders rows as a scrollable HTML table with a sticky header. Row classes
/// come from the KODE classification of each row.
pub fn render_table(rows: &[BudgetRow]) -> String {
    let mut html = String::from(TABLE_CSS);
    html.push_str("<div style=\"max-height:400px;overflow:auto\"><table class='dataframe'><thead><tr>");
    for col in Column::ALL {
        let _ = write!(html, "<th>{}</th>", col.header());
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        let style = style_for(classify_row(row), RenderTarget::Html);
        let _ = write!(html, "<tr class='{}'>", row_class(&style));
        for col in Column::ALL {
            let text = escape_html(&display_cell(col, row.cell(col)));
            if col.is_numeric() {
                let _ = write!(html, "<td class='numeric'>{text}</td>");
            } else {
                let _ = write!(html, "<td>{text}</td>");
            }
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kode: &str, jumlah: Option<f64>) -> BudgetRow {
        BudgetRow {
            unit: "Biro A".to_string(),
            kode: kode.to_string(),
            uraian: "Belanja <ATK>".to_string(),
            vol: Some(2.0),
            harga: Some(0.0),
            jumlah,
            ..BudgetRow::default()
        }
    }

    #[test]
    fn header_lists_all_columns() {
        let html = render_table(&[]);
        assert!(html.contains("<th>UNIT</th><th>MAK</th><th>KODE</th>"));
        assert!(html.contains("<th>RO</th><th>SD</th>"));
        assert!(html.contains("position:sticky"));
    }

    #[test]
    fn rows_carry_classification_classes() {
        let html = render_table(&[
            row("123456", Some(1_000_000.0)),
            row("AB1234", None),
            row("", Some(500.0)),
            row("42", None),
        ]);

        assert!(html.contains("<tr class='kode-6digit'>"));
        assert!(html.contains("<tr class='kode-text'>"));
        assert!(html.contains("<tr class=''>"));
        assert!(html.contains("<tr class='kode-numeric'>"));
    }

    #[test]
    fn numeric_cells_are_formatted_and_blank_when_zero() {
        let html = render_table(&[row("123456", Some(1_000_000.0))]);

        assert!(html.contains("<td class='numeric'>1.000.000</td>"));
        assert!(html.contains("<td class='numeric'>2</td>"));
        assert!(html.contains("<td class='numeric'></td>"));
        assert!(html.contains("Belanja &lt;ATK&gt;"));
    }
}
