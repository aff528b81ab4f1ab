use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::dataset::{CellValue, Column};
use crate::domain::rules::classify::CodeClass;

static NUMERIC_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("valid regex"));

/// Background of text-class rows (and of the six-digit KODE cell in xlsx).
pub const TEXT_ROW_FILL: u32 = 0xCCE5FF;
pub const HEADER_FILL: u32 = 0xE0E0E0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Html,
    Spreadsheet,
    Pdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    None,
    /// Bold+italic only on numeric cells. Which cells count as numeric is
    /// target specific, see [`RowStyle::emphasize`].
    NumericCells,
    WholeRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    pub background: bool,
    pub emphasis: Emphasis,
    /// Paint the KODE cell with [`TEXT_ROW_FILL`] regardless of `background`.
    pub code_cell_fill: bool,
    target: RenderTarget,
}

pub fn style_for(class: CodeClass, target: RenderTarget) -> RowStyle {
    let (background, emphasis, code_cell_fill) = match (class, target) {
        (CodeClass::Empty, _) => (false, Emphasis::None, false),
        (CodeClass::Text, _) => (true, Emphasis::None, false),
        (CodeClass::SixDigit, RenderTarget::Spreadsheet) => (false, Emphasis::WholeRow, true),
        (CodeClass::SixDigit, _) => (false, Emphasis::WholeRow, false),
        (CodeClass::Numeric, RenderTarget::Pdf) => (false, Emphasis::None, false),
        (CodeClass::Numeric, _) => (false, Emphasis::NumericCells, false),
    };
    RowStyle {
        background,
        emphasis,
        code_cell_fill,
        target,
    }
}

impl RowStyle {
    /// Whether the cell at `column` holding `value` is drawn bold+italic.
    pub fn emphasize(&self, column: Column, value: CellValue<'_>) -> bool {
        match self.emphasis {
            Emphasis::None => false,
            Emphasis::WholeRow => true,
            Emphasis::NumericCells => match self.target {
                RenderTarget::Spreadsheet => is_numeric_looking(value),
                RenderTarget::Html | RenderTarget::Pdf => column.is_numeric(),
            },
        }
    }

    pub fn fill_cell(&self, column: Column) -> bool {
        self.background || (self.code_cell_fill && column == Column::Kode)
    }
}

/// A number, or text shaped like an integer/decimal literal.
pub fn is_numeric_looking(value: CellValue<'_>) -> bool {
    match value {
        CellValue::Number(n) => n.is_some(),
        CellValue::Text(text) => NUMERIC_TEXT.is_match(text.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rows_fill_every_target() {
        for target in [RenderTarget::Html, RenderTarget::Spreadsheet, RenderTarget::Pdf] {
            let style = style_for(CodeClass::Text, target);
            assert!(style.background);
            assert!(!style.emphasize(Column::Jumlah, CellValue::Number(Some(1.0))));
            assert!(Column::ALL.iter().all(|col| style.fill_cell(*col)));
        }
    }

    #[test]
    fn six_digit_rows_emphasize_whole_row() {
        for target in [RenderTarget::Html, RenderTarget::Spreadsheet, RenderTarget::Pdf] {
            let style = style_for(CodeClass::SixDigit, target);
            assert!(!style.background);
            assert!(style.emphasize(Column::Uraian, CellValue::Text("Belanja")));
        }
    }

    #[test]
    fn spreadsheet_six_digit_code_cell_gets_text_fill() {
        let style = style_for(CodeClass::SixDigit, RenderTarget::Spreadsheet);
        assert!(style.fill_cell(Column::Kode));
        assert!(!style.fill_cell(Column::Uraian));

        let html = style_for(CodeClass::SixDigit, RenderTarget::Html);
        assert!(!html.fill_cell(Column::Kode));
    }

    #[test]
    fn numeric_rows_scope_differs_per_target() {
        let html = style_for(CodeClass::Numeric, RenderTarget::Html);
        assert!(html.emphasize(Column::Vol, CellValue::Number(None)));
        assert!(!html.emphasize(Column::Kode, CellValue::Text("42")));

        let xlsx = style_for(CodeClass::Numeric, RenderTarget::Spreadsheet);
        assert!(xlsx.emphasize(Column::Kode, CellValue::Text("42")));
        assert!(xlsx.emphasize(Column::Ro, CellValue::Text("-3.5")));
        assert!(!xlsx.emphasize(Column::Uraian, CellValue::Text("Honor")));
        assert!(!xlsx.emphasize(Column::Vol, CellValue::Number(None)));

        let pdf = style_for(CodeClass::Numeric, RenderTarget::Pdf);
        assert_eq!(pdf.emphasis, Emphasis::None);
    }

    #[test]
    fn empty_rows_are_plain() {
        let style = style_for(CodeClass::Empty, RenderTarget::Spreadsheet);
        assert!(!style.background);
        assert!(!style.fill_cell(Column::Kode));
        assert!(!style.emphasize(Column::Jumlah, CellValue::Number(Some(500.0))));
    }
}
