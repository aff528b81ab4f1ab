use anyhow::Result;

use crate::domain::entities::dataset::TabularData;

/// A workbook the operator uploaded, read sheet by sheet.
pub trait WorkbookSource {
    fn sheet_names(&self) -> Vec<String>;
    fn read_sheet(&mut self, sheet_name: &str) -> Result<TabularData>;
}
