use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};

use crate::domain::entities::dataset::TabularData;
use crate::usecase::ports::source::WorkbookSource;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}

/// Uploaded workbook held in memory (xlsx, xls or ods).
pub struct CalamineWorkbook {
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl CalamineWorkbook {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let sheets =
            open_workbook_auto_from_rs(Cursor::new(bytes)).context("failed to open workbook")?;
        Ok(Self { sheets })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
        Self::from_bytes(bytes).with_context(|| format!("failed to open xlsx: {}", path.display()))
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// The first row of the used range becomes the header row.
    fn read_sheet(&mut self, sheet_name: &str) -> Result<TabularData> {
        let range = self
            .sheets
            .worksheet_range(sheet_name)
            .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

        let mut rows = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>());
        let columns = rows.next().unwrap_or_default();
        Ok(TabularData {
            columns,
            rows: rows.collect(),
        })
    }
}
