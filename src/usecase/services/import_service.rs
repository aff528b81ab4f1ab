use anyhow::Result;

use crate::domain::entities::dataset::{BudgetRow, Column, Dataset, TabularData};
use crate::usecase::ports::source::WorkbookSource;

pub struct ImportService {
    source: Box<dyn WorkbookSource>,
}

impl ImportService {
    pub fn new(source: Box<dyn WorkbookSource>) -> Self {
        Self { source }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.source.sheet_names()
    }

    pub fn load_dataset(&mut self, sheet_name: &str) -> Result<Dataset> {
        let table = self.source.read_sheet(sheet_name)?;
        let dataset = normalize_table(sheet_name, &table);
        tracing::info!(
            sheet = sheet_name,
            rows = dataset.rows.len(),
            source_columns = table.columns.len(),
            "loaded sheet"
        );
        Ok(dataset)
    }
}

fn clean_text(value: &str) -> String {
    match value {
        "None" | "none" | "NONE" => String::new(),
        other => other.to_string(),
    }
}

/// Unparseable or non-finite values become `None`, never zero.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reindexes raw sheet cells onto the fixed ten-column schema. Missing
/// columns are padded with empty values and no row is dropped.
pub fn normalize_table(sheet_name: &str, table: &TabularData) -> Dataset {
    let positions: Vec<(Column, usize)> = Column::ALL
        .iter()
        .filter_map(|col| {
            table
                .columns
                .iter()
                .position(|name| Column::from_header(name) == Some(*col))
                .map(|idx| (*col, idx))
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|raw| {
            let mut row = BudgetRow::default();
            for (col, idx) in &positions {
                let value = clean_text(raw.get(*idx).map(String::as_str).unwrap_or(""));
                if col.is_numeric() {
                    row.set_number(*col, parse_numeric(&value));
                } else {
                    row.set_text(*col, value);
                }
            }
            row
        })
        .collect();

    Dataset::new(sheet_name, rows)
}
