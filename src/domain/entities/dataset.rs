/// Fixed ten-column schema of a budget sheet, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Unit,
    Mak,
    Kode,
    Uraian,
    Vol,
    Sat,
    Harga,
    Jumlah,
    Ro,
    Sd,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Unit,
        Column::Mak,
        Column::Kode,
        Column::Uraian,
        Column::Vol,
        Column::Sat,
        Column::Harga,
        Column::Jumlah,
        Column::Ro,
        Column::Sd,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Unit => "UNIT",
            Column::Mak => "MAK",
            Column::Kode => "KODE",
            Column::Uraian => "URAIAN",
            Column::Vol => "VOL",
            Column::Sat => "SAT",
            Column::Harga => "HARGA",
            Column::Jumlah => "JUMLAH",
            Column::Ro => "RO",
            Column::Sd => "SD",
        }
    }

    pub fn from_header(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL.into_iter().find(|col| col.header() == name)
    }

    /// VOL, HARGA and JUMLAH hold nullable numbers; everything else is text.
    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Vol | Column::Harga | Column::Jumlah)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetRow {
    pub unit: String,
    pub mak: String,
    pub kode: String,
    pub uraian: String,
    pub vol: Option<f64>,
    pub sat: String,
    pub harga: Option<f64>,
    pub jumlah: Option<f64>,
    pub ro: String,
    pub sd: String,
}

impl BudgetRow {
    pub fn cell(&self, column: Column) -> CellValue<'_> {
        match column {
            Column::Unit => CellValue::Text(&self.unit),
            Column::Mak => CellValue::Text(&self.mak),
            Column::Kode => CellValue::Text(&self.kode),
            Column::Uraian => CellValue::Text(&self.uraian),
            Column::Vol => CellValue::Number(self.vol),
            Column::Sat => CellValue::Text(&self.sat),
            Column::Harga => CellValue::Number(self.harga),
            Column::Jumlah => CellValue::Number(self.jumlah),
            Column::Ro => CellValue::Text(&self.ro),
            Column::Sd => CellValue::Text(&self.sd),
        }
    }

    pub fn set_text(&mut self, column: Column, value: String) {
        match column {
            Column::Unit => self.unit = value,
            Column::Mak => self.mak = value,
            Column::Kode => self.kode = value,
            Column::Uraian => self.uraian = value,
            Column::Sat => self.sat = value,
            Column::Ro => self.ro = value,
            Column::Sd => self.sd = value,
            Column::Vol | Column::Harga | Column::Jumlah => {}
        }
    }

    pub fn set_number(&mut self, column: Column, value: Option<f64>) {
        match column {
            Column::Vol => self.vol = value,
            Column::Harga => self.harga = value,
            Column::Jumlah => self.jumlah = value,
            _ => {}
        }
    }
}

/// Rows of one sheet, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub sheet_name: String,
    pub rows: Vec<BudgetRow>,
}

impl Dataset {
    pub fn new(sheet_name: impl Into<String>, rows: Vec<BudgetRow>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows,
        }
    }

    /// Distinct unit values in first-seen order, the empty unit included.
    pub fn units(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.unit.as_str()))
            .map(|row| row.unit.clone())
            .collect()
    }

    pub fn rows_for_unit(&self, unit: &str) -> Vec<BudgetRow> {
        self.rows
            .iter()
            .filter(|row| row.unit == unit)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(unit: &str) -> BudgetRow {
        BudgetRow {
            unit: unit.to_string(),
            ..BudgetRow::default()
        }
    }

    #[test]
    fn units_keep_first_seen_order_and_empty_unit() {
        let dataset = Dataset::new(
            "Sheet1",
            vec![row("Biro B"), row(""), row("Biro A"), row("Biro B"), row("")],
        );

        assert_eq!(dataset.units(), vec!["Biro B", "", "Biro A"]);
    }

    #[test]
    fn column_headers_are_fixed_and_ordered() {
        let headers: Vec<&str> = Column::ALL.iter().map(|col| col.header()).collect();
        assert_eq!(
            headers,
            vec!["UNIT", "MAK", "KODE", "URAIAN", "VOL", "SAT", "HARGA", "JUMLAH", "RO", "SD"]
        );
        assert_eq!(Column::from_header(" JUMLAH "), Some(Column::Jumlah));
        assert_eq!(Column::from_header("jumlah"), None);
        assert!(Column::ALL
            .iter()
            .enumerate()
            .all(|(idx, col)| col.index() == idx));
    }
}
