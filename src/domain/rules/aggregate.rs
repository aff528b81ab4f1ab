use std::collections::HashMap;

use crate::domain::entities::dataset::BudgetRow;
use crate::domain::rules::classify::{classify_row, CodeClass};

#[derive(Debug, Clone, PartialEq)]
pub struct UnitSummary {
    pub unit: String,
    pub count: usize,
    pub total: f64,
}

fn six_digit_amount(row: &BudgetRow) -> Option<f64> {
    (classify_row(row) == CodeClass::SixDigit).then(|| row.jumlah.unwrap_or(0.0))
}

/// Sum of JUMLAH over six-digit KODE rows. Null amounts count as zero.
pub fn total_six_digit(rows: &[BudgetRow]) -> f64 {
    rows.iter().filter_map(six_digit_amount).sum()
}

/// One entry per distinct unit in first-seen order. Units without any
/// six-digit row still appear with a zero total.
pub fn per_unit_summary(rows: &[BudgetRow]) -> Vec<UnitSummary> {
    let mut index_by_unit: HashMap<&str, usize> = HashMap::new();
    let mut summary: Vec<UnitSummary> = Vec::new();

    for row in rows {
        let idx = *index_by_unit.entry(row.unit.as_str()).or_insert_with(|| {
            summary.push(UnitSummary {
                unit: row.unit.clone(),
                count: 0,
                total: 0.0,
            });
            summary.len() - 1
        });

        if let Some(amount) = six_digit_amount(row) {
            let entry = &mut summary[idx];
            entry.count += 1;
            entry.total += amount;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(unit: &str, kode: &str, jumlah: Option<f64>) -> BudgetRow {
        BudgetRow {
            unit: unit.to_string(),
            kode: kode.to_string(),
            jumlah,
            ..BudgetRow::default()
        }
    }

    #[test]
    fn only_six_digit_rows_contribute() {
        let rows = vec![
            row("A", "123456", Some(1_000_000.0)),
            row("A", "AB1234", Some(7.0)),
            row("A", "", Some(500.0)),
            row("A", "42", Some(9.0)),
            row("A", "654321", None),
        ];

        assert_eq!(total_six_digit(&rows), 1_000_000.0);
    }

    #[test]
    fn summary_keeps_discovery_order_and_zero_units() {
        let rows = vec![
            row("Biro B", "111111", Some(10.0)),
            row("", "222222", Some(5.0)),
            row("Biro A", "A1", Some(99.0)),
            row("Biro B", "333333", Some(20.0)),
        ];

        let summary = per_unit_summary(&rows);

        assert_eq!(
            summary,
            vec![
                UnitSummary {
                    unit: "Biro B".to_string(),
                    count: 2,
                    total: 30.0
                },
                UnitSummary {
                    unit: String::new(),
                    count: 1,
                    total: 5.0
                },
                UnitSummary {
                    unit: "Biro A".to_string(),
                    count: 0,
                    total: 0.0
                },
            ]
        );
    }

    #[test]
    fn per_unit_totals_add_up_to_global_total() {
        let rows = vec![
            row("X", "100001", Some(1.5)),
            row("Y", "100002", Some(2.5)),
            row("X", "100003", None),
            row("", "100004", Some(4.0)),
            row("Z", "12", Some(1000.0)),
        ];

        let per_unit: f64 = per_unit_summary(&rows).iter().map(|s| s.total).sum();
        assert_eq!(per_unit, total_six_digit(&rows));
    }
}
