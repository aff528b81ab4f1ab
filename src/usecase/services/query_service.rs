use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::view::ViewMode;
use crate::domain::rules::aggregate::{per_unit_summary, total_six_digit, UnitSummary};
use crate::domain::rules::format::{display_amount, format_thousands};
use crate::infra::render::html::render_table;

pub const METRIC_LABEL: &str = "Total Anggaran (Kode Akun 6 Digit)";
pub const SUMMARY_HINT: &str = "Pilih unit dari sidebar untuk melihat rincian";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub unit: String,
    pub total_display: String,
}

/// Everything the dashboard shows for one view of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub total_display: String,
    pub row_count: usize,
    /// Present in the summary view only.
    pub summary: Option<Vec<SummaryLine>>,
    /// Present in the detail views only.
    pub table_html: Option<String>,
}

pub fn summary_lines(summary: &[UnitSummary]) -> Vec<SummaryLine> {
    summary
        .iter()
        .map(|entry| SummaryLine {
            unit: entry.unit.clone(),
            total_display: display_amount(Some(entry.total)),
        })
        .collect()
}

pub fn build_snapshot(dataset: &Dataset, mode: &ViewMode) -> ViewSnapshot {
    let rows = mode.active_rows(dataset);
    let total = total_six_digit(&rows);
    let (summary, table_html) = if mode.shows_detail() {
        (None, Some(render_table(&rows)))
    } else {
        (Some(summary_lines(&per_unit_summary(&dataset.rows))), None)
    };

    ViewSnapshot {
        total_display: format_thousands(total),
        row_count: rows.len(),
        summary,
        table_html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::BudgetRow;

    fn dataset() -> Dataset {
        let row = |unit: &str, kode: &str, jumlah: f64| BudgetRow {
            unit: unit.to_string(),
            kode: kode.to_string(),
            jumlah: Some(jumlah),
            ..BudgetRow::default()
        };
        Dataset::new(
            "Pagu",
            vec![
                row("Biro A", "521211", 1_000_000.0),
                row("Biro A", "A", 5.0),
                row("Biro B", "52", 10.0),
                row("Biro C", "521212", 250_000.0),
            ],
        )
    }

    #[test]
    fn summary_view_lists_units_and_global_total() {
        let snapshot = build_snapshot(&dataset(), &ViewMode::Summary);

        assert_eq!(snapshot.total_display, "1.250.000");
        assert!(snapshot.table_html.is_none());
        let summary = snapshot.summary.expect("summary view should carry summary");
        assert_eq!(
            summary,
            vec![
                SummaryLine {
                    unit: "Biro A".to_string(),
                    total_display: "1.000.000".to_string()
                },
                SummaryLine {
                    unit: "Biro B".to_string(),
                    total_display: String::new()
                },
                SummaryLine {
                    unit: "Biro C".to_string(),
                    total_display: "250.000".to_string()
                },
            ]
        );
    }

    #[test]
    fn single_unit_view_totals_that_unit() {
        let snapshot = build_snapshot(&dataset(), &ViewMode::SingleUnit("Biro C".to_string()));

        assert_eq!(snapshot.total_display, "250.000");
        assert_eq!(snapshot.row_count, 1);
        assert!(snapshot.summary.is_none());
        assert!(snapshot
            .table_html
            .expect("detail view should carry a table")
            .contains("250.000"));
    }

    #[test]
    fn metric_shows_zero_explicitly() {
        let snapshot = build_snapshot(&dataset(), &ViewMode::SingleUnit("Biro B".to_string()));
        assert_eq!(snapshot.total_display, "0");
    }
}
