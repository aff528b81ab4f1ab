use crate::domain::entities::dataset::{BudgetRow, Dataset};

pub const SUMMARY_OPTION_VALUE: &str = "__rekap__";
pub const ALL_UNITS_OPTION_VALUE: &str = "__semua__";
const UNIT_OPTION_PREFIX: &str = "unit:";

pub const SUMMARY_LABEL: &str = "Rekap Per Unit";
pub const ALL_UNITS_LABEL: &str = "Semua";

/// Which presentation of the loaded sheet is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Summary,
    AllUnits,
    SingleUnit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOption {
    pub value: String,
    pub label: String,
}

impl ViewMode {
    /// Unknown values fall back to the summary view.
    pub fn from_option_value(value: &str) -> Self {
        match value {
            ALL_UNITS_OPTION_VALUE => ViewMode::AllUnits,
            SUMMARY_OPTION_VALUE => ViewMode::Summary,
            other => match other.strip_prefix(UNIT_OPTION_PREFIX) {
                Some(unit) => ViewMode::SingleUnit(unit.to_string()),
                None => ViewMode::Summary,
            },
        }
    }

    pub fn option_value(&self) -> String {
        match self {
            ViewMode::Summary => SUMMARY_OPTION_VALUE.to_string(),
            ViewMode::AllUnits => ALL_UNITS_OPTION_VALUE.to_string(),
            ViewMode::SingleUnit(unit) => format!("{UNIT_OPTION_PREFIX}{unit}"),
        }
    }

    /// Label used in export file names and the PDF info line.
    pub fn scope_label(&self) -> &str {
        match self {
            ViewMode::Summary => SUMMARY_LABEL,
            ViewMode::AllUnits => ALL_UNITS_LABEL,
            ViewMode::SingleUnit(unit) => unit,
        }
    }

    pub fn shows_detail(&self) -> bool {
        !matches!(self, ViewMode::Summary)
    }

    /// Rows the metric and detail table are computed over. The summary view
    /// works on the whole sheet.
    pub fn active_rows(&self, dataset: &Dataset) -> Vec<BudgetRow> {
        match self {
            ViewMode::Summary | ViewMode::AllUnits => dataset.rows.clone(),
            ViewMode::SingleUnit(unit) => dataset.rows_for_unit(unit),
        }
    }
}

/// Options for the unit selector: summary, all units, then each non-empty
/// unit in first-seen order.
pub fn view_options(dataset: &Dataset) -> Vec<ViewOption> {
    let mut options = vec![
        ViewOption {
            value: SUMMARY_OPTION_VALUE.to_string(),
            label: SUMMARY_LABEL.to_string(),
        },
        ViewOption {
            value: ALL_UNITS_OPTION_VALUE.to_string(),
            label: ALL_UNITS_LABEL.to_string(),
        },
    ];
    options.extend(
        dataset
            .units()
            .into_iter()
            .filter(|unit| !unit.is_empty())
            .map(|unit| ViewOption {
                value: ViewMode::SingleUnit(unit.clone()).option_value(),
                label: unit,
            }),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let rows = ["Biro A", "", "Biro B", "Biro A"]
            .iter()
            .map(|unit| BudgetRow {
                unit: unit.to_string(),
                ..BudgetRow::default()
            })
            .collect();
        Dataset::new("Sheet1", rows)
    }

    #[test]
    fn option_values_round_trip() {
        for mode in [
            ViewMode::Summary,
            ViewMode::AllUnits,
            ViewMode::SingleUnit("Semua".to_string()),
            ViewMode::SingleUnit("Biro A".to_string()),
        ] {
            assert_eq!(ViewMode::from_option_value(&mode.option_value()), mode);
        }
        assert_eq!(ViewMode::from_option_value("garbage"), ViewMode::Summary);
    }

    #[test]
    fn options_list_units_without_empty() {
        let labels: Vec<String> = view_options(&dataset())
            .into_iter()
            .map(|opt| opt.label)
            .collect();
        assert_eq!(labels, vec!["Rekap Per Unit", "Semua", "Biro A", "Biro B"]);
    }

    #[test]
    fn single_unit_filters_rows() {
        let data = dataset();
        assert_eq!(ViewMode::Summary.active_rows(&data).len(), 4);
        assert_eq!(ViewMode::AllUnits.active_rows(&data).len(), 4);
        assert_eq!(
            ViewMode::SingleUnit("Biro A".to_string())
                .active_rows(&data)
                .len(),
            2
        );
        assert!(!ViewMode::Summary.shows_detail());
        assert!(ViewMode::AllUnits.shows_detail());
    }
}
