use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::view::ViewMode;
use crate::usecase::services::import_service::ImportService;

pub struct AppState {
    pub source_name: Signal<Option<String>>,
    pub workbook: Signal<Option<ImportService>>,
    pub sheets: Signal<Vec<String>>,
    pub selected_sheet: Signal<Option<String>>,
    pub dataset: Signal<Option<Dataset>>,
    pub view_value: Signal<String>,
    pub include_signature: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(signature_default: bool) -> Self {
        Self {
            source_name: use_signal(|| None::<String>),
            workbook: use_signal(|| None::<ImportService>),
            sheets: use_signal(Vec::<String>::new),
            selected_sheet: use_signal(|| None::<String>),
            dataset: use_signal(|| None::<Dataset>),
            view_value: use_signal(|| ViewMode::Summary.option_value()),
            include_signature: use_signal(move || signature_default),
            busy: use_signal(|| false),
            status: use_signal(|| "Siap".to_string()),
        }
    }
}

/// Which layout the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Nothing uploaded yet: only the upload prompt.
    Welcome,
    /// A workbook is open but no sheet could be read; the sheet selector
    /// stays available so another sheet can be picked.
    SheetPicker,
    Dashboard,
}

impl Screen {
    pub fn for_state(workbook_open: bool, dataset_loaded: bool) -> Self {
        match (workbook_open, dataset_loaded) {
            (false, _) => Screen::Welcome,
            (true, false) => Screen::SheetPicker,
            (true, true) => Screen::Dashboard,
        }
    }

    pub fn shows_sheet_selector(self) -> bool {
        self != Screen::Welcome
    }
}
