use std::path::PathBuf;

use crate::data::model::GuiaDataset;
use crate::data::stats::month_indices;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which central-panel tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Table,
    Statistics,
}

/// Transient feedback shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            error: true,
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<GuiaDataset>,

    /// Where the dataset came from, for the top bar.
    pub source_path: Option<PathBuf>,

    /// The month the dashboard is filtered to.
    pub selected_month: Option<String>,

    /// Indices of guias in the selected month (cached).
    pub month_rows: Vec<usize>,

    /// Active central-panel tab.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<Status>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_path: None,
            selected_month: None,
            month_rows: Vec::new(),
            tab: Tab::Table,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and select its first month.
    pub fn set_dataset(&mut self, dataset: GuiaDataset, source: PathBuf) {
        self.selected_month = dataset.months.first().cloned();
        self.dataset = Some(dataset);
        self.source_path = Some(source);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `month_rows` after a month change.
    pub fn refilter(&mut self) {
        self.month_rows = match (&self.dataset, &self.selected_month) {
            (Some(ds), Some(month)) => month_indices(ds, month),
            _ => Vec::new(),
        };
    }

    /// Switch the dashboard to another month.
    pub fn select_month(&mut self, month: String) {
        self.selected_month = Some(month);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::build_dataset;
    use crate::data::model::CellValue;

    fn dataset() -> GuiaDataset {
        let text = |s: &str| CellValue::Text(s.to_string());
        let headers: Vec<String> = vec![
            "Nome Paciente".into(),
            "Número Carteira".into(),
            "Número Guia".into(),
            "Especialidade".into(),
            "Nome Profissional".into(),
            "Tipo Atendimento".into(),
            "Número Sessões".into(),
            "Valor Sessão".into(),
            "Mês".into(),
        ];
        let row = |month: &str| {
            vec![
                text("Maria"),
                CellValue::Integer(1),
                text("G"),
                text("Fisioterapia"),
                text("Dr. Silva"),
                text("Sessão"),
                CellValue::Float(1.0),
                CellValue::Float(10.0),
                text(month),
            ]
        };
        build_dataset(headers, vec![row("fev"), row("jan"), row("jan")]).unwrap()
    }

    #[test]
    fn loading_selects_the_first_chronological_month() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), PathBuf::from("guias.xlsx"));

        assert_eq!(state.selected_month.as_deref(), Some("jan"));
        assert_eq!(state.month_rows, vec![1, 2]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selecting_a_month_refilters() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), PathBuf::from("guias.xlsx"));
        state.select_month("fev".to_string());

        assert_eq!(state.month_rows, vec![0]);
    }

    #[test]
    fn no_dataset_means_no_rows() {
        let mut state = AppState::default();
        state.select_month("jan".to_string());
        assert!(state.month_rows.is_empty());
    }
}
