use std::path::Path;

use eframe::egui;

use crate::data::loader;
use crate::state::{AppState, Status, Tab};
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GuiasApp {
    pub state: AppState,
}

impl GuiasApp {
    /// Start with `guias_geap.xlsx` already loaded when it sits next to the
    /// executable's working directory.
    pub fn new() -> Self {
        let mut state = AppState::default();

        let default = Path::new(loader::DEFAULT_FILE);
        if default.exists() {
            match loader::load_file(default) {
                Ok(dataset) => {
                    log::info!(
                        "Loaded {} guias across {} months from {}",
                        dataset.len(),
                        dataset.months.len(),
                        loader::DEFAULT_FILE
                    );
                    state.set_dataset(dataset, default.to_path_buf());
                }
                Err(e) => {
                    log::error!("Failed to load {}: {e:#}", loader::DEFAULT_FILE);
                    state.status_message = Some(Status::error(format!(
                        "Erro ao ler {}: {e:#}",
                        loader::DEFAULT_FILE
                    )));
                }
            }
        }

        Self { state }
    }
}

impl eframe::App for GuiasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: source and month selection ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table / statistics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.state.tab, Tab::Table, "Tabela");
                ui.selectable_value(&mut self.state.tab, Tab::Statistics, "Estatísticas");
            });
            ui.separator();

            match self.state.tab {
                Tab::Table => table::table_tab(ui, &mut self.state),
                Tab::Statistics => charts::statistics_tab(ui, &self.state),
            }
        });
    }
}
