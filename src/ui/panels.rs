use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – data source and month selection
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Fonte de dados");
    ui.separator();

    if ui.button("Abrir planilha…").clicked() {
        open_file_dialog(state);
    }
    match &state.source_path {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.label(RichText::new(name).weak());
        }
        None => {
            ui.label(
                RichText::new(format!(
                    "Nenhum arquivo aberto. '{}' é carregado automaticamente quando existe.",
                    loader::DEFAULT_FILE
                ))
                .weak(),
            );
        }
    }

    ui.add_space(8.0);
    ui.heading("Controles");
    ui.separator();

    let months = match &state.dataset {
        Some(ds) => ds.months.clone(),
        None => {
            ui.label("Nenhum dado carregado.");
            return;
        }
    };
    if months.is_empty() {
        ui.label(RichText::new("Nenhum valor válido na coluna MES.").color(Color32::RED));
        return;
    }

    ui.strong("Escolha o mês");
    let current = state.selected_month.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("month_select")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for month in &months {
                if ui.selectable_label(current == *month, month).clicked() {
                    state.select_month(month.clone());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} guias carregadas, {} no mês selecionado",
                ds.len(),
                state.month_rows.len()
            ));
        }

        if let Some(status) = &state.status_message {
            ui.separator();
            let text = RichText::new(&status.text);
            ui.label(if status.error {
                text.color(Color32::RED)
            } else {
                text.weak()
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir planilha de guias")
        .add_filter("Planilhas", &["xlsx", "xls", "csv", "json"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} guias across {} months from {}",
                    dataset.len(),
                    dataset.months.len(),
                    path.display()
                );
                state.set_dataset(dataset, path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(Status::error(format!("Erro ao ler arquivo: {e:#}")));
            }
        }
    }
}
