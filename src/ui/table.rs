use std::fs;
use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Guia, GuiaDataset};
use crate::data::stats;
use crate::export;
use crate::format;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Table tab: headline metrics, the guia table and the export buttons
// ---------------------------------------------------------------------------

pub fn table_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Abra uma planilha de guias para começar.");
        });
        return;
    };
    let month = state.selected_month.clone().unwrap_or_default();

    let summary = stats::month_summary(dataset, &state.month_rows);
    metrics_row(ui, &summary);
    ui.add_space(8.0);

    if state.month_rows.is_empty() {
        ui.label("Não há guias para o mês selecionado.");
        return;
    }

    let mut status_update = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Baixar Excel").clicked() {
            status_update = export_excel(dataset, &state.month_rows, &month);
        }
        if ui.button("Salvar HTML para impressão").clicked() {
            status_update = export_html(dataset, &state.month_rows, &month);
        }
    });
    ui.add_space(8.0);

    guia_table(ui, dataset, &state.month_rows);

    if status_update.is_some() {
        state.status_message = status_update;
    }
}

/// The three headline numbers above the table.
fn metrics_row(ui: &mut Ui, summary: &stats::MonthSummary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total de guias", &summary.guias.to_string());
        metric(
            &mut cols[1],
            "Total sessões autorizadas",
            &format::count(summary.sessions),
        );
        metric(&mut cols[2], "Total ganho", &format::money(summary.revenue));
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).heading().color(Color32::LIGHT_BLUE));
    });
}

// ---------------------------------------------------------------------------
// The table itself
// ---------------------------------------------------------------------------

/// Virtualized table of the filtered guias; only visible rows are laid out.
fn guia_table(ui: &mut Ui, dataset: &GuiaDataset, indices: &[usize]) {
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui).striped(true);
        for _ in &dataset.columns {
            table = table.column(Column::auto().at_least(90.0).resizable(true));
        }

        table
            .header(row_height, |mut header| {
                for column in &dataset.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(column);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, indices.len(), |mut row| {
                    let guia = &dataset.guias[indices[row.index()]];
                    for column in &dataset.columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(format::display_cell(guia, column));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

fn month_rows<'a>(dataset: &'a GuiaDataset, indices: &[usize]) -> Vec<&'a Guia> {
    indices.iter().map(|&i| &dataset.guias[i]).collect()
}

/// Ask where to save, write the file, report either way. Returns the status
/// message to show, or None when the dialog was cancelled.
fn export_excel(dataset: &GuiaDataset, indices: &[usize], month: &str) -> Option<Status> {
    let path = save_dialog("Salvar planilha Excel", &format!("guias_{month}.xlsx"), "xlsx")?;
    let rows = month_rows(dataset, indices);
    let outcome = export::excel::workbook_bytes(&dataset.columns, &rows)
        .and_then(|bytes| fs::write(&path, bytes).map_err(anyhow::Error::from));
    Some(report(&path, outcome))
}

fn export_html(dataset: &GuiaDataset, indices: &[usize], month: &str) -> Option<Status> {
    let path = save_dialog(
        "Salvar HTML para impressão",
        &format!("guias_{month}.html"),
        "html",
    )?;
    let rows = month_rows(dataset, indices);
    let html = export::html::printable_html(month, &dataset.columns, &rows);
    let outcome = fs::write(&path, html).map_err(anyhow::Error::from);
    Some(report(&path, outcome))
}

fn save_dialog(title: &str, file_name: &str, extension: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .set_file_name(file_name)
        .add_filter(extension.to_uppercase(), &[extension])
        .save_file()
}

fn report(path: &std::path::Path, outcome: anyhow::Result<()>) -> Status {
    match outcome {
        Ok(()) => {
            log::info!("Exported {}", path.display());
            Status::info(format!("Arquivo salvo em {}", path.display()))
        }
        Err(e) => {
            log::error!("Export to {} failed: {e:#}", path.display());
            Status::error(format!("Erro ao salvar arquivo: {e:#}"))
        }
    }
}
