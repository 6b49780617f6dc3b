use std::ops::RangeInclusive;

use eframe::egui::{Align2, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Text};

use crate::color::CategoryColors;
use crate::data::stats::{self, ParetoEntry, RevenueEntry};
use crate::format;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Statistics tab (central panel)
// ---------------------------------------------------------------------------

/// Render the three revenue charts for the selected month.
pub fn statistics_tab(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Abra uma planilha de guias para começar.");
            });
            return;
        }
    };
    if state.month_rows.is_empty() {
        ui.label("Sem dados para gerar estatísticas no mês selecionado.");
        return;
    }

    let pareto = stats::specialty_pareto(dataset, &state.month_rows);
    let professionals = stats::top_professionals(dataset, &state.month_rows);
    let patients = stats::top_patients(dataset, &state.month_rows);

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.columns(2, |cols: &mut [Ui]| {
            cols[0].strong("Distribuição de guias por especialidade (Pareto)");
            pareto_chart(&mut cols[0], &pareto);

            cols[1].strong(format!(
                "Top {} profissionais por receita",
                stats::TOP_PROFESSIONALS
            ));
            ranking_chart(&mut cols[1], "top_professionals", &professionals, 280.0);
        });

        ui.add_space(12.0);
        ui.strong(format!("Top {} pacientes por receita", stats::TOP_PATIENTS));
        ranking_chart(ui, "top_patients", &patients, 320.0);
    });
}

// ---------------------------------------------------------------------------
// Specialty Pareto: revenue bars plus the cumulative-share line
// ---------------------------------------------------------------------------

/// The cumulative line lives on the revenue axis: 100% sits at the month
/// total, so the line always ends level with the top of the stacked bars.
fn pareto_chart(ui: &mut Ui, entries: &[ParetoEntry]) {
    let colors = CategoryColors::new(entries.iter().map(|e| e.label.as_str()));
    let total = entries.last().map(|e| e.cumulative).unwrap_or(0.0);

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.revenue)
                .width(0.6)
                .name(&e.label)
                .fill(colors.color_for(&e.label))
        })
        .collect();

    let labels: Vec<String> = entries.iter().map(|e| truncate_label(&e.label, 14)).collect();

    Plot::new("specialty_pareto")
        .height(280.0)
        .legend(Legend::default())
        .include_y(0.0)
        .include_y(total * 1.12)
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Receita"));

            for (i, e) in entries.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, e.revenue),
                        RichText::new(format::money(e.revenue)).small(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }

            if total > 0.0 {
                let points: PlotPoints = entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| [i as f64, e.cumulative_pct / 100.0 * total])
                    .collect();
                plot_ui.line(Line::new(points).name("% acumulado").width(2.0));

                for (i, e) in entries.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, e.cumulative_pct / 100.0 * total),
                            RichText::new(format!("{:.1}%", e.cumulative_pct)).small(),
                        )
                        .anchor(Align2::LEFT_BOTTOM),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Ranking charts (professionals, patients)
// ---------------------------------------------------------------------------

fn ranking_chart(ui: &mut Ui, id: &str, entries: &[RevenueEntry], height: f32) {
    let colors = CategoryColors::new(entries.iter().map(|e| e.label.as_str()));
    let max = entries.first().map(|e| e.revenue).unwrap_or(0.0);

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.revenue)
                .width(0.6)
                .name(&e.label)
                .fill(colors.color_for(&e.label))
        })
        .collect();

    let labels: Vec<String> = entries.iter().map(|e| truncate_label(&e.label, 12)).collect();

    Plot::new(id.to_string())
        .height(height)
        .include_y(0.0)
        .include_y(max * 1.12)
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));

            for (i, e) in entries.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, e.revenue),
                        RichText::new(format::money(e.revenue)).small(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Show a category label under whole-numbered grid marks, nothing elsewhere.
fn index_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-3 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_pass_through() {
        assert_eq!(truncate_label("Fisioterapia", 14), "Fisioterapia");
    }

    #[test]
    fn long_labels_get_an_ellipsis() {
        assert_eq!(truncate_label("Fonoaudiologia", 10), "Fonoaudio…");
    }

    #[test]
    fn formatter_only_labels_whole_indices() {
        let fmt = index_formatter(vec!["a".into(), "b".into()]);
        let mark = |value: f64| GridMark {
            value,
            step_size: 1.0,
        };
        assert_eq!(fmt(mark(0.0), &(0.0..=2.0)), "a");
        assert_eq!(fmt(mark(1.0), &(0.0..=2.0)), "b");
        assert_eq!(fmt(mark(0.5), &(0.0..=2.0)), "");
        assert_eq!(fmt(mark(5.0), &(0.0..=2.0)), "");
    }
}
