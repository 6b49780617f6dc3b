/// Export surfaces for the currently filtered guias: an Excel workbook and a
/// printable HTML document, both ending in an appended TOTAL row.

pub mod excel;
pub mod html;

use crate::data::model::{Guia, NOME_PACIENTE};

/// Index of the column that carries the `TOTAL` label in the appended row:
/// the patient column when present, otherwise the first column.
pub(crate) fn total_label_column(columns: &[String]) -> usize {
    columns
        .iter()
        .position(|c| c == NOME_PACIENTE)
        .unwrap_or(0)
}

/// Sum of the derived totals over the exported rows.
pub(crate) fn revenue_total(rows: &[&Guia]) -> f64 {
    rows.iter().map(|g| g.total()).sum()
}
