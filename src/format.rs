// ---------------------------------------------------------------------------
// Display formatting shared by the UI, the Excel export and the printable HTML
// ---------------------------------------------------------------------------

use crate::data::model::{Guia, NUMERO_SESSOES, VALOR_SESSAO, VALOR_TOTAL_SESSOES};

/// `R$ 1.234,56` with pt-BR thousands grouping. Negative amounts keep the
/// sign in front of the currency symbol.
pub fn money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < -0.005 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Session counts are integers in practice; only show a fraction when the
/// sum genuinely has one.
pub fn count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// The user-facing text of one table cell: sessions as an integer (missing
/// reads as zero), money columns as `R$`, everything else as-is.
pub fn display_cell(guia: &Guia, column: &str) -> String {
    match column {
        NUMERO_SESSOES => count(guia.sessions().unwrap_or(0.0)),
        VALOR_SESSAO => money(guia.unit_price().unwrap_or(0.0)),
        VALOR_TOTAL_SESSOES => money(guia.total()),
        other => guia.label(other),
    }
}
