use std::fmt::Write as _;

use crate::data::model::{Guia, VALOR_TOTAL_SESSOES};
use crate::format::{display_cell, money};

use super::{revenue_total, total_label_column};

/// Print stylesheet: collapsed borders, padded cells, shaded header.
const STYLE: &str = "table{border-collapse:collapse;width:100%;font-family:Arial,sans-serif}\
th,td{border:1px solid #ddd;padding:8px}\
th{background-color:#f2f2f2;text-align:left}";

/// Build a complete, self-contained HTML document of the filtered guias for
/// printing from a browser: titled after the month, money columns in `R$`,
/// and the same appended TOTAL row the Excel export carries.
pub fn printable_html(month: &str, columns: &[String], rows: &[&Guia]) -> String {
    let mut table = String::from("<table>\n<thead>\n<tr>");
    for column in columns {
        let _ = write!(table, "<th>{}</th>", escape(column));
    }
    table.push_str("</tr>\n</thead>\n<tbody>\n");

    for guia in rows {
        table.push_str("<tr>");
        for column in columns {
            let _ = write!(table, "<td>{}</td>", escape(&display_cell(guia, column)));
        }
        table.push_str("</tr>\n");
    }

    let label_col = total_label_column(columns);
    table.push_str("<tr>");
    for (idx, column) in columns.iter().enumerate() {
        let cell = if idx == label_col {
            "TOTAL".to_string()
        } else if column == VALOR_TOTAL_SESSOES {
            money(revenue_total(rows))
        } else {
            String::new()
        };
        let _ = write!(table, "<td>{}</td>", escape(&cell));
    }
    table.push_str("</tr>\n</tbody>\n</table>");

    format!(
        "<html><head><meta charset='utf-8'>\
<title>Guias do mês de {title}</title>\
<style>{STYLE}</style></head><body>{table}</body></html>",
        title = escape(month),
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::build_dataset;
    use crate::data::model::{CellValue, GuiaDataset};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn dataset(patient: &str) -> GuiaDataset {
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
        let row = vec![
            text(patient),
            CellValue::Integer(1),
            text("G"),
            text("Fisioterapia"),
            text("Dr. Silva"),
            text("Sessão"),
            CellValue::Float(25.0),
            CellValue::Float(100.0),
            text("Março"),
        ];
        build_dataset(headers, vec![row]).unwrap()
    }

    #[test]
    fn document_is_titled_after_the_month() {
        let ds = dataset("Maria");
        let rows: Vec<&Guia> = ds.guias.iter().collect();
        let html = printable_html("Março", &ds.columns, &rows);
        assert!(html.contains("<title>Guias do mês de Março</title>"));
        assert!(html.contains("<meta charset='utf-8'>"));
    }

    #[test]
    fn money_and_total_row_are_rendered() {
        let ds = dataset("Maria");
        let rows: Vec<&Guia> = ds.guias.iter().collect();
        let html = printable_html("Março", &ds.columns, &rows);
        assert!(html.contains("<td>R$ 2.500,00</td>"));
        assert!(html.contains("<td>TOTAL</td>"));
        // Sessions render as a bare integer.
        assert!(html.contains("<td>25</td>"));
    }

    #[test]
    fn cell_text_is_escaped() {
        let ds = dataset("<script>alert('x')</script>");
        let rows: Vec<&Guia> = ds.guias.iter().collect();
        let html = printable_html("jan & fev", &ds.columns, &rows);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("jan &amp; fev"));
    }
}
