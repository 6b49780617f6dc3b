use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::data::model::{
    CellValue, Guia, NUMERO_SESSOES, VALOR_SESSAO, VALOR_TOTAL_SESSOES,
};

use super::{revenue_total, total_label_column};

/// Worksheet name of the export, matching the source sheets.
const SHEET_NAME: &str = "guias";

/// Build an in-memory `.xlsx` workbook of the filtered guias, ending in a
/// TOTAL row (`TOTAL` label in the patient column, revenue sum in the
/// derived-total column).
pub fn workbook_bytes(columns: &[String], rows: &[&Guia]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("naming the export worksheet")?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("R$ #,##0.00");

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .context("writing the header row")?;
    }

    for (row_idx, guia) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col_idx, name) in columns.iter().enumerate() {
            let col = col_idx as u16;
            match name.as_str() {
                // Display semantics: missing numerics export as zero.
                NUMERO_SESSOES => {
                    worksheet
                        .write_number(row, col, guia.sessions().unwrap_or(0.0))
                        .context("writing a session count")?;
                }
                VALOR_SESSAO => {
                    worksheet
                        .write_number_with_format(
                            row,
                            col,
                            guia.unit_price().unwrap_or(0.0),
                            &money_format,
                        )
                        .context("writing a unit price")?;
                }
                VALOR_TOTAL_SESSOES => {
                    worksheet
                        .write_number_with_format(row, col, guia.total(), &money_format)
                        .context("writing a row total")?;
                }
                _ => write_cell(worksheet, row, col, guia.get(name))?,
            }
        }
    }

    let total_row = (rows.len() + 1) as u32;
    let label_col = total_label_column(columns) as u16;
    worksheet
        .write_string_with_format(total_row, label_col, "TOTAL", &header_format)
        .context("writing the TOTAL label")?;
    if let Some(total_col) = columns.iter().position(|c| c == VALOR_TOTAL_SESSOES) {
        worksheet
            .write_number_with_format(
                total_row,
                total_col as u16,
                revenue_total(rows),
                &money_format,
            )
            .context("writing the TOTAL amount")?;
    }

    workbook
        .save_to_buffer()
        .context("serializing the workbook")
}

fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> Result<()> {
    match value {
        CellValue::Text(s) | CellValue::Date(s) => {
            worksheet
                .write_string(row, col, s)
                .context("writing a text cell")?;
        }
        CellValue::Integer(i) => {
            worksheet
                .write_number(row, col, *i as f64)
                .context("writing an integer cell")?;
        }
        CellValue::Float(f) => {
            worksheet
                .write_number(row, col, *f)
                .context("writing a number cell")?;
        }
        CellValue::Bool(b) => {
            worksheet
                .write_boolean(row, col, *b)
                .context("writing a boolean cell")?;
        }
        CellValue::Null => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::build_dataset;
    use crate::data::model::GuiaDataset;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn dataset() -> GuiaDataset {
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
        let row = |patient: &str, sessions: f64, price: f64| {
            vec![
                text(patient),
                CellValue::Integer(1),
                text("G"),
                text("Fisioterapia"),
                text("Dr. Silva"),
                text("Sessão"),
                CellValue::Float(sessions),
                CellValue::Float(price),
                text("jan"),
            ]
        };
        build_dataset(headers, vec![row("Maria", 4.0, 100.0), row("João", 2.0, 50.0)]).unwrap()
    }

    #[test]
    fn workbook_round_trips_with_a_total_row() {
        let ds = dataset();
        let rows: Vec<&Guia> = ds.guias.iter().collect();
        let bytes = workbook_bytes(&ds.columns, &rows).unwrap();

        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();

        // header + 2 data rows + TOTAL row
        assert_eq!(range.get_size().0, 4);

        assert_eq!(range.get((0, 0)), Some(&Data::String("NOME_PACIENTE".into())));
        assert_eq!(range.get((1, 0)), Some(&Data::String("Maria".into())));

        let total_col = ds.columns.len() - 1;
        assert_eq!(range.get((1, total_col)), Some(&Data::Float(400.0)));

        // TOTAL row: label in the patient column, sum in the total column.
        assert_eq!(range.get((3, 0)), Some(&Data::String("TOTAL".into())));
        assert_eq!(range.get((3, total_col)), Some(&Data::Float(500.0)));
    }

    #[test]
    fn empty_selection_still_exports_header_and_total() {
        let ds = dataset();
        let bytes = workbook_bytes(&ds.columns, &[]).unwrap();

        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get((1, 0)), Some(&Data::String("TOTAL".into())));
        let total_col = ds.columns.len() - 1;
        assert_eq!(range.get((1, total_col)), Some(&Data::Float(0.0)));
    }
}
