use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    CellValue, EXPECTED_COLUMNS, Guia, GuiaDataset, MES, NUMERO_SESSOES, VALOR_SESSAO,
    VALOR_TOTAL_SESSOES,
};
use super::months::strip_diacritics;

/// File loaded when the app starts with no explicit source.
pub const DEFAULT_FILE: &str = "guias_geap.xlsx";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems in the source table, surfaced verbatim in the UI.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "colunas esperadas ausentes: {}; colunas detectadas: {}",
        missing.join(", "),
        detected.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        detected: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a guia table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xls` – first worksheet, header row + data rows (primary)
/// * `.csv`           – header row + data rows
/// * `.json`          – `[{ "Nome Paciente": ..., "Mês": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<GuiaDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" | "xlsm" => load_excel(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Read the first worksheet: row 0 is the header, everything below is data.
fn load_excel(path: &Path) -> Result<GuiaDataset> {
    let mut workbook = open_workbook_auto(path).context("opening Excel workbook")?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .context("workbook has no worksheets")?
        .clone();

    let range = workbook
        .worksheet_range(&first)
        .with_context(|| format!("reading worksheet '{first}'"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::String(s) => s.clone(),
                Data::Empty => format!("col_{i}"),
                other => other.to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(excel_cell_to_value).collect())
        .collect();

    Ok(build_dataset(headers, data)?)
}

fn excel_cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) => CellValue::Date(cell.to_string()),
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<GuiaDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut data = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        data.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(build_dataset(headers, data)?)
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Nome Paciente": "Maria", "Número Sessões": 4, "Mês": "Março", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<GuiaDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut data = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }

        let row: Vec<CellValue> = headers
            .iter()
            .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
            .collect();
        data.push(row);
    }

    // Earlier rows may be shorter than the final header list; build_dataset
    // reads absent cells as Null.
    Ok(build_dataset(headers, data)?)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Normalization, validation, derived column
// ---------------------------------------------------------------------------

/// `" Número Sessões "` → `NUMERO_SESSOES`.
pub fn normalize_header(raw: &str) -> String {
    strip_diacritics(raw.trim()).replace(' ', "_").to_uppercase()
}

/// Interpret a cell as a number: native numbers pass through, text is parsed
/// (accepting `1.234,56` pt-BR decimals), everything else is not a number.
pub fn parse_numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Integer(_) | CellValue::Float(_) => value.as_f64(),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if s.contains(',') {
                s.replace('.', "").replace(',', ".").parse().ok()
            } else {
                s.parse().ok()
            }
        }
        _ => None,
    }
}

/// `MES` is a categorical label: render numbers without a fractional part so
/// `3.0` from Excel selects the same month as a typed `3`.
fn stringify_month(value: &CellValue) -> String {
    match value {
        CellValue::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Normalize headers, validate the expected column set, coerce the numeric
/// columns, and append the derived `VALOR_TOTAL_SESSOES` column.
pub fn build_dataset(
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
) -> Result<GuiaDataset, LoadError> {
    // Keep the first occurrence of each normalized header, in source order.
    let mut kept: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_header(raw);
        if !kept.iter().any(|(_, n)| *n == name) {
            kept.push((idx, name));
        }
    }

    let detected: Vec<String> = kept.iter().map(|(_, n)| n.clone()).collect();
    let missing: Vec<String> = EXPECTED_COLUMNS
        .iter()
        .filter(|c| !detected.iter().any(|d| d == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns { missing, detected });
    }

    let mut guias = Vec::with_capacity(rows.len());
    for row in rows {
        let mut values = BTreeMap::new();
        for (idx, name) in &kept {
            let cell = row.get(*idx).cloned().unwrap_or(CellValue::Null);
            let cell = match name.as_str() {
                NUMERO_SESSOES | VALOR_SESSAO => match parse_numeric(&cell) {
                    Some(n) => CellValue::Float(n),
                    None => CellValue::Null,
                },
                MES => CellValue::Text(stringify_month(&cell)),
                _ => cell,
            };
            values.insert(name.clone(), cell);
        }

        let sessions = values.get(NUMERO_SESSOES).and_then(CellValue::as_f64);
        let price = values.get(VALOR_SESSAO).and_then(CellValue::as_f64);
        let total = sessions.unwrap_or(0.0) * price.unwrap_or(0.0);
        values.insert(VALOR_TOTAL_SESSOES.to_string(), CellValue::Float(total));

        guias.push(Guia { values });
    }

    let mut columns = detected;
    if !columns.iter().any(|c| c == VALOR_TOTAL_SESSOES) {
        columns.push(VALOR_TOTAL_SESSOES.to_string());
    }

    Ok(GuiaDataset::from_rows(guias, columns))
}
