use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Well-known columns
// ---------------------------------------------------------------------------

/// Normalized column names the source spreadsheets must carry.
pub const NOME_PACIENTE: &str = "NOME_PACIENTE";
pub const NUMERO_CARTEIRA: &str = "NUMERO_CARTEIRA";
pub const NUMERO_GUIA: &str = "NUMERO_GUIA";
pub const ESPECIALIDADE: &str = "ESPECIALIDADE";
pub const NOME_PROFISSIONAL: &str = "NOME_PROFISSIONAL";
pub const TIPO_ATENDIMENTO: &str = "TIPO_ATENDIMENTO";
pub const NUMERO_SESSOES: &str = "NUMERO_SESSOES";
pub const VALOR_SESSAO: &str = "VALOR_SESSAO";
pub const MES: &str = "MES";

/// Derived per-row column: `NUMERO_SESSOES * VALOR_SESSAO`.
pub const VALOR_TOTAL_SESSOES: &str = "VALOR_TOTAL_SESSOES";

/// The full set of required columns, in contract order.
pub const EXPECTED_COLUMNS: [&str; 9] = [
    NOME_PACIENTE,
    NUMERO_CARTEIRA,
    NUMERO_GUIA,
    ESPECIALIDADE,
    NOME_PROFISSIONAL,
    TIPO_ATENDIMENTO,
    NUMERO_SESSOES,
    VALOR_SESSAO,
    MES,
];

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in ordered containers --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Guia – one claim row
// ---------------------------------------------------------------------------

/// A single guia (one claim row of the source spreadsheet), keyed by
/// normalized column name. Unexpected columns are carried along untouched.
#[derive(Debug, Clone)]
pub struct Guia {
    pub values: BTreeMap<String, CellValue>,
}

impl Guia {
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&CellValue::Null)
    }

    /// Display label for a column (`Null` renders as the empty string).
    pub fn label(&self, column: &str) -> String {
        self.get(column).to_string()
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).as_f64()
    }

    pub fn patient(&self) -> String {
        self.label(NOME_PACIENTE)
    }

    pub fn specialty(&self) -> String {
        self.label(ESPECIALIDADE)
    }

    pub fn professional(&self) -> String {
        self.label(NOME_PROFISSIONAL)
    }

    /// The trimmed `MES` label (loader guarantees it is stored as text).
    pub fn month(&self) -> &str {
        match self.get(MES) {
            CellValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn sessions(&self) -> Option<f64> {
        self.number(NUMERO_SESSOES)
    }

    pub fn unit_price(&self) -> Option<f64> {
        self.number(VALOR_SESSAO)
    }

    /// The derived total, `Null` treated as zero.
    pub fn total(&self) -> f64 {
        self.number(VALOR_TOTAL_SESSOES).unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// GuiaDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with the display column order and the
/// chronologically-sorted list of distinct months.
#[derive(Debug, Clone)]
pub struct GuiaDataset {
    /// All guias (rows).
    pub guias: Vec<Guia>,
    /// Display-ordered column names (source order, derived total appended).
    pub columns: Vec<String>,
    /// Distinct `MES` labels in chronological order.
    pub months: Vec<String>,
}

impl GuiaDataset {
    /// Assemble a dataset from finished rows, deriving the month index.
    pub fn from_rows(guias: Vec<Guia>, columns: Vec<String>) -> Self {
        let months = super::months::sorted_months(guias.iter().map(|g| g.month()));
        GuiaDataset {
            guias,
            columns,
            months,
        }
    }

    /// Number of guias.
    pub fn len(&self) -> usize {
        self.guias.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.guias.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_user_facing_forms() {
        assert_eq!(CellValue::Text("Ana".into()).to_string(), "Ana");
        assert_eq!(CellValue::Float(12.5).to_string(), "12.50");
        assert_eq!(CellValue::Integer(7).to_string(), "7");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn as_f64_coerces_numbers_only() {
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Text("3".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn guia_accessors_read_known_columns() {
        let mut values = BTreeMap::new();
        values.insert(NOME_PACIENTE.to_string(), CellValue::Text("Maria".into()));
        values.insert(MES.to_string(), CellValue::Text("Janeiro".into()));
        values.insert(NUMERO_SESSOES.to_string(), CellValue::Integer(4));
        values.insert(VALOR_SESSAO.to_string(), CellValue::Float(80.0));
        values.insert(VALOR_TOTAL_SESSOES.to_string(), CellValue::Float(320.0));
        let guia = Guia { values };

        assert_eq!(guia.patient(), "Maria");
        assert_eq!(guia.month(), "Janeiro");
        assert_eq!(guia.sessions(), Some(4.0));
        assert_eq!(guia.unit_price(), Some(80.0));
        assert_eq!(guia.total(), 320.0);
        assert!(guia.get("COLUNA_INEXISTENTE").is_null());
    }
}
