use std::collections::BTreeMap;
use std::fmt;

use qrgrid_core_types::RowId;
use serde::{Deserialize, Serialize};

/// Scalar stored in one cell
///
/// Spreadsheet sources hand back both text and numbers; everything the
/// engine does with a cell goes through its string representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// String representation used for search, sort and artifact keys
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// One logical record of the table
///
/// Rows are values: changing a field produces a new `Row` with the same
/// identity, leaving the original untouched so history snapshots that still
/// hold it are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    /// Create a row with an explicit identity
    pub fn new(id: RowId, cells: BTreeMap<String, CellValue>) -> Self {
        Self { id, cells }
    }

    /// Create a row with a freshly minted identity
    pub fn with_fresh_id(cells: BTreeMap<String, CellValue>) -> Self {
        Self::new(RowId::new(), cells)
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<K, V, I>(id: RowId, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let cells = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(id, cells)
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    pub fn cells(&self) -> &BTreeMap<String, CellValue> {
        &self.cells
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// String representation of a column; missing columns read as ""
    pub fn text(&self, column: &str) -> String {
        self.cells
            .get(column)
            .map(CellValue::as_text)
            .unwrap_or_default()
    }

    /// Copy of this row with one field replaced (or added)
    pub fn with_value(&self, field: &str, value: impl Into<CellValue>) -> Row {
        let mut cells = self.cells.clone();
        cells.insert(field.to_string(), value.into());
        Row {
            id: self.id.clone(),
            cells,
        }
    }
}
