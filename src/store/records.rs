//! In-memory record types.
//!
//! Rows keep the column order of their source file. Values are JSON values so
//! that handlers can serialize them without another conversion pass.

use serde::Serialize;
use serde_json::{Map, Value};

/// Columns typed as integers when the cell parses as one.
pub const INTEGER_COLUMNS: &[&str] = &["year", "is_primary"];

/// Placeholder spellings that count as "no value".
const MISSING_MARKERS: &[&str] = &["nan", "NaN", "NAN", "None", "null"];

/// Info field holding the postal address.
pub const ADDRESS_FIELD: &str = "Physical Address";
/// Info field holding the telephone number.
pub const TELEPHONE_FIELD: &str = "Telephone Number";
/// Info field holding the company type.
pub const COMPANY_TYPE_FIELD: &str = "Company Type";

/// A single row from a category table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a header row and one data row.
    ///
    /// Empty cells become `null`; integer columns are typed when they parse.
    /// A short row is padded with `null` for its missing trailing columns.
    pub fn from_row<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        cells: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut cells = cells.into_iter();
        let mut map = Map::new();
        for column in headers {
            let value = cells.next().map_or(Value::Null, |cell| cell_value(column, cell));
            map.insert(column.to_string(), value);
        }
        Self(map)
    }

    /// Insert or replace a column.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Integer value of a column, if it holds one.
    pub fn get_int(&self, column: &str) -> Option<i64> {
        self.0.get(column).and_then(Value::as_i64)
    }

    /// Column rendered as text with placeholders normalized to `""`.
    pub fn get_text(&self, column: &str) -> String {
        self.0.get(column).map(normalize_text).unwrap_or_default()
    }

    /// The `year` column, if present and integral.
    pub fn year(&self) -> Option<i64> {
        self.get_int("year")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

}

/// Field/value pairs describing one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompanyInfo(Map<String, Value>);

impl CompanyInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A repeated field overwrites the earlier value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), Value::String(value.into()));
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn address(&self) -> Option<&str> {
        self.get(ADDRESS_FIELD)
    }

    pub fn telephone(&self) -> Option<&str> {
        self.get(TELEPHONE_FIELD)
    }

    pub fn company_type(&self) -> Option<&str> {
        self.get(COMPANY_TYPE_FIELD)
    }
}

/// Convert a raw CSV cell into a JSON value for `column`.
pub fn cell_value(column: &str, cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if INTEGER_COLUMNS.contains(&column) {
        if let Some(n) = parse_integral(cell.trim()) {
            return Value::from(n);
        }
    }
    Value::String(cell.to_string())
}

/// Parse `"2024"` or an integral float such as `"2024.0"`.
fn parse_integral(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up, so keep the bound strict.
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Render a value as text, mapping null and placeholder spellings to `""`.
pub fn normalize_text(value: &Value) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    if MISSING_MARKERS.contains(&text.as_str()) {
        String::new()
    } else {
        text
    }
}
