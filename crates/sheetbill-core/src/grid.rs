//! Spreadsheet grid model.
//!
//! A [`Grid`] is an ordered list of rows, each an ordered list of [`Cell`]s.
//! Rows may be ragged; any coordinate outside the stored cells reads as an
//! absent cell. Row 0 is a header row by convention and carries no meaning.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::GridError;

/// A single untyped spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// Blank cell.
    #[default]
    Empty,
    /// Text cell.
    Text(String),
    /// Numeric cell (spreadsheets store every number as a double).
    Number(f64),
}

impl Cell {
    /// Whether the cell carries a usable value.
    ///
    /// Blank text and NaN count as absent, matching how spreadsheet readers
    /// report empty cells.
    pub fn is_present(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Text(s) => !s.trim().is_empty(),
            Cell::Number(n) => !n.is_nan(),
        }
    }

    /// Render the cell as text.
    ///
    /// Integral numbers lose their fractional part (`999729`, not `999729.0`).
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }

    /// Read the cell as an exact decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.is_finite() => parse_decimal(&format_number(*n)),
            Cell::Number(_) => None,
            Cell::Text(s) => parse_decimal(s.trim()),
        }
    }

    /// Read the cell as an integer, truncating numeric cells toward zero.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => {
                let truncated = n.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
            Cell::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Cell::Number(_) => serializer.serialize_none(),
        }
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a string, a number or a boolean")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Cell, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Cell, E> {
        Ok(Cell::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Cell, E> {
        Ok(Cell::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Cell, E> {
        Ok(Cell::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Cell, E> {
        Ok(Cell::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Cell, E> {
        Ok(Cell::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Cell, E> {
        Ok(Cell::Text(v))
    }

    // Nested arrays are a shape error, not a cell.
    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> Result<Cell, A::Error> {
        Err(de::Error::invalid_type(de::Unexpected::Seq, &self))
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

/// A 2D grid of cells addressed by zero-based `(row, column)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Get a present cell. Blank cells and coordinates past the end of the
    /// grid or of a short row both read as `None`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .filter(|c| c.is_present())
    }

    /// Set a cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, column: usize, cell: impl Into<Cell>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize_with(column + 1, Cell::default);
        }
        cells[column] = cell.into();
    }

    /// Parse a grid from a JSON array of rows.
    pub fn from_json_str(json: &str) -> Result<Self, GridError> {
        serde_json::from_str(json).map_err(|e| GridError::Malformed(e.to_string()))
    }

    /// Build a grid from an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, GridError> {
        serde_json::from_value(value).map_err(|e| GridError::Malformed(e.to_string()))
    }

    /// Serialize the grid as pretty-printed JSON.
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

/// Load a grid from a JSON file.
pub fn load_grid(path: &Path) -> Result<Grid, GridError> {
    if !path.exists() {
        return Err(GridError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| GridError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let grid = Grid::from_json_str(&content)?;
    debug!("Loaded grid with {} rows from {}", grid.len(), path.display());

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_presence() {
        assert!(!Cell::Empty.is_present());
        assert!(!Cell::from("   ").is_present());
        assert!(!Cell::Number(f64::NAN).is_present());
        assert!(Cell::from("x").is_present());
        assert!(Cell::from(0.0).is_present());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Cell::from(999729.0).as_text(), "999729");
        assert_eq!(Cell::from(52.99).as_text(), "52.99");
        assert_eq!(Cell::from("Gujarat (24)").as_text(), "Gujarat (24)");
    }

    #[test]
    fn test_as_decimal() {
        assert_eq!(
            Cell::from(52.99).as_decimal(),
            Some(Decimal::from_str("52.99").unwrap())
        );
        assert_eq!(
            Cell::from(" 847.46 ").as_decimal(),
            Some(Decimal::from_str("847.46").unwrap())
        );
        assert_eq!(
            Cell::from("1e3").as_decimal(),
            Some(Decimal::from(1000))
        );
        assert_eq!(Cell::from("abc").as_decimal(), None);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Cell::from(3.0).as_integer(), Some(3));
        assert_eq!(Cell::from(2.7).as_integer(), Some(2));
        assert_eq!(Cell::from(-2.7).as_integer(), Some(-2));
        assert_eq!(Cell::from("4").as_integer(), Some(4));
        assert_eq!(Cell::from("4.5").as_integer(), None);
        assert_eq!(Cell::Number(f64::INFINITY).as_integer(), None);
    }

    #[test]
    fn test_cell_out_of_range_is_absent() {
        let grid = Grid::new(vec![vec![], vec![Cell::from("INV-001")]]);
        assert_eq!(grid.cell(1, 0), Some(&Cell::from("INV-001")));
        assert_eq!(grid.cell(1, 5), None);
        assert_eq!(grid.cell(9, 0), None);
    }

    #[test]
    fn test_set_grows_grid() {
        let mut grid = Grid::default();
        grid.set(2, 20, 1000.0);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.rows()[2].len(), 21);
        assert_eq!(grid.cell(2, 20), Some(&Cell::Number(1000.0)));
    }

    #[test]
    fn test_from_json() {
        let grid = Grid::from_json_str(r#"[[], ["INV-001", null, 52.99, 3, true]]"#).unwrap();
        assert_eq!(
            grid.rows()[1],
            vec![
                Cell::from("INV-001"),
                Cell::Empty,
                Cell::Number(52.99),
                Cell::Number(3.0),
                Cell::from("true"),
            ]
        );
    }

    #[test]
    fn test_from_json_rejects_nested_rows() {
        let err = Grid::from_json_str(r#"[[["nested"]]]"#).unwrap_err();
        assert!(matches!(err, GridError::Malformed(_)));

        let err = Grid::from_json_str(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, GridError::Malformed(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_blanks() {
        let grid = Grid::new(vec![vec![Cell::Empty, Cell::from("a"), Cell::from(1.5)]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[[null,"a",1.5]]"#);
    }

    #[test]
    fn test_load_grid_missing_file() {
        let err = load_grid(Path::new("/nonexistent/grid.json")).unwrap_err();
        assert!(matches!(err, GridError::NotFound(_)));
    }

    #[test]
    fn test_load_grid_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        std::fs::write(&path, r#"[[], ["INV-9"]]"#).unwrap();

        let grid = load_grid(&path).unwrap();
        assert_eq!(grid.cell(1, 0), Some(&Cell::from("INV-9")));
    }
}
