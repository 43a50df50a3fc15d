//! Declarative grid layouts and the engine that reads them.
//!
//! An [`InvoiceLayout`] lists where each field lives, how its cell is coerced
//! and what to use when the cell is absent. [`LayoutEngine`] walks a grid
//! with a layout and produces [`FieldValues`]; the extractors only map those
//! values onto their records.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::trace;

use super::Result;
use crate::error::ExtractionError;
use crate::grid::{Cell, Grid};

/// How a present cell is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Decimal,
    Integer,
}

impl Coercion {
    fn name(self) -> &'static str {
        match self {
            Coercion::Text => "text",
            Coercion::Decimal => "decimal",
            Coercion::Integer => "integer",
        }
    }

    fn apply(self, cell: &Cell) -> Option<FieldValue> {
        match self {
            Coercion::Text => Some(FieldValue::Text(cell.as_text())),
            Coercion::Decimal => cell.as_decimal().map(FieldValue::Decimal),
            Coercion::Integer => cell.as_integer().map(FieldValue::Integer),
        }
    }
}

/// What an absent cell resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// The cell must be present. For item columns, an absent cell skips the
    /// whole row; for header fields it is a layout error.
    Required,
    Text(String),
    Decimal(Decimal),
    Integer(i64),
    /// Today's date rendered with a chrono format string.
    Today(&'static str),
}

impl FieldDefault {
    /// Shorthand for a text default.
    pub fn text(s: &str) -> Self {
        FieldDefault::Text(s.to_string())
    }

    fn resolve(&self, today: NaiveDate) -> Option<FieldValue> {
        match self {
            FieldDefault::Required => None,
            FieldDefault::Text(s) => Some(FieldValue::Text(s.clone())),
            FieldDefault::Decimal(d) => Some(FieldValue::Decimal(*d)),
            FieldDefault::Integer(i) => Some(FieldValue::Integer(*i)),
            FieldDefault::Today(format) => {
                Some(FieldValue::Text(today.format(format).to_string()))
            }
        }
    }
}

/// A header or customer field at a fixed cell.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub row: usize,
    pub column: usize,
    pub coercion: Coercion,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub fn new(
        name: &'static str,
        row: usize,
        column: usize,
        coercion: Coercion,
        default: FieldDefault,
    ) -> Self {
        Self {
            name,
            row,
            column,
            coercion,
            default,
        }
    }
}

/// A line-item column, read on every item row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column: usize,
    pub coercion: Coercion,
    pub default: FieldDefault,
}

impl ColumnSpec {
    pub fn new(
        name: &'static str,
        column: usize,
        coercion: Coercion,
        default: FieldDefault,
    ) -> Self {
        Self {
            name,
            column,
            coercion,
            default,
        }
    }
}

/// A complete positional layout for one kind of invoice sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLayout {
    /// Fixed-position fields, in reading order.
    pub fields: Vec<FieldSpec>,
    /// First row of the line-item table; the table runs to the last row.
    pub first_item_row: usize,
    /// Line-item columns.
    pub item_columns: Vec<ColumnSpec>,
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Decimal(Decimal),
    Integer(i64),
}

/// Resolved values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    row: Option<usize>,
    values: HashMap<&'static str, FieldValue>,
}

impl FieldValues {
    fn for_row(row: usize) -> Self {
        Self {
            row: Some(row),
            values: HashMap::new(),
        }
    }

    /// Grid row of a line item; `None` for fixed-position fields.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Get a raw value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Get a text value.
    pub fn text(&self, name: &str) -> Result<String> {
        match self.values.get(name) {
            Some(FieldValue::Text(s)) => Ok(s.clone()),
            _ => Err(ExtractionError::MissingField(format!("{name} (text)"))),
        }
    }

    /// Get a decimal value. Integers widen to decimals.
    pub fn decimal(&self, name: &str) -> Result<Decimal> {
        match self.values.get(name) {
            Some(FieldValue::Decimal(d)) => Ok(*d),
            Some(FieldValue::Integer(i)) => Ok(Decimal::from(*i)),
            _ => Err(ExtractionError::MissingField(format!("{name} (decimal)"))),
        }
    }

    /// Get an integer value.
    pub fn integer(&self, name: &str) -> Result<i64> {
        match self.values.get(name) {
            Some(FieldValue::Integer(i)) => Ok(*i),
            _ => Err(ExtractionError::MissingField(format!("{name} (integer)"))),
        }
    }
}

/// Reads a grid according to a layout.
pub struct LayoutEngine<'a> {
    layout: &'a InvoiceLayout,
    today: NaiveDate,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine. `today` feeds [`FieldDefault::Today`].
    pub fn new(layout: &'a InvoiceLayout, today: NaiveDate) -> Self {
        Self { layout, today }
    }

    /// Resolve every fixed-position field.
    pub fn resolve_fields(&self, grid: &Grid) -> Result<FieldValues> {
        let mut values = FieldValues::default();

        for spec in &self.layout.fields {
            let value = self.resolve(grid, spec.name, spec.row, spec.column, spec.coercion, &spec.default)?;
            match value {
                Some(value) => values.insert(spec.name, value),
                None => return Err(ExtractionError::MissingField(spec.name.to_string())),
            }
        }

        Ok(values)
    }

    /// Resolve the line-item table, one [`FieldValues`] per kept row.
    ///
    /// Rows missing any required column are skipped without error.
    pub fn resolve_items(&self, grid: &Grid) -> Result<Vec<FieldValues>> {
        let mut rows = Vec::new();

        for row in self.layout.first_item_row..grid.len() {
            if !self.has_required_columns(grid, row) {
                trace!("Skipping row {}: required item column is blank", row);
                continue;
            }

            let mut values = FieldValues::for_row(row);
            for spec in &self.layout.item_columns {
                let value = self.resolve(grid, spec.name, row, spec.column, spec.coercion, &spec.default)?;
                if let Some(value) = value {
                    values.insert(spec.name, value);
                }
            }
            rows.push(values);
        }

        Ok(rows)
    }

    fn has_required_columns(&self, grid: &Grid, row: usize) -> bool {
        self.layout
            .item_columns
            .iter()
            .filter(|spec| spec.default == FieldDefault::Required)
            .all(|spec| grid.cell(row, spec.column).is_some())
    }

    fn resolve(
        &self,
        grid: &Grid,
        name: &str,
        row: usize,
        column: usize,
        coercion: Coercion,
        default: &FieldDefault,
    ) -> Result<Option<FieldValue>> {
        let Some(cell) = grid.cell(row, column) else {
            return Ok(default.resolve(self.today));
        };

        coercion
            .apply(cell)
            .map(Some)
            .ok_or_else(|| ExtractionError::Coercion {
                field: name.to_string(),
                row,
                column,
                expected: coercion.name(),
                value: cell.as_text(),
            })
    }
}
