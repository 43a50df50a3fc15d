//! Error types for the sheetbill-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the sheetbill library.
#[derive(Error, Debug)]
pub enum SheetbillError {
    /// Grid loading error.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a file or document into a [`crate::Grid`].
#[derive(Error, Debug)]
pub enum GridError {
    /// The grid file does not exist.
    #[error("grid file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The grid file exists but could not be read.
    #[error("failed to read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The document is not an array of rows of scalar cells.
    #[error("malformed grid: {0}")]
    Malformed(String),
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// A present cell could not be converted to the type its field needs.
    #[error("cannot read {field} at row {row}, column {column} as {expected}: {value:?}")]
    Coercion {
        field: String,
        row: usize,
        column: usize,
        expected: &'static str,
        value: String,
    },

    /// The layout did not produce a field the record needs.
    #[error("missing field in layout: {0}")]
    MissingField(String),

    /// A derived amount does not fit in a decimal.
    #[error(
        "{field} is out of range{}",
        .row.map(|r| format!(" at row {r}")).unwrap_or_default()
    )]
    Overflow { field: String, row: Option<usize> },
}

impl ExtractionError {
    pub(crate) fn overflow(field: &str) -> Self {
        ExtractionError::Overflow {
            field: field.to_string(),
            row: None,
        }
    }

    /// Attach the grid row to an overflow raised while building a line item.
    pub fn on_row(self, row: Option<usize>) -> Self {
        match self {
            ExtractionError::Overflow { field, row: None } => ExtractionError::Overflow { field, row },
            other => other,
        }
    }
}

/// Coarse failure category, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Source file missing or unreadable.
    Unreadable,
    /// Source document is not a grid.
    MalformedGrid,
    /// A cell held a value of the wrong type.
    BadCell,
    /// Layout and record disagree.
    Layout,
    /// Anything else (I/O on output, config).
    Other,
}

impl SheetbillError {
    /// Classify the error.
    pub fn kind(&self) -> FailureKind {
        match self {
            SheetbillError::Grid(GridError::NotFound(_) | GridError::Unreadable { .. }) => {
                FailureKind::Unreadable
            }
            SheetbillError::Grid(GridError::Malformed(_)) => FailureKind::MalformedGrid,
            SheetbillError::Extraction(
                ExtractionError::Coercion { .. } | ExtractionError::Overflow { .. },
            ) => FailureKind::BadCell,
            SheetbillError::Extraction(ExtractionError::MissingField(_)) => FailureKind::Layout,
            SheetbillError::Io(_) | SheetbillError::Json(_) | SheetbillError::Config(_) => {
                FailureKind::Other
            }
        }
    }
}

/// Result type for the sheetbill library.
pub type Result<T> = std::result::Result<T, SheetbillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keeps_unreadable_apart_from_bad_cell() {
        let unreadable = SheetbillError::from(GridError::NotFound(PathBuf::from("missing.json")));
        let bad_cell = SheetbillError::from(ExtractionError::Coercion {
            field: "price".to_string(),
            row: 3,
            column: 1,
            expected: "decimal",
            value: "abc".to_string(),
        });

        assert_eq!(unreadable.kind(), FailureKind::Unreadable);
        assert_eq!(bad_cell.kind(), FailureKind::BadCell);
    }

    #[test]
    fn test_overflow_is_a_bad_cell() {
        let err = ExtractionError::overflow("amount").on_row(Some(3));
        assert_eq!(err.to_string(), "amount is out of range at row 3");
        assert_eq!(SheetbillError::from(err).kind(), FailureKind::BadCell);
        assert_eq!(
            ExtractionError::overflow("subtotal").to_string(),
            "subtotal is out of range"
        );
    }

    #[test]
    fn test_coercion_message() {
        let err = ExtractionError::Coercion {
            field: "quantity".to_string(),
            row: 4,
            column: 2,
            expected: "integer",
            value: "two".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot read quantity at row 4, column 2 as integer: \"two\""
        );
    }
}
