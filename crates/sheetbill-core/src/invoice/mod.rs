//! Invoice field extraction module.

mod generic;
mod gst;
pub mod layout;
pub mod totals;
pub mod words;

pub use generic::{generic_layout, GenericExtractor};
pub use gst::{gst_layout, GstExtractor, PAYMENT_MADE_COLUMN};
pub use layout::{
    Coercion, ColumnSpec, FieldDefault, FieldSpec, FieldValue, FieldValues, InvoiceLayout,
    LayoutEngine,
};

use crate::error::ExtractionError;
use crate::grid::Grid;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for invoice extractors reading a fixed grid layout.
pub trait InvoiceExtractor {
    /// The record this extractor produces.
    type Record;

    /// Extract a record from a grid.
    ///
    /// On failure nothing partial is returned; the error names the offending
    /// field and cell.
    fn extract(&self, grid: &Grid) -> Result<Self::Record>;
}
