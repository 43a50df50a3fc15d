//! Core library for spreadsheet invoice extraction.
//!
//! This crate provides:
//! - A grid model for spreadsheet cells with presence checks and coercions
//! - A declarative layout engine reading fields by row/column position
//! - Generic and GST (India) invoice extractors with derived totals
//! - Indian numbering system number-to-words conversion

pub mod error;
pub mod grid;
pub mod models;
pub mod invoice;
pub mod pipeline;
pub mod sample;

pub use error::{ExtractionError, FailureKind, GridError, Result, SheetbillError};
pub use grid::{load_grid, Cell, Grid};
pub use models::config::{OutputConfig, SheetbillConfig, WordsConfig};
pub use models::invoice::{
    BillTo, CustomerDetails, GstAmountsInWords, GstInvoiceRecord, GstLineItem, InvoiceRecord,
    LineItem,
};
pub use invoice::words::{amount_in_words, number_to_words_indian};
pub use invoice::{GenericExtractor, GstExtractor, InvoiceExtractor};
pub use pipeline::{process_file, process_grid, ExtractedInvoice, InvoiceKind};
