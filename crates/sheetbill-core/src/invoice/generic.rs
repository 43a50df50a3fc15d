//! Generic invoice sheets.
//!
//! Row 1 holds the invoice number and date, row 2 the customer, and rows 3
//! onward the items as description, price and quantity.

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use super::layout::{Coercion, ColumnSpec, FieldDefault, FieldSpec, InvoiceLayout, LayoutEngine};
use super::totals::generic_totals;
use super::{InvoiceExtractor, Result};
use crate::grid::Grid;
use crate::models::invoice::{BillTo, InvoiceRecord, LineItem};

/// Layout of the generic invoice sheet.
pub fn generic_layout() -> InvoiceLayout {
    use Coercion::*;

    InvoiceLayout {
        fields: vec![
            FieldSpec::new("invoiceNumber", 1, 0, Text, FieldDefault::text("INV-001")),
            FieldSpec::new("date", 1, 1, Text, FieldDefault::Today("%B %d, %Y")),
            FieldSpec::new("name", 2, 0, Text, FieldDefault::text("Customer Name")),
            FieldSpec::new("phone", 2, 1, Text, FieldDefault::text("")),
            FieldSpec::new("email", 2, 2, Text, FieldDefault::text("")),
            FieldSpec::new("address", 2, 3, Text, FieldDefault::text("")),
        ],
        first_item_row: 3,
        item_columns: vec![
            ColumnSpec::new("description", 0, Text, FieldDefault::Required),
            ColumnSpec::new("price", 1, Decimal, FieldDefault::Required),
            ColumnSpec::new("quantity", 2, Integer, FieldDefault::Required),
        ],
    }
}

/// Extractor for generic invoice sheets.
pub struct GenericExtractor {
    layout: InvoiceLayout,
    today: Option<NaiveDate>,
}

impl GenericExtractor {
    /// Create an extractor for the standard generic layout.
    pub fn new() -> Self {
        Self {
            layout: generic_layout(),
            today: None,
        }
    }

    /// Fix the date used for a missing invoice date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The layout this extractor reads.
    pub fn layout(&self) -> &InvoiceLayout {
        &self.layout
    }

    fn build(&self, grid: &Grid) -> Result<InvoiceRecord> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let engine = LayoutEngine::new(&self.layout, today);

        let fields = engine.resolve_fields(grid)?;
        let items = engine
            .resolve_items(grid)?
            .iter()
            .map(|row| -> Result<LineItem> {
                LineItem::new(
                    row.text("description")?,
                    row.decimal("price")?,
                    row.integer("quantity")?,
                )
                .map_err(|e| e.on_row(row.row()))
            })
            .collect::<Result<Vec<_>>>()?;

        let totals = generic_totals(&items)?;
        debug!(
            "Extracted {} items, subtotal {}",
            items.len(),
            totals.subtotal
        );

        Ok(InvoiceRecord {
            invoice_number: fields.text("invoiceNumber")?,
            date: fields.text("date")?,
            bill_to: BillTo {
                name: fields.text("name")?,
                phone: fields.text("phone")?,
                email: fields.text("email")?,
                address: fields.text("address")?,
            },
            items,
            subtotal: totals.subtotal,
            tax_rate: totals.tax_rate,
            tax_amount: totals.tax_amount,
            total: totals.total,
        })
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for GenericExtractor {
    type Record = InvoiceRecord;

    fn extract(&self, grid: &Grid) -> Result<InvoiceRecord> {
        self.build(grid)
            .inspect_err(|e| warn!("Error processing invoice grid: {}", e))
    }
}
