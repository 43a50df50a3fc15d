//! GST (India) tax invoice sheets.
//!
//! Row 1 holds invoice number, invoice date, due date (column 3) and place
//! of supply (column 4). Row 2 holds the customer in columns 0-5 and the
//! payment made far right in column 20. Rows 3 onward are items: description,
//! HSN/SAC, quantity, rate, CGST % and SGST %.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::layout::{Coercion, ColumnSpec, FieldDefault, FieldSpec, InvoiceLayout, LayoutEngine};
use super::totals::gst_totals;
use super::{InvoiceExtractor, Result};
use crate::grid::Grid;
use crate::models::invoice::{CustomerDetails, GstInvoiceRecord, GstLineItem};

/// Column of the payment-made cell on the customer row.
pub const PAYMENT_MADE_COLUMN: usize = 20;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Layout of the GST invoice sheet.
pub fn gst_layout() -> InvoiceLayout {
    use Coercion::Text;

    let nine = FieldDefault::Decimal(Decimal::from(9));

    InvoiceLayout {
        fields: vec![
            FieldSpec::new("invoiceNumber", 1, 0, Text, FieldDefault::text("INV-000001")),
            FieldSpec::new("invoiceDate", 1, 1, Text, FieldDefault::Today(DATE_FORMAT)),
            FieldSpec::new("dueDate", 1, 3, Text, FieldDefault::Today(DATE_FORMAT)),
            FieldSpec::new("placeOfSupply", 1, 4, Text, FieldDefault::text("Gujarat (24)")),
            FieldSpec::new(
                "paymentMade",
                2,
                PAYMENT_MADE_COLUMN,
                Coercion::Decimal,
                FieldDefault::Decimal(Decimal::ZERO),
            ),
            FieldSpec::new("name", 2, 0, Text, FieldDefault::text("Customer Name")),
            FieldSpec::new("address", 2, 1, Text, FieldDefault::text("Address")),
            FieldSpec::new("city", 2, 2, Text, FieldDefault::text("City")),
            FieldSpec::new("state", 2, 3, Text, FieldDefault::text("State")),
            FieldSpec::new("pincode", 2, 4, Text, FieldDefault::text("000000")),
            FieldSpec::new("country", 2, 5, Text, FieldDefault::text("India")),
        ],
        first_item_row: 3,
        item_columns: vec![
            ColumnSpec::new("description", 0, Text, FieldDefault::Required),
            ColumnSpec::new("hsnSac", 1, Text, FieldDefault::Required),
            ColumnSpec::new("quantity", 2, Coercion::Decimal, FieldDefault::Decimal(Decimal::ONE)),
            ColumnSpec::new("rate", 3, Coercion::Decimal, FieldDefault::Decimal(Decimal::ZERO)),
            ColumnSpec::new("cgstPercent", 4, Coercion::Decimal, nine.clone()),
            ColumnSpec::new("sgstPercent", 5, Coercion::Decimal, nine),
        ],
    }
}

/// Extractor for GST invoice sheets.
pub struct GstExtractor {
    layout: InvoiceLayout,
    today: Option<NaiveDate>,
}

impl GstExtractor {
    /// Create an extractor for the standard GST layout.
    pub fn new() -> Self {
        Self {
            layout: gst_layout(),
            today: None,
        }
    }

    /// Fix the date used for missing invoice and due dates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The layout this extractor reads.
    pub fn layout(&self) -> &InvoiceLayout {
        &self.layout
    }

    fn build(&self, grid: &Grid) -> Result<GstInvoiceRecord> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let engine = LayoutEngine::new(&self.layout, today);

        let fields = engine.resolve_fields(grid)?;
        let items = engine
            .resolve_items(grid)?
            .iter()
            .map(|row| -> Result<GstLineItem> {
                GstLineItem::new(
                    row.text("description")?,
                    row.text("hsnSac")?,
                    row.decimal("quantity")?,
                    row.decimal("rate")?,
                    row.decimal("cgstPercent")?,
                    row.decimal("sgstPercent")?,
                )
                .map_err(|e| e.on_row(row.row()))
            })
            .collect::<Result<Vec<_>>>()?;

        let payment_made = fields.decimal("paymentMade")?;
        debug!("Payment made: {}", payment_made);

        let totals = gst_totals(&items, payment_made)?;
        debug!(
            "Extracted {} GST items, CGST {}, SGST {}",
            items.len(),
            totals.cgst_total,
            totals.sgst_total
        );

        Ok(GstInvoiceRecord {
            invoice_number: fields.text("invoiceNumber")?,
            invoice_date: fields.text("invoiceDate")?,
            due_date: fields.text("dueDate")?,
            place_of_supply: fields.text("placeOfSupply")?,
            customer_details: CustomerDetails {
                name: fields.text("name")?,
                address: fields.text("address")?,
                city: fields.text("city")?,
                state: fields.text("state")?,
                pincode: fields.text("pincode")?,
                country: fields.text("country")?,
            },
            items,
            sub_total: totals.sub_total,
            cgst_total: totals.cgst_total,
            sgst_total: totals.sgst_total,
            total_amount: totals.total_amount,
            payment_made: totals.payment_made,
            balance_due: totals.balance_due,
        })
    }
}

impl Default for GstExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for GstExtractor {
    type Record = GstInvoiceRecord;

    fn extract(&self, grid: &Grid) -> Result<GstInvoiceRecord> {
        self.build(grid)
            .inspect_err(|e| warn!("Error processing GST invoice grid: {}", e))
    }
}
