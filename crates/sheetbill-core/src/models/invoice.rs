//! Invoice records produced by the extractors.
//!
//! Both records serialize with camelCase keys and plain JSON numbers so they
//! can be handed straight to an invoice template.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::WordsConfig;
use crate::error::ExtractionError;
use crate::invoice::words::amount_in_words;

/// A generic invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    /// Invoice number/identifier.
    pub invoice_number: String,

    /// Invoice date, as written in the sheet.
    pub date: String,

    /// Customer the invoice is billed to.
    pub bill_to: BillTo,

    /// Line items on the invoice.
    pub items: Vec<LineItem>,

    /// Sum of line amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    /// Tax rate as a fraction (0.10 for 10%).
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,

    /// `subtotal × tax_rate`.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,

    /// `subtotal + tax_amount`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Customer block of a generic invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// A single line item on a generic invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service description.
    pub description: String,

    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Whole number of units.
    pub quantity: i64,

    /// `price × quantity`.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl LineItem {
    /// Create a line item, computing its amount.
    pub fn new(
        description: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<Self, ExtractionError> {
        let amount = price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| ExtractionError::overflow("amount"))?;

        Ok(Self {
            description: description.into(),
            price,
            quantity,
            amount,
        })
    }
}

/// A GST (India) tax invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstInvoiceRecord {
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,

    /// Jurisdiction used for GST, recorded as written.
    pub place_of_supply: String,

    pub customer_details: CustomerDetails,

    pub items: Vec<GstLineItem>,

    /// Rate of the last line item, not a sum of amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub sub_total: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub cgst_total: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub sgst_total: Decimal,

    /// `sub_total + cgst_total + sgst_total`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub payment_made: Decimal,

    /// `total_amount - payment_made`; negative when overpaid.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_due: Decimal,
}

/// Customer block of a GST invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

/// A single line item on a GST invoice.
///
/// Tax amounts are derived on demand and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstLineItem {
    pub description: String,

    /// HSN (goods) or SAC (services) classification code.
    pub hsn_sac: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub cgst_percent: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub sgst_percent: Decimal,

    /// `quantity × rate`.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl GstLineItem {
    /// Create a line item, computing its amount.
    ///
    /// Fails when the amount or either tax amount leaves the decimal range.
    pub fn new(
        description: impl Into<String>,
        hsn_sac: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
        cgst_percent: Decimal,
        sgst_percent: Decimal,
    ) -> Result<Self, ExtractionError> {
        let amount = quantity
            .checked_mul(rate)
            .ok_or_else(|| ExtractionError::overflow("amount"))?;

        let item = Self {
            description: description.into(),
            hsn_sac: hsn_sac.into(),
            quantity,
            rate,
            cgst_percent,
            sgst_percent,
            amount,
        };
        item.cgst_amount()?;
        item.sgst_amount()?;

        Ok(item)
    }

    /// Central GST charged on this line.
    pub fn cgst_amount(&self) -> Result<Decimal, ExtractionError> {
        percent_of(self.amount, self.cgst_percent).ok_or_else(|| ExtractionError::overflow("cgstAmount"))
    }

    /// State GST charged on this line.
    pub fn sgst_amount(&self) -> Result<Decimal, ExtractionError> {
        percent_of(self.amount, self.sgst_percent).ok_or_else(|| ExtractionError::overflow("sgstAmount"))
    }
}

fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount.checked_mul(percent)?.checked_div(Decimal::ONE_HUNDRED)
}

/// The "in words" block printed under a GST invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstAmountsInWords {
    pub total_amount: String,
    pub payment_made: String,
    pub balance_due: String,
}

impl GstInvoiceRecord {
    /// Render the total, payment and balance as currency phrases.
    pub fn amounts_in_words(&self, config: &WordsConfig) -> GstAmountsInWords {
        GstAmountsInWords {
            total_amount: amount_in_words(self.total_amount, config),
            payment_made: amount_in_words(self.payment_made, config),
            balance_due: amount_in_words(self.balance_due, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_line_item_amount() {
        let item = LineItem::new("Diapers (pack of 50)", dec("25.99"), 2).unwrap();
        assert_eq!(item.amount, dec("51.98"));
    }

    #[test]
    fn test_gst_line_item_taxes() {
        let item = GstLineItem::new(
            "Ideathon 2025 Competition Registration Fee",
            "999729",
            dec("1.00"),
            dec("847.46"),
            dec("9"),
            dec("9"),
        )
        .unwrap();
        assert_eq!(item.amount, dec("847.46"));
        assert_eq!(item.cgst_amount().unwrap(), dec("76.2714"));
        assert_eq!(item.sgst_amount().unwrap(), dec("76.2714"));
    }

    #[test]
    fn test_line_item_overflow() {
        let err = LineItem::new("Big", Decimal::MAX, 2).unwrap_err();
        assert_eq!(err, ExtractionError::overflow("amount"));

        let err = GstLineItem::new("Big", "8471", Decimal::ONE, Decimal::MAX, dec("9"), dec("0"))
            .unwrap_err();
        assert_eq!(err, ExtractionError::overflow("cgstAmount"));
    }

    #[test]
    fn test_gst_line_item_json_keys() {
        let item = GstLineItem::new("Service", "998800", dec("2"), dec("100"), dec("9"), dec("9")).unwrap();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "description": "Service",
                "hsnSac": "998800",
                "quantity": 2.0,
                "rate": 100.0,
                "cgstPercent": 9.0,
                "sgstPercent": 9.0,
                "amount": 200.0
            })
        );
    }

    #[test]
    fn test_invoice_record_json_keys() {
        let record = InvoiceRecord {
            invoice_number: "INV-001".to_string(),
            date: "July 29, 2022".to_string(),
            bill_to: BillTo {
                name: "AVERY DAVIS".to_string(),
                ..BillTo::default()
            },
            items: vec![LineItem::new("Baby formula", dec("18.99"), 3).unwrap()],
            subtotal: dec("56.97"),
            tax_rate: dec("0.10"),
            tax_amount: dec("5.697"),
            total: dec("62.667"),
        };

        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in ["invoiceNumber", "date", "billTo", "items", "subtotal", "taxRate", "taxAmount", "total"] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(json["taxRate"], serde_json::json!(0.1));
        assert_eq!(json["items"][0]["quantity"], serde_json::json!(3));
    }
}
