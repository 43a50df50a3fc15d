//! Derived invoice totals, computed as folds over extracted line items.

use rust_decimal::Decimal;

use super::Result;
use crate::error::ExtractionError;
use crate::models::invoice::{GstLineItem, LineItem};

/// Fixed tax rate of the generic layout (10%).
pub const GENERIC_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Totals of a generic invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericTotals {
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

fn add(a: Decimal, b: Decimal, field: &str) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| ExtractionError::overflow(field))
}

/// Sum line amounts and apply the fixed tax rate.
pub fn generic_totals(items: &[LineItem]) -> Result<GenericTotals> {
    let subtotal = items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| add(acc, item.amount, "subtotal"))?;
    let tax_amount = subtotal
        .checked_mul(GENERIC_TAX_RATE)
        .ok_or_else(|| ExtractionError::overflow("taxAmount"))?;

    Ok(GenericTotals {
        subtotal,
        tax_rate: GENERIC_TAX_RATE,
        tax_amount,
        total: add(subtotal, tax_amount, "total")?,
    })
}

/// Totals of a GST invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GstTotals {
    pub sub_total: Decimal,
    pub cgst_total: Decimal,
    pub sgst_total: Decimal,
    pub total_amount: Decimal,
    pub payment_made: Decimal,
    pub balance_due: Decimal,
}

/// Accumulate CGST/SGST over all lines and settle against the payment made.
///
/// `sub_total` is the rate of the last line item (zero without items), not a
/// sum of line amounts. Existing sheets print this figure.
pub fn gst_totals(items: &[GstLineItem], payment_made: Decimal) -> Result<GstTotals> {
    let sub_total = items.last().map(|item| item.rate).unwrap_or(Decimal::ZERO);
    let cgst_total = items.iter().try_fold(Decimal::ZERO, |acc, item| {
        add(acc, item.cgst_amount()?, "cgstTotal")
    })?;
    let sgst_total = items.iter().try_fold(Decimal::ZERO, |acc, item| {
        add(acc, item.sgst_amount()?, "sgstTotal")
    })?;
    let total_amount = add(add(sub_total, cgst_total, "totalAmount")?, sgst_total, "totalAmount")?;
    let balance_due = total_amount
        .checked_sub(payment_made)
        .ok_or_else(|| ExtractionError::overflow("balanceDue"))?;

    Ok(GstTotals {
        sub_total,
        cgst_total,
        sgst_total,
        total_amount,
        payment_made,
        balance_due,
    })
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
    fn test_generic_totals() {
        let items = vec![
            LineItem::new("Baby bottles (set of 9)", dec("52.99"), 1).unwrap(),
            LineItem::new("Diapers (pack of 50)", dec("25.99"), 2).unwrap(),
            LineItem::new("Baby formula", dec("18.99"), 3).unwrap(),
        ];
        let totals = generic_totals(&items).unwrap();

        assert_eq!(totals.subtotal, dec("161.94"));
        assert_eq!(totals.tax_rate, dec("0.10"));
        assert_eq!(totals.tax_amount, dec("16.194"));
        assert_eq!(totals.total, dec("178.134"));
    }

    #[test]
    fn test_generic_totals_empty() {
        let totals = generic_totals(&[]).unwrap();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_gst_sub_total_is_last_rate() {
        let items = vec![
            GstLineItem::new("Fee", "999729", dec("1.00"), dec("847.46"), dec("9"), dec("9")).unwrap(),
            GstLineItem::new("Additional Service", "998800", dec("2.00"), dec("100.00"), dec("9"), dec("9")).unwrap(),
        ];
        let totals = gst_totals(&items, dec("1000.00")).unwrap();

        assert_eq!(totals.sub_total, dec("100.00"));
        assert_eq!(totals.cgst_total, dec("94.2714"));
        assert_eq!(totals.sgst_total, dec("94.2714"));
        assert_eq!(totals.total_amount, dec("288.5428"));
        assert_eq!(totals.balance_due, dec("-711.4572"));
    }

    #[test]
    fn test_gst_totals_without_items() {
        let totals = gst_totals(&[], dec("50")).unwrap();
        assert_eq!(totals.sub_total, Decimal::ZERO);
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.balance_due, dec("-50"));
    }

    #[test]
    fn test_gst_uneven_tax_split() {
        let items = vec![
            GstLineItem::new("Goods", "8471", dec("3"), dec("10"), dec("6"), dec("12")).unwrap(),
        ];
        let totals = gst_totals(&items, Decimal::ZERO).unwrap();

        assert_eq!(totals.cgst_total, dec("1.8"));
        assert_eq!(totals.sgst_total, dec("3.6"));
        assert_eq!(totals.total_amount, dec("15.4"));
    }

    #[test]
    fn test_generic_subtotal_overflow() {
        let items = vec![
            LineItem::new("A", Decimal::MAX, 1).unwrap(),
            LineItem::new("B", Decimal::MAX, 1).unwrap(),
        ];
        let err = generic_totals(&items).unwrap_err();
        assert_eq!(err, ExtractionError::overflow("subtotal"));
    }

    #[test]
    fn test_gst_balance_overflow() {
        let items = vec![
            GstLineItem::new("A", "8471", Decimal::ONE, Decimal::MAX, Decimal::ZERO, Decimal::ZERO)
                .unwrap(),
        ];
        let err = gst_totals(&items, Decimal::MIN).unwrap_err();
        assert_eq!(err, ExtractionError::overflow("balanceDue"));
    }
}
