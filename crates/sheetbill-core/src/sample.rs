//! Sample grids in the two supported layouts.
//!
//! Useful for trying the tool out: `sheetbill sample` writes them as JSON.

use crate::grid::{Cell, Grid};
use crate::invoice::PAYMENT_MADE_COLUMN;

/// A generic invoice with three items.
pub fn generic_sample_grid() -> Grid {
    Grid::new(vec![
        vec!["Headers".into(), "Invoice Info".into(), "Customer Info".into(), "Items".into()],
        vec!["INV-001".into(), "July 29, 2022".into()],
        vec![
            "AVERY DAVIS".into(),
            "123-456-7890".into(),
            "avery@email.com".into(),
            "123 Main St, City, ST 12345".into(),
        ],
        vec!["Baby bottles (set of 9)".into(), 52.99.into(), 1i64.into()],
        vec!["Diapers (pack of 50)".into(), 25.99.into(), 2i64.into()],
        vec!["Baby formula".into(), 18.99.into(), 3i64.into()],
    ])
}

/// A GST invoice with two items and a payment of 1000.00.
///
/// Item cells are text, as they often are in sheets exported from other
/// tools; the extractor coerces them.
pub fn gst_sample_grid() -> Grid {
    let mut grid = Grid::new(vec![
        vec![
            "Headers".into(),
            "Invoice Info".into(),
            "Customer Info".into(),
            "Items".into(),
            "Payment".into(),
        ],
        vec![
            "INV-000001".into(),
            "10/07/2025".into(),
            Cell::Empty,
            "10/07/2025".into(),
            "Gujarat (24)".into(),
        ],
        vec![
            "Team RockitRoot - Prachiti Prakash Patil".into(),
            "B-10, Devranya Duplex, Dabhoi-Waghodia Ring Road BRD".into(),
            "Vadodara".into(),
            "Gujarat".into(),
            "390019".into(),
            "India".into(),
        ],
        vec![
            "Ideathon 2025 Competition Registration Fee".into(),
            "999729".into(),
            "1.00".into(),
            "847.46".into(),
            "9".into(),
            "9".into(),
        ],
        vec![
            "Additional Service".into(),
            "998800".into(),
            "2.00".into(),
            "100.00".into(),
            "9".into(),
            "9".into(),
        ],
    ]);
    grid.set(2, PAYMENT_MADE_COLUMN, 1000.0);
    grid
}
