//! WASM bindings for spreadsheet invoice extraction.
//!
//! Grids are passed in as JS arrays of rows; records come back as plain
//! objects with the same camelCase fields as the JSON output.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use sheetbill_core::{
    amount_in_words as core_amount_in_words, number_to_words_indian, Cell, GenericExtractor,
    Grid, GstExtractor, InvoiceExtractor, WordsConfig,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn read_grid(grid: JsValue) -> Result<Grid, JsValue> {
    serde_wasm_bindgen::from_value(grid).map_err(to_js_error)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn run_extractor<E: InvoiceExtractor>(extractor: &E, grid: &Grid) -> Result<E::Record, String> {
    extractor.extract(grid).map_err(|e| e.to_string())
}

/// Extract a generic invoice from a grid (array of rows).
#[wasm_bindgen]
pub fn extract_invoice(grid: JsValue) -> Result<JsValue, JsValue> {
    let record = run_extractor(&GenericExtractor::new(), &read_grid(grid)?).map_err(to_js_error)?;
    to_js(&record)
}

/// Extract a GST tax invoice from a grid (array of rows).
#[wasm_bindgen]
pub fn extract_gst_invoice(grid: JsValue) -> Result<JsValue, JsValue> {
    let record = run_extractor(&GstExtractor::new(), &read_grid(grid)?).map_err(to_js_error)?;
    to_js(&record)
}

/// Spell out a whole number in Indian words (e.g. 100000 -> "One Lakh").
#[wasm_bindgen]
pub fn number_to_words(n: f64) -> Result<String, JsValue> {
    let n = whole_number(n).map_err(to_js_error)?;
    Ok(number_to_words_indian(n).trim_end().to_string())
}

/// Render an amount as a rupee phrase using the default wording.
#[wasm_bindgen]
pub fn amount_in_words(amount: f64) -> Result<String, JsValue> {
    let amount = Cell::Number(amount)
        .as_decimal()
        .ok_or_else(|| to_js_error(format!("not a finite amount: {amount}")))?;
    Ok(core_amount_in_words(amount, &WordsConfig::default()))
}

fn whole_number(n: f64) -> Result<u64, String> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Ok(n as u64)
    } else {
        Err(format!("expected a non-negative whole number, got {n}"))
    }
}
