//! Process command - extract an invoice from a single grid file.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use sheetbill_core::models::config::SheetbillConfig;
use sheetbill_core::{
    process_file, ExtractedInvoice, GstInvoiceRecord, InvoiceKind, InvoiceRecord,
};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input grid file (JSON array of rows)
    #[arg(required = true)]
    input: PathBuf,

    /// Sheet layout
    #[arg(short, long, value_enum, default_value = "generic")]
    layout: Layout,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Layout {
    /// Generic invoice
    Generic,
    /// GST (India) tax invoice
    Gst,
}

impl From<Layout> for InvoiceKind {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Generic => InvoiceKind::Generic,
            Layout::Gst => InvoiceKind::Gst,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if args.pretty {
        config.output.pretty_json = true;
    }

    info!("Processing file: {}", args.input.display());

    let invoice = process_file(&args.input, args.layout.into())?;
    let output = format_invoice(&invoice, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_invoice(
    invoice: &ExtractedInvoice,
    format: OutputFormat,
    config: &SheetbillConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if config.output.pretty_json => Ok(serde_json::to_string_pretty(invoice)?),
        OutputFormat::Json => Ok(serde_json::to_string(invoice)?),
        OutputFormat::Csv => format_csv(invoice, config),
        OutputFormat::Text => format_text(invoice, config),
    }
}

fn money(amount: Decimal, config: &SheetbillConfig) -> String {
    let places = config.output.decimal_places;
    format!("{:.*}", places as usize, amount.round_dp(places))
}

fn format_csv(invoice: &ExtractedInvoice, config: &SheetbillConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    match invoice {
        ExtractedInvoice::Generic(record) => {
            wtr.write_record(["invoice_number", "description", "price", "quantity", "amount"])?;
            for item in &record.items {
                wtr.write_record([
                    &record.invoice_number,
                    &item.description,
                    &money(item.price, config),
                    &item.quantity.to_string(),
                    &money(item.amount, config),
                ])?;
            }
        }
        ExtractedInvoice::Gst(record) => {
            wtr.write_record([
                "invoice_number",
                "description",
                "hsn_sac",
                "quantity",
                "rate",
                "cgst_percent",
                "cgst_amount",
                "sgst_percent",
                "sgst_amount",
                "amount",
            ])?;
            for item in &record.items {
                wtr.write_record([
                    &record.invoice_number,
                    &item.description,
                    &item.hsn_sac,
                    &money(item.quantity, config),
                    &money(item.rate, config),
                    &item.cgst_percent.to_string(),
                    &money(item.cgst_amount()?, config),
                    &item.sgst_percent.to_string(),
                    &money(item.sgst_amount()?, config),
                    &money(item.amount, config),
                ])?;
            }
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(invoice: &ExtractedInvoice, config: &SheetbillConfig) -> anyhow::Result<String> {
    match invoice {
        ExtractedInvoice::Generic(record) => Ok(format_generic_text(record, config)),
        ExtractedInvoice::Gst(record) => format_gst_text(record, config),
    }
}

fn format_generic_text(record: &InvoiceRecord, config: &SheetbillConfig) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Invoice: {}", record.invoice_number);
    let _ = writeln!(output, "Date: {}", record.date);
    output.push('\n');

    output.push_str("Bill To:\n");
    let bill_to = &record.bill_to;
    for line in [&bill_to.name, &bill_to.phone, &bill_to.email, &bill_to.address] {
        if !line.is_empty() {
            let _ = writeln!(output, "  {}", line);
        }
    }
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.items {
        let _ = writeln!(
            output,
            "  {} - {} x {} = {}",
            item.description,
            item.quantity,
            money(item.price, config),
            money(item.amount, config)
        );
    }
    output.push('\n');

    output.push_str("Summary:\n");
    let _ = writeln!(output, "  Subtotal: {}", money(record.subtotal, config));
    let _ = writeln!(
        output,
        "  Tax ({}%): {}",
        (record.tax_rate * Decimal::ONE_HUNDRED).normalize(),
        money(record.tax_amount, config)
    );
    let _ = writeln!(output, "  Total:    {}", money(record.total, config));

    output
}

fn format_gst_text(record: &GstInvoiceRecord, config: &SheetbillConfig) -> anyhow::Result<String> {
    let mut output = String::new();

    let _ = writeln!(output, "Tax Invoice: {}", record.invoice_number);
    let _ = writeln!(output, "Invoice Date: {}", record.invoice_date);
    let _ = writeln!(output, "Due Date: {}", record.due_date);
    let _ = writeln!(output, "Place Of Supply: {}", record.place_of_supply);
    output.push('\n');

    let customer = &record.customer_details;
    output.push_str("Bill To:\n");
    let _ = writeln!(output, "  {}", customer.name);
    let _ = writeln!(output, "  {}", customer.address);
    let _ = writeln!(output, "  {} {} {}", customer.city, customer.pincode, customer.state);
    let _ = writeln!(output, "  {}", customer.country);
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.items {
        let _ = writeln!(
            output,
            "  {} (HSN/SAC {}) - {} x {} = {}  CGST {}% {}  SGST {}% {}",
            item.description,
            item.hsn_sac,
            money(item.quantity, config),
            money(item.rate, config),
            money(item.amount, config),
            item.cgst_percent.normalize(),
            money(item.cgst_amount()?, config),
            item.sgst_percent.normalize(),
            money(item.sgst_amount()?, config)
        );
    }
    output.push('\n');

    output.push_str("Summary:\n");
    let _ = writeln!(output, "  Sub Total:    {}", money(record.sub_total, config));
    let _ = writeln!(output, "  CGST:         {}", money(record.cgst_total, config));
    let _ = writeln!(output, "  SGST:         {}", money(record.sgst_total, config));
    let _ = writeln!(output, "  Total:        Rs.{}", money(record.total_amount, config));
    let _ = writeln!(output, "  Payment Made: (-) {}", money(record.payment_made, config));
    let _ = writeln!(output, "  Balance Due:  Rs.{}", money(record.balance_due, config));
    output.push('\n');

    let words = record.amounts_in_words(&config.words);
    let _ = writeln!(output, "Total In Words: {}", words.total_amount);
    let _ = writeln!(output, "Payment Made In Words: {}", words.payment_made);
    let _ = writeln!(output, "Balance Due In Words: {}", words.balance_due);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbill_core::process_grid;
    use sheetbill_core::sample::{generic_sample_grid, gst_sample_grid};

    #[test]
    fn test_generic_text_summary() {
        let invoice = process_grid(&generic_sample_grid(), InvoiceKind::Generic, None).unwrap();
        let text = format_text(&invoice, &SheetbillConfig::default()).unwrap();

        assert!(text.contains("Invoice: INV-001"));
        assert!(text.contains("Diapers (pack of 50) - 2 x 25.99 = 51.98"));
        assert!(text.contains("Tax (10%): 16.19"));
        assert!(text.contains("Total:    178.13"));
    }

    #[test]
    fn test_gst_text_has_words() {
        let invoice = process_grid(&gst_sample_grid(), InvoiceKind::Gst, None).unwrap();
        let text = format_text(&invoice, &SheetbillConfig::default()).unwrap();

        assert!(text.contains("Balance Due:  Rs.-711.46"));
        assert!(text.contains("Total In Words: Indian Rupee Two Hundred Eighty Eight Only"));
    }

    #[test]
    fn test_gst_csv_rows() {
        let invoice = process_grid(&gst_sample_grid(), InvoiceKind::Gst, None).unwrap();
        let csv = format_invoice(&invoice, OutputFormat::Csv, &SheetbillConfig::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("invoice_number,description,hsn_sac"));
        assert!(lines[2].contains("Additional Service,998800,2.00,100.00,9,18.00,9,18.00,200.00"));
    }
}
