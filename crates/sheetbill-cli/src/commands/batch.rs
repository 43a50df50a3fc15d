//! Batch command - extract every grid file matching a glob pattern.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use sheetbill_core::models::config::SheetbillConfig;
use sheetbill_core::{process_file, ExtractedInvoice, InvoiceKind};

use super::config::load_config;
use super::process::{format_invoice, Layout, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of grid files (only .json files are read)
    #[arg(required = true)]
    input: String,

    /// Sheet layout of every input
    #[arg(short, long, value_enum, default_value = "generic")]
    layout: Layout,

    /// Directory for one output file per input
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write summary.csv (into the output directory when given)
    #[arg(long)]
    summary: bool,

    /// Record failures and keep going instead of stopping
    #[arg(long)]
    continue_on_error: bool,
}

enum Outcome {
    Extracted(ExtractedInvoice),
    Failed(String),
}

/// One line of summary.csv.
#[derive(Serialize)]
struct SummaryRow {
    file: String,
    status: &'static str,
    invoice_number: Option<String>,
    items: Option<usize>,
    total: Option<String>,
    balance_due: Option<String>,
    error: Option<String>,
}

impl SummaryRow {
    fn new(path: &Path, outcome: &Outcome) -> Self {
        let file = path.display().to_string();
        match outcome {
            Outcome::Extracted(invoice) => {
                let (total, balance_due) = match invoice {
                    ExtractedInvoice::Generic(r) => (r.total, r.total),
                    ExtractedInvoice::Gst(r) => (r.total_amount, r.balance_due),
                };
                Self {
                    file,
                    status: "ok",
                    invoice_number: Some(invoice.invoice_number().to_string()),
                    items: Some(invoice.item_count()),
                    total: Some(total.to_string()),
                    balance_due: Some(balance_due.to_string()),
                    error: None,
                }
            }
            Outcome::Failed(message) => Self {
                file,
                status: "failed",
                invoice_number: None,
                items: None,
                total: None,
                balance_due: None,
                error: Some(message.clone()),
            },
        }
    }
}

fn matching_grids(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }
    Ok(files)
}

fn write_output(
    dir: &Path,
    input: &Path,
    invoice: &ExtractedInvoice,
    format: OutputFormat,
    config: &SheetbillConfig,
) -> anyhow::Result<()> {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("invoice");
    let path = dir.join(format!("{}.{}", stem, format.extension()));
    fs::write(&path, format_invoice(invoice, format, config)?)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let kind = InvoiceKind::from(args.layout);
    let files = matching_grids(&args.input)?;

    println!("{} Found {} grid files", style("ℹ").blue(), files.len());

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64).with_style(
        ProgressStyle::default_bar().template("[{bar:30}] {pos}/{len} {msg}")?,
    );

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        pb.set_message(path.display().to_string());

        let outcome = match process_file(&path, kind) {
            Ok(invoice) => {
                if let Some(dir) = &args.output_dir {
                    write_output(dir, &path, &invoice, args.format, &config)?;
                }
                Outcome::Extracted(invoice)
            }
            Err(e) if args.continue_on_error => {
                warn!("Skipping {}: {}", path.display(), e);
                Outcome::Failed(e.to_string())
            }
            Err(e) => {
                pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", path.display(), e);
            }
        };

        outcomes.push((path, outcome));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join("summary.csv");

        let mut wtr = csv::Writer::from_path(&summary_path)?;
        for (path, outcome) in &outcomes {
            wtr.serialize(SummaryRow::new(path, outcome))?;
        }
        wtr.flush()?;
        println!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    let failed: Vec<_> = outcomes
        .iter()
        .filter_map(|(path, outcome)| match outcome {
            Outcome::Failed(message) => Some((path, message)),
            Outcome::Extracted(_) => None,
        })
        .collect();

    println!(
        "{} {} successful, {} failed",
        style("✓").green(),
        outcomes.len() - failed.len(),
        failed.len()
    );
    for (path, message) in failed {
        println!("  {} {}: {}", style("✗").red(), path.display(), message);
    }

    Ok(())
}
