//! Sample command - write a sample grid in one of the supported layouts.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use sheetbill_core::sample::{generic_sample_grid, gst_sample_grid};
use sheetbill_core::InvoiceKind;

use super::process::Layout;

/// Arguments for the sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Output grid file
    #[arg(required = true)]
    output: PathBuf,

    /// Sheet layout
    #[arg(short, long, value_enum, default_value = "generic")]
    layout: Layout,
}

pub fn run(args: SampleArgs) -> anyhow::Result<()> {
    let grid = match InvoiceKind::from(args.layout) {
        InvoiceKind::Generic => generic_sample_grid(),
        InvoiceKind::Gst => gst_sample_grid(),
    };

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.output, grid.to_json_string_pretty()?)?;

    println!(
        "{} Sample grid written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}
