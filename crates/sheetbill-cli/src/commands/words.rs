//! Words command - spell out a number in the Indian numbering system.

use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;

use sheetbill_core::{amount_in_words, number_to_words_indian};

use super::config::load_config;

/// Arguments for the words command.
#[derive(Args)]
pub struct WordsArgs {
    /// Whole number, or a decimal amount with --amount
    #[arg(required = true, allow_hyphen_values = true)]
    value: String,

    /// Render as a currency phrase (e.g. "Indian Rupee ... Only")
    #[arg(long)]
    amount: bool,
}

pub fn run(args: WordsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.amount {
        let config = load_config(config_path)?;
        let amount = Decimal::from_str(args.value.trim())
            .map_err(|e| anyhow::anyhow!("Invalid amount {:?}: {}", args.value, e))?;
        println!("{}", amount_in_words(amount, &config.words));
    } else {
        let number: u64 = args
            .value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid number {:?}: {}", args.value, e))?;
        println!("{}", number_to_words_indian(number).trim_end());
    }

    Ok(())
}
