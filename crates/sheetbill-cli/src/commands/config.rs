//! Config command - inspect and edit the sheetbill configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use console::style;
use tracing::debug;

use sheetbill_core::models::config::SheetbillConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the active configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print one setting
    Get { key: ConfigKey },

    /// Change one setting
    Set { key: ConfigKey, value: String },

    /// Print the configuration file location
    Path,
}

/// Settings that can be read or changed from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ConfigKey {
    #[value(name = "output.pretty_json")]
    PrettyJson,
    #[value(name = "output.decimal_places")]
    DecimalPlaces,
    #[value(name = "words.currency")]
    Currency,
    #[value(name = "words.suffix")]
    Suffix,
}

/// Largest scale a decimal amount can carry.
const MAX_DECIMAL_PLACES: u32 = 28;

impl ConfigKey {
    fn read(self, config: &SheetbillConfig) -> String {
        match self {
            ConfigKey::PrettyJson => config.output.pretty_json.to_string(),
            ConfigKey::DecimalPlaces => config.output.decimal_places.to_string(),
            ConfigKey::Currency => config.words.currency.clone(),
            ConfigKey::Suffix => config.words.suffix.clone(),
        }
    }

    fn write(self, config: &mut SheetbillConfig, value: &str) -> anyhow::Result<()> {
        match self {
            ConfigKey::PrettyJson => {
                config.output.pretty_json = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("expected true or false, got {:?}", value))?;
            }
            ConfigKey::DecimalPlaces => {
                let places: u32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("expected a whole number, got {:?}", value))?;
                if places > MAX_DECIMAL_PLACES {
                    anyhow::bail!("decimal places must be at most {}", MAX_DECIMAL_PLACES);
                }
                config.output.decimal_places = places;
            }
            ConfigKey::Currency => {
                if value.trim().is_empty() {
                    anyhow::bail!("currency name cannot be empty");
                }
                config.words.currency = value.trim().to_string();
            }
            ConfigKey::Suffix => config.words.suffix = value.trim().to_string(),
        }
        Ok(())
    }
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("{} No config file at {}, showing defaults.", style("ℹ").blue(), path.display());
            }
            println!("{}", serde_json::to_string_pretty(&read_or_default(&path)?)?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            save(&path, &SheetbillConfig::default())?;
            println!("{} Created {}", style("✓").green(), path.display());
        }
        ConfigCommand::Get { key } => println!("{}", key.read(&read_or_default(&path)?)),
        ConfigCommand::Set { key, value } => {
            let mut config = read_or_default(&path)?;
            key.write(&mut config, &value)?;
            save(&path, &config)?;
            println!("{} Saved {}", style("✓").green(), path.display());
        }
        ConfigCommand::Path => {
            let status = if path.exists() { "exists" } else { "not created" };
            println!("{} ({})", path.display(), status);
        }
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sheetbill")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<SheetbillConfig> {
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(SheetbillConfig::from_file(path)?)
    } else {
        Ok(SheetbillConfig::default())
    }
}

fn save(path: &Path, config: &SheetbillConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// Load the configuration for a command.
///
/// An explicit path must exist; otherwise the default location is used when
/// present, and built-in defaults when not.
pub fn load_config(path: Option<&str>) -> anyhow::Result<SheetbillConfig> {
    match path {
        Some(path) => Ok(SheetbillConfig::from_file(Path::new(path))?),
        None => read_or_default(&default_config_path()),
    }
}
