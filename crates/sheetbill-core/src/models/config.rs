//! Configuration structures for output rendering.

use serde::{Deserialize, Serialize};

/// Main configuration for sheetbill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetbillConfig {
    /// Output rendering configuration.
    pub output: OutputConfig,

    /// Amount-in-words configuration.
    pub words: WordsConfig,
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Decimal places for amounts in text and CSV output.
    pub decimal_places: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            decimal_places: 2,
        }
    }
}

/// Currency phrase used when writing amounts in words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    /// Currency name placed before the words.
    pub currency: String,

    /// Word placed after the amount.
    pub suffix: String,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            currency: "Indian Rupee".to_string(),
            suffix: "Only".to_string(),
        }
    }
}

impl SheetbillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SheetbillConfig =
            serde_json::from_str(r#"{"words": {"currency": "Rupees"}}"#).unwrap();
        assert_eq!(config.words.currency, "Rupees");
        assert_eq!(config.words.suffix, "Only");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SheetbillConfig::default();
        config.output.pretty_json = true;
        config.save(&path).unwrap();

        assert_eq!(SheetbillConfig::from_file(&path).unwrap(), config);
    }
}
