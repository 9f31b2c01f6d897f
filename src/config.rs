use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ingest::RecordParser;
use crate::output::OutputFormat;
use crate::types::ColumnNames;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_quote")]
    pub quote: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    #[serde(default = "default_crowded_threshold")]
    pub crowded_threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub delimiter: Option<char>,
    pub format: Option<OutputFormat>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/coverage-atlas/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(delimiter) = overrides.delimiter {
            self.input.delimiter = delimiter;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn parser(&self) -> RecordParser {
        RecordParser::new()
            .with_delimiter(self.input.delimiter)
            .with_quote(self.input.quote)
    }

    pub fn default_template() -> String {
        let template = r#"[input]
delimiter = ","
quote = '"'

[columns]
entity = "Number - Name"
tags = "Tags"
area = "Area"
category = "Category"
subcategory = "Subcategory"
depth = "Depth of Coverage"
justification = "Justification"

[heatmap]
crowded_threshold = 3

[output]
format = "table"
"#;
        template.to_string()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            quote: default_quote(),
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            crowded_threshold: default_crowded_threshold(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_quote() -> char {
    '"'
}

fn default_crowded_threshold() -> usize {
    3
}
