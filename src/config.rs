// Configuration file handling.
//
// Settings come from an optional `.bike_report.toml`; command-line
// arguments override whatever the file says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".bike_report.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Dataset path.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    /// Calendar year encoded as `yr = 0`.
    #[serde(default = "default_base_year")]
    pub base_year: i32,

    /// Where exports go. No exports when unset.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            base_year: default_base_year(),
            export_dir: None,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("day.csv")
}

fn default_base_year() -> i32 {
    2011
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_chart_width() -> usize {
    50
}

fn default_preview_rows() -> usize {
    5
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// `Ok(None)` when the default file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref path) = args.data {
            self.data.path = path.clone();
        }
        if let Some(base_year) = args.base_year {
            self.data.base_year = base_year;
        }
        if let Some(ref dir) = args.export_dir {
            self.data.export_dir = Some(dir.clone());
        }
        if let Some(width) = args.chart_width {
            self.display.chart_width = width;
        }
        if let Some(rows) = args.preview_rows {
            self.display.preview_rows = rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("day.csv"));
        assert_eq!(config.data.base_year, 2011);
        assert_eq!(config.data.export_dir, None);
        assert_eq!(config.display.chart_width, 50);
        assert_eq!(config.display.preview_rows, 5);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"data/day.csv\"\n\n[display]\nchart_width = 30").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data.path, PathBuf::from("data/day.csv"));
        assert_eq!(config.data.base_year, 2011);
        assert_eq!(config.display.chart_width, 30);
        assert_eq!(config.display.preview_rows, 5);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nchart_width = \"wide\"").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_args_override_file() {
        let mut config = Config::default();
        config.display.chart_width = 30;
        config.data.base_year = 2000;

        let args = Args::try_parse_from([
            "bike_report",
            "--data",
            "other.csv",
            "--preview-rows",
            "10",
        ])
        .unwrap();
        config.merge_with_args(&args);

        assert_eq!(config.data.path, PathBuf::from("other.csv"));
        assert_eq!(config.display.preview_rows, 10);
        assert_eq!(config.display.chart_width, 30);
        assert_eq!(config.data.base_year, 2000);
    }
}
