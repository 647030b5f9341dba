pub mod toml_config;

use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIRECTORY: &str = ".";
pub const DEFAULT_COLUMN: &str = "Severity";
pub const DEFAULT_DELIMITER: u8 = b',';

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "severity-tally")]
#[command(version)]
#[command(about = "Count vulnerability-scan findings by severity across CSV exports")]
pub struct CliConfig {
    /// Directory containing the CSV exports (not searched recursively)
    #[arg(value_name = "DIR")]
    pub directory: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Name of the severity column
    #[arg(long)]
    pub column: Option<String>,

    /// Field delimiter, a single character or "tab"
    #[arg(long)]
    pub delimiter: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after layering CLI flags over the TOML file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub directory: String,
    pub column: String,
    pub delimiter: u8,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            column: DEFAULT_COLUMN.to_string(),
            delimiter: DEFAULT_DELIMITER,
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let mut settings = Settings::default();
        if let Some(directory) = config.directory() {
            settings.directory = directory.to_string();
        }
        if let Some(column) = config.column() {
            settings.column = column.to_string();
        }
        if let Some(delimiter) = config.delimiter() {
            settings.delimiter = validation::parse_delimiter("input.delimiter", delimiter)?;
        }
        if let Some(format) = config.format() {
            settings.format = format;
        }
        if let Some(verbose) = config.verbose() {
            settings.verbose = verbose;
        }
        Ok(settings)
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?)?,
            None => Settings::default(),
        };

        if let Some(directory) = &cli.directory {
            settings.directory = directory.clone();
        }
        if let Some(column) = &cli.column {
            settings.column = column.clone();
        }
        if let Some(delimiter) = &cli.delimiter {
            settings.delimiter = validation::parse_delimiter("--delimiter", delimiter)?;
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        settings.verbose |= cli.verbose;

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("directory", &self.directory)?;
        validation::validate_non_empty_string("column", &self.column)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn input_dir(&self) -> &str {
        &self.directory
    }

    fn severity_column(&self) -> &str {
        &self.column
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.input_dir(), ".");
        assert_eq!(settings.severity_column(), "Severity");
        assert_eq!(settings.delimiter(), b',');
        assert_eq!(settings.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let config = TomlConfig::from_toml_str(
            "[input]\ndirectory = \"/scans\"\ndelimiter = \"tab\"\n[output]\nformat = \"json\"\n",
        )
        .unwrap();
        let settings = Settings::from_toml(&config).unwrap();

        assert_eq!(settings.directory, "/scans");
        assert_eq!(settings.column, "Severity");
        assert_eq!(settings.delimiter, b'\t');
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[input]\ndirectory = \"/from-toml\"\ncolumn = \"Risk\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "severity-tally",
            "/from-cli",
            "--config",
            file.path().to_str().unwrap(),
            "--format",
            "json",
        ]);
        let settings = Settings::resolve(&cli).unwrap();

        assert_eq!(settings.directory, "/from-cli");
        assert_eq!(settings.column, "Risk");
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_bad_values() {
        let cli = CliConfig::parse_from(["severity-tally", "--delimiter", ",,"]);
        assert!(Settings::resolve(&cli).is_err());

        let cli = CliConfig::parse_from(["severity-tally", "--column", ""]);
        assert!(Settings::resolve(&cli).is_err());

        let cli = CliConfig::parse_from(["severity-tally", ""]);
        assert!(Settings::resolve(&cli).is_err());
    }
}
