use crate::core::OutputFormat;
use crate::utils::error::{Result, TallyError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every key may be omitted; CLI flags win over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub directory: Option<String>,
    pub column: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TallyError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TallyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TallyError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn directory(&self) -> Option<&str> {
        self.input.as_ref()?.directory.as_deref()
    }

    pub fn column(&self) -> Option<&str> {
        self.input.as_ref()?.column.as_deref()
    }

    pub fn delimiter(&self) -> Option<&str> {
        self.input.as_ref()?.delimiter.as_deref()
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.output.as_ref()?.format
    }

    pub fn verbose(&self) -> Option<bool> {
        self.logging.as_ref()?.verbose
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(directory) = self.directory() {
            validation::validate_path("input.directory", directory)?;
        }
        if let Some(column) = self.column() {
            validation::validate_non_empty_string("input.column", column)?;
        }
        if let Some(delimiter) = self.delimiter() {
            validation::parse_delimiter("input.delimiter", delimiter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
directory = "./scans"
column = "Risk"
delimiter = ";"

[output]
format = "json"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.directory(), Some("./scans"));
        assert_eq!(config.column(), Some("Risk"));
        assert_eq!(config.delimiter(), Some(";"));
        assert_eq!(config.format(), Some(OutputFormat::Json));
        assert_eq!(config.verbose(), Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.directory(), None);
        assert_eq!(config.format(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SEVERITY_TALLY_TEST_DIR", "/data/exports");

        let config = TomlConfig::from_toml_str(
            r#"
[input]
directory = "${SEVERITY_TALLY_TEST_DIR}/q4"
"#,
        )
        .unwrap();
        assert_eq!(config.directory(), Some("/data/exports/q4"));

        std::env::remove_var("SEVERITY_TALLY_TEST_DIR");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let config = TomlConfig::from_toml_str(
            r#"
[input]
directory = "${SEVERITY_TALLY_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(config.directory(), Some("${SEVERITY_TALLY_SURELY_UNSET}"));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[input]
column = "  "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[input]
delimiter = "::"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_and_formats_are_rejected() {
        assert!(TomlConfig::from_toml_str("[input]\nfolder = \"x\"\n").is_err());
        assert!(TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\ndirectory = \"/tmp/scans\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.directory(), Some("/tmp/scans"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, TallyError::ConfigError { .. }));
    }
}
