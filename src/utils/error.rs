use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Column '{column}' not found in {file}")]
    MissingColumnError { file: String, column: String },

    #[error("{source}")]
    ParseError {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source}")]
    FileIoError {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No columns to parse from file")]
    EmptyFileError { file: String },

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    MalformedRowError {
        file: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Cannot list {location}: {source}")]
    ListingError {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TallyError {
    /// The file an input error belongs to, if any.
    pub fn file(&self) -> Option<&str> {
        match self {
            TallyError::MissingColumnError { file, .. }
            | TallyError::ParseError { file, .. }
            | TallyError::FileIoError { file, .. }
            | TallyError::EmptyFileError { file }
            | TallyError::MalformedRowError { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Errors that only cost the run a single file.
    pub fn is_file_scoped(&self) -> bool {
        self.file().is_some()
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TallyError::MissingColumnError { .. }
            | TallyError::ParseError { .. }
            | TallyError::FileIoError { .. }
            | TallyError::EmptyFileError { .. }
            | TallyError::MalformedRowError { .. }
            | TallyError::ListingError { .. } => ErrorCategory::Input,
            TallyError::ConfigError { .. } | TallyError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            TallyError::IoError(_) | TallyError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TallyError::MissingColumnError { .. } => ErrorSeverity::Low,
            TallyError::ParseError { .. }
            | TallyError::FileIoError { .. }
            | TallyError::EmptyFileError { .. }
            | TallyError::MalformedRowError { .. } => ErrorSeverity::Medium,
            TallyError::ListingError { .. }
            | TallyError::ConfigError { .. }
            | TallyError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            TallyError::IoError(_) | TallyError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TallyError::MissingColumnError { column, .. } => format!(
                "Check the export's header row or pass --column if the severity column is not named '{}'",
                column
            ),
            TallyError::ParseError { .. } => {
                "Check that the file is valid delimited text and that --delimiter matches it".to_string()
            }
            TallyError::FileIoError { .. } => {
                "Check that the file is readable by the current user".to_string()
            }
            TallyError::EmptyFileError { .. } => {
                "Re-export the scan results; the file has no header row".to_string()
            }
            TallyError::MalformedRowError { line, .. } => format!(
                "Line {} has more fields than the header; check for an unquoted delimiter",
                line
            ),
            TallyError::ListingError { .. } => {
                "Check that the directory exists and is readable by the current user".to_string()
            }
            TallyError::ConfigError { .. } => "Check the TOML configuration syntax".to_string(),
            TallyError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            TallyError::IoError(_) => "Check that standard output is writable".to_string(),
            TallyError::SerializationError(_) => "Retry with --format text".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TallyError::MissingColumnError { file, column } => {
                format!("Column '{}' not found in {}", column, file)
            }
            TallyError::ParseError { file, source } => {
                format!("Error processing {}: {}", file, source)
            }
            TallyError::FileIoError { file, source } => {
                format!("Error processing {}: {}", file, source)
            }
            TallyError::EmptyFileError { file } => {
                format!("Error processing {}: {}", file, self)
            }
            TallyError::MalformedRowError { file, .. } => {
                format!("Error processing {}: {}", file, self)
            }
            TallyError::ListingError { .. } => self.to_string(),
            TallyError::ConfigError { message } => format!("Configuration problem: {}", message),
            TallyError::InvalidConfigValueError { .. } => self.to_string(),
            TallyError::IoError(e) => format!("Failed to write report: {}", e),
            TallyError::SerializationError(e) => format!("Failed to encode report: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_scoped_errors_carry_file_name() {
        let err = TallyError::MissingColumnError {
            file: "scan.csv".to_string(),
            column: "Severity".to_string(),
        };
        assert!(err.is_file_scoped());
        assert_eq!(err.file(), Some("scan.csv"));
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Column 'Severity' not found in scan.csv");
    }

    #[test]
    fn test_config_errors_are_not_file_scoped() {
        let err = TallyError::InvalidConfigValueError {
            field: "input.delimiter".to_string(),
            value: ";;".to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        };
        assert!(!err.is_file_scoped());
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("input.delimiter"));
    }

    #[test]
    fn test_listing_error_is_fatal_input_error() {
        let err = TallyError::ListingError {
            location: "/scans".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_file_scoped());
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("directory"));
        assert_eq!(err.user_friendly_message(), "Cannot list /scans: denied");
    }

    #[test]
    fn test_malformed_row_message() {
        let err = TallyError::MalformedRowError {
            file: "scan.csv".to_string(),
            line: 3,
            expected: 2,
            found: 3,
        };
        assert!(err.is_file_scoped());
        assert_eq!(
            err.user_friendly_message(),
            "Error processing scan.csv: Expected 2 fields in line 3, saw 3"
        );
    }

    #[test]
    fn test_empty_file_message_names_file() {
        let err = TallyError::EmptyFileError {
            file: "empty.csv".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Error processing empty.csv: No columns to parse from file"
        );
    }
}
