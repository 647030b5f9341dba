use crate::domain::model::{FileTally, SeverityTotals};
use crate::utils::error::{Result, TallyError};
use std::io::Read;

pub trait Storage {
    /// Human-readable location used in messages.
    fn location(&self) -> &str;
    /// Names of the files directly under the location with the given extension.
    fn list_files(&self, extension: &str) -> Result<Vec<String>>;
    fn open(&self, name: &str) -> Result<Box<dyn Read + '_>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub trait ConfigProvider {
    fn input_dir(&self) -> &str;
    fn severity_column(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn output_format(&self) -> OutputFormat;
}

/// Receives the run's events in order and renders them.
pub trait Reporter {
    fn no_files(&mut self, location: &str) -> Result<()>;
    fn begin(&mut self, location: &str, file_count: usize) -> Result<()>;
    fn file_started(&mut self, file: &str) -> Result<()>;
    fn file_counted(&mut self, tally: &FileTally) -> Result<()>;
    fn file_skipped(&mut self, error: &TallyError) -> Result<()>;
    fn summary(&mut self, totals: &SeverityTotals) -> Result<()>;
}
