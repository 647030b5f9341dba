use crate::core::{FileTally, Reporter, Severity, SeverityBreakdown, SeverityTotals};
use crate::utils::error::{Result, TallyError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

const RULE_WIDTH: usize = 80;

/// Plain-text layout for terminals.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_breakdown(&mut self, counts: &SeverityBreakdown, total: u64) -> Result<()> {
        for severity in Severity::ALL {
            writeln!(self.out, "{:<10}: {}", severity.as_str(), counts.get(severity))?;
        }
        writeln!(self.out, "{:<10}: {}", "TOTAL", total)?;
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn no_files(&mut self, location: &str) -> Result<()> {
        writeln!(self.out, "No CSV files found in {}", location)?;
        Ok(())
    }

    fn begin(&mut self, _location: &str, file_count: usize) -> Result<()> {
        writeln!(self.out, "Found {} CSV file(s)\n", file_count)?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn file_started(&mut self, file: &str) -> Result<()> {
        writeln!(self.out, "\n📄 File: {}", file)?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn file_counted(&mut self, tally: &FileTally) -> Result<()> {
        self.write_breakdown(&tally.counts.known, tally.counts.total())
    }

    fn file_skipped(&mut self, error: &TallyError) -> Result<()> {
        match error {
            TallyError::MissingColumnError { .. } => writeln!(self.out, "⚠️  {}", error)?,
            _ => writeln!(self.out, "❌ {}", error.user_friendly_message())?,
        }
        Ok(())
    }

    fn summary(&mut self, totals: &SeverityTotals) -> Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.out, "📊 SUMMARY ACROSS ALL FILES")?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        self.write_breakdown(&totals.counts, totals.grand_total())?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum FileStatus {
    Ok,
    Skipped,
}

#[derive(Debug, Serialize)]
struct FileEntry {
    file: String,
    status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<SeverityBreakdown>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    other: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    counts: SeverityBreakdown,
    total: u64,
    files_processed: usize,
    files_skipped: usize,
}

#[derive(Debug, Default, Serialize)]
struct JsonReport {
    directory: String,
    files: Vec<FileEntry>,
    summary: Summary,
}

/// Buffers the run and writes a single JSON document at the end.
pub struct JsonReporter<W: Write> {
    out: W,
    report: JsonReport,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            report: JsonReport::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_report(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn no_files(&mut self, location: &str) -> Result<()> {
        self.report.directory = location.to_string();
        self.flush_report()
    }

    fn begin(&mut self, location: &str, file_count: usize) -> Result<()> {
        self.report.directory = location.to_string();
        self.report.files.reserve(file_count);
        Ok(())
    }

    fn file_started(&mut self, _file: &str) -> Result<()> {
        Ok(())
    }

    fn file_counted(&mut self, tally: &FileTally) -> Result<()> {
        self.report.files.push(FileEntry {
            file: tally.file.clone(),
            status: FileStatus::Ok,
            counts: Some(tally.counts.known),
            other: tally.counts.other.clone(),
            total: Some(tally.counts.total()),
            reason: None,
        });
        Ok(())
    }

    fn file_skipped(&mut self, error: &TallyError) -> Result<()> {
        self.report.files.push(FileEntry {
            file: error.file().unwrap_or_default().to_string(),
            status: FileStatus::Skipped,
            counts: None,
            other: BTreeMap::new(),
            total: None,
            reason: Some(error.to_string()),
        });
        Ok(())
    }

    fn summary(&mut self, totals: &SeverityTotals) -> Result<()> {
        self.report.summary = Summary {
            counts: totals.counts,
            total: totals.grand_total(),
            files_processed: totals.files_processed,
            files_skipped: totals.files_skipped,
        };
        self.flush_report()
    }
}
