use crate::core::aggregator::tally_file;
use crate::core::{ConfigProvider, FileTally, Reporter, SeverityTotals, Storage};
use crate::utils::error::{Result, TallyError};

pub const CSV_EXTENSION: &str = "csv";

/// What a finished run looked like, for the caller to log or assert on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_found: usize,
    pub totals: SeverityTotals,
}

pub struct TallyEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TallyEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn discover(&self) -> Result<Vec<String>> {
        self.storage.list_files(CSV_EXTENSION)
    }

    /// Counts one file. Every error returned here is file-scoped.
    pub fn process_file(&self, name: &str) -> Result<FileTally> {
        let reader = self.storage.open(name)?;
        tally_file(
            name,
            reader,
            self.config.severity_column(),
            self.config.delimiter(),
        )
    }

    pub fn run<R: Reporter>(&self, reporter: &mut R) -> Result<RunSummary> {
        let location = self.storage.location();
        tracing::info!("🔍 Scanning {} for CSV files", location);

        let files = self.discover()?;
        if files.is_empty() {
            tracing::info!("No CSV files found in {}", location);
            reporter.no_files(location)?;
            return Ok(RunSummary::default());
        }

        tracing::info!("Found {} CSV file(s)", files.len());
        reporter.begin(location, files.len())?;

        let totals = files
            .iter()
            .try_fold(SeverityTotals::default(), |mut totals, name| {
                reporter.file_started(name)?;
                match self.process_file(name) {
                    Ok(tally) => {
                        tracing::debug!(
                            "{}: {} rows counted ({} in known categories)",
                            name,
                            tally.counts.total(),
                            tally.counts.known.sum()
                        );
                        reporter.file_counted(&tally)?;
                        totals.absorb(&tally);
                    }
                    Err(e) if e.is_file_scoped() => {
                        log_skipped(&e);
                        reporter.file_skipped(&e)?;
                        totals.skip();
                    }
                    Err(e) => return Err(e),
                }
                Ok::<_, TallyError>(totals)
            })?;

        reporter.summary(&totals)?;

        tracing::info!(
            "✅ Processed {} of {} file(s), {} skipped",
            totals.files_processed,
            files.len(),
            totals.files_skipped
        );

        Ok(RunSummary {
            files_found: files.len(),
            totals,
        })
    }
}

fn log_skipped(error: &TallyError) {
    match error {
        TallyError::MissingColumnError { .. } => {
            tracing::warn!("⚠️  {}, skipping", error);
        }
        _ => {
            tracing::error!("❌ {}", error.user_friendly_message());
            tracing::debug!("💡 {}", error.recovery_suggestion());
        }
    }
}
