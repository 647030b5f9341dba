use anyhow::Context;
use clap::Parser;
use severity_tally::core::{ConfigProvider, OutputFormat};
use severity_tally::utils::logger;
use severity_tally::{
    CliConfig, JsonReporter, LocalStorage, Settings, TallyEngine, TextReporter,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Settings decide the log level, so they are resolved before logging starts.
    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match settings.output_format() {
        OutputFormat::Text => logger::init_cli_logger(settings.verbose),
        OutputFormat::Json => logger::init_json_logger(settings.verbose),
    }

    tracing::info!("Starting severity-tally v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Settings: {:?}", settings);

    let directory = settings.input_dir().to_string();
    let storage = LocalStorage::new(directory.clone());
    let format = settings.output_format();
    let engine = TallyEngine::new(storage, settings);

    let stdout = std::io::stdout().lock();
    let result = match format {
        OutputFormat::Text => engine.run(&mut TextReporter::new(stdout)),
        OutputFormat::Json => engine.run(&mut JsonReporter::new(stdout)),
    };

    let summary = result
        .inspect_err(|e| {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        })
        .with_context(|| format!("could not tally severities in {}", directory))?;

    tracing::debug!(
        "Run finished: {} file(s) found, grand total {}",
        summary.files_found,
        summary.totals.grand_total()
    );

    // Files that failed to parse were reported above; they never fail the run.
    Ok(())
}
