pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ScanConfig, DEFAULT_OUTPUT_FILE};
pub use error::{AggregateError, Result, UserFriendlyError};

// Core functionality re-exports
pub use aggregator::{
    AggregationEvent, AggregationReport, Aggregator, BundleWriter, FileRecord, RecordContent,
};
pub use scanner::{FileFilter, ScanEvent, SkippedEntry, SourceFile, SourceScanner, ALLOWED_EXTENSIONS};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::path::Path;

/// Main library interface: an aggregator wired to console output and progress.
pub struct CodeAgg {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CodeAgg {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress =
            config.output.show_progress && !quiet && output_mode != OutputMode::Json;
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create CodeAgg instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Aggregate every matching file under `root` into `output`.
    pub fn aggregate(&self, root: &Path, output: &Path) -> Result<AggregationReport> {
        self.output_formatter.start_operation(&format!(
            "Aggregating {} into {}",
            root.display(),
            output.display()
        ));

        let spinner = self.progress_manager.create_spinner("Scanning...");
        let out = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));

        let on_event = |event: &AggregationEvent<'_>| match event {
            AggregationEvent::RecordWritten { record, report } => {
                let path = record.display_path();
                ui::progress::update_aggregation_progress(&spinner, &path, report);

                if let RecordContent::Unreadable(ref error) = record.content {
                    out.warning(&format!("Could not read {}: {}", path, error));
                } else {
                    out.debug(&format!("Wrote {}", path));
                }
            }
            AggregationEvent::EntrySkipped(entry) => {
                out.warning(&format!("Skipped {}: {}", entry.path, entry.reason));
            }
        };

        let aggregator = Aggregator::new(&self.config.scan);
        let result = aggregator.run(root, output, Some(&on_event));

        match result {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &spinner,
                    &format!("Wrote {} files", report.records_written),
                    report.duration,
                );
                self.progress_manager.clear();
                Ok(report)
            }
            Err(e) => {
                spinner.abandon();
                self.progress_manager.clear();
                Err(e)
            }
        }
    }

    /// Files that `aggregate` would write, in output order.
    pub fn plan(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let scanner = SourceScanner::new(&self.config.scan);
        let (files, skipped) = scanner.collect_files(root)?;

        for entry in &skipped {
            self.output_formatter
                .warning(&format!("Skipped {}: {}", entry.path, entry.reason));
        }

        Ok(files)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &AggregateError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Aggregate `root` into `output` with default settings and no console output.
pub fn aggregate<P: AsRef<Path>, Q: AsRef<Path>>(root: P, output: Q) -> Result<AggregationReport> {
    Aggregator::new(&ScanConfig::default()).run(root.as_ref(), output.as_ref(), None)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
