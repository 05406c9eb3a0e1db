pub mod bundle_writer;
pub mod record;
pub mod report;

pub use bundle_writer::BundleWriter;
pub use record::{FileRecord, RecordContent, READ_ERROR_PREFIX};
pub use report::{AggregationReport, UnreadableFile};

use crate::config::ScanConfig;
use crate::error::{AggregateError, Result};
use crate::scanner::{ScanEvent, SkippedEntry, SourceScanner};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Notifications emitted while a run is in progress.
pub enum AggregationEvent<'a> {
    RecordWritten {
        record: &'a FileRecord,
        report: &'a AggregationReport,
    },
    EntrySkipped(&'a SkippedEntry),
}

pub struct Aggregator {
    scan_config: ScanConfig,
}

impl Aggregator {
    pub fn new(scan_config: &ScanConfig) -> Self {
        Self {
            scan_config: scan_config.clone(),
        }
    }

    /// Walks `root` and writes one record per matching file into `output`.
    ///
    /// The root is checked before `output` is touched, so a bad root never
    /// leaves an empty output file behind. Unreadable files become error
    /// records; only root and output failures abort the run.
    pub fn run(
        &self,
        root: &Path,
        output: &Path,
        on_event: Option<&dyn Fn(&AggregationEvent<'_>)>,
    ) -> Result<AggregationReport> {
        let start_time = Instant::now();

        SourceScanner::validate_root(root)?;
        let mut writer = BundleWriter::create(output)?;

        let mut scanner = SourceScanner::new(&self.scan_config);
        if let Ok(canonical_output) = fs::canonicalize(output) {
            scanner = scanner.with_excluded_path(canonical_output);
        }

        let mut report = AggregationReport::new(root.to_path_buf(), output.to_path_buf());

        for event in scanner.scan(root)? {
            match event {
                ScanEvent::File(source) => {
                    let record = FileRecord::load(&source);
                    let bytes = writer
                        .write_record(&record)
                        .map_err(|e| write_error(output, e))?;
                    report.record_written(&record, bytes);

                    if let Some(callback) = on_event {
                        callback(&AggregationEvent::RecordWritten {
                            record: &record,
                            report: &report,
                        });
                    }
                }
                ScanEvent::Skipped(entry) => {
                    if let Some(callback) = on_event {
                        callback(&AggregationEvent::EntrySkipped(&entry));
                    }
                    report.entry_skipped(entry);
                }
            }
        }

        writer.finish().map_err(|e| write_error(output, e))?;
        report.finish(start_time.elapsed());

        Ok(report)
    }
}

fn write_error(output: &Path, source: std::io::Error) -> AggregateError {
    AggregateError::OutputWrite {
        path: output.display().to_string(),
        source,
    }
}
