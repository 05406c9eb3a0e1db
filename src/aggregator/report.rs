use crate::aggregator::record::{FileRecord, RecordContent};
use crate::scanner::SkippedEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct UnreadableFile {
    pub path: String,
    pub error: String,
}

/// Summary of one aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationReport {
    pub root: PathBuf,
    pub output: PathBuf,
    pub records_written: usize,
    pub bytes_written: u64,
    pub files_by_extension: BTreeMap<String, usize>,
    pub unreadable_files: Vec<UnreadableFile>,
    pub skipped_entries: Vec<SkippedEntry>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl AggregationReport {
    pub fn new(root: PathBuf, output: PathBuf) -> Self {
        Self {
            root,
            output,
            records_written: 0,
            bytes_written: 0,
            files_by_extension: BTreeMap::new(),
            unreadable_files: Vec::new(),
            skipped_entries: Vec::new(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn record_written(&mut self, record: &FileRecord, bytes: u64) {
        self.records_written += 1;
        self.bytes_written += bytes;
        *self
            .files_by_extension
            .entry(record.extension.clone())
            .or_insert(0) += 1;

        if let RecordContent::Unreadable(ref error) = record.content {
            self.unreadable_files.push(UnreadableFile {
                path: record.display_path(),
                error: error.clone(),
            });
        }
    }

    pub fn entry_skipped(&mut self, entry: SkippedEntry) {
        self.skipped_entries.push(entry);
    }

    pub fn finish(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// True when any file or directory could not be read.
    pub fn has_issues(&self) -> bool {
        !self.unreadable_files.is_empty() || !self.skipped_entries.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.unreadable_files.len() + self.skipped_entries.len()
    }
}
