use crate::config::ScanConfig;
use crate::error::{AggregateError, Result};
use crate::scanner::file_filter::FileFilter;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub extension: String,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf) -> Self {
        let extension = FileFilter::extension_of(&source_path).unwrap_or_default();

        Self {
            source_path,
            relative_path,
            extension,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

/// A traversal entry below the root that could not be visited.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub enum ScanEvent {
    File(SourceFile),
    Skipped(SkippedEntry),
}

pub struct SourceScanner {
    filter: FileFilter,
    follow_links: bool,
    sort_entries: bool,
    excluded_path: Option<PathBuf>,
}

impl SourceScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(),
            follow_links: config.follow_links,
            sort_entries: config.sort_entries,
            excluded_path: None,
        }
    }

    /// Never yield the file at `path` (compared after canonicalization).
    pub fn with_excluded_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.excluded_path = Some(path.into());
        self
    }

    /// Fails when the root is missing, is not a directory, or cannot be listed.
    pub fn validate_root(root: &Path) -> Result<()> {
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AggregateError::RootNotFound {
                path: root.display().to_string(),
            },
            _ => AggregateError::RootUnreadable {
                path: root.display().to_string(),
                source: e,
            },
        })?;

        if !metadata.is_dir() {
            return Err(AggregateError::RootNotDirectory {
                path: root.display().to_string(),
            });
        }

        fs::read_dir(root).map_err(|e| AggregateError::RootUnreadable {
            path: root.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Lazily walks `root`, yielding matching files in traversal order.
    pub fn scan<'a>(&'a self, root: &'a Path) -> Result<impl Iterator<Item = ScanEvent> + 'a> {
        Self::validate_root(root)?;

        let mut walker = WalkDir::new(root).follow_links(self.follow_links);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        Ok(walker
            .into_iter()
            .filter_map(move |entry| self.classify(entry, root)))
    }

    /// Eagerly collects the scan, for previews.
    pub fn collect_files(&self, root: &Path) -> Result<(Vec<SourceFile>, Vec<SkippedEntry>)> {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for event in self.scan(root)? {
            match event {
                ScanEvent::File(file) => files.push(file),
                ScanEvent::Skipped(entry) => skipped.push(entry),
            }
        }

        Ok((files, skipped))
    }

    fn classify(&self, entry: walkdir::Result<DirEntry>, root: &Path) -> Option<ScanEvent> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| relative_display(p, root))
                    .unwrap_or_else(|| root.display().to_string());
                return Some(ScanEvent::Skipped(SkippedEntry {
                    path,
                    reason: err.to_string(),
                }));
            }
        };

        if entry.file_type().is_dir() {
            return None;
        }

        // Unfollowed symlink pointing at a directory
        if entry.path_is_symlink() && entry.path().is_dir() {
            return None;
        }

        let path = entry.path();
        if !self.filter.is_source_file(path) || self.is_excluded(path) {
            return None;
        }

        match path.strip_prefix(root) {
            Ok(relative) => Some(ScanEvent::File(SourceFile::new(
                path.to_path_buf(),
                relative.to_path_buf(),
            ))),
            Err(_) => Some(ScanEvent::Skipped(SkippedEntry {
                path: path.display().to_string(),
                reason: format!("not located under {}", root.display()),
            })),
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(excluded) = self.excluded_path.as_deref() else {
            return false;
        };

        if path.file_name() != excluded.file_name() {
            return false;
        }

        fs::canonicalize(path)
            .map(|canonical| canonical == excluded)
            .unwrap_or(false)
    }
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
