pub mod file_filter;
pub mod source_scanner;

pub use file_filter::{FileFilter, ALLOWED_EXTENSIONS};
pub use source_scanner::{ScanEvent, SkippedEntry, SourceFile, SourceScanner};
