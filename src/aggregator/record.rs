use crate::scanner::SourceFile;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

pub const READ_ERROR_PREFIX: &str = "Error reading file: ";

/// Body of a record: the file's text, or why it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    Text(String),
    Unreadable(String),
}

impl RecordContent {
    /// Decoding errors keep the byte offset of the first invalid sequence.
    pub fn read_from(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => RecordContent::Text(text),
                Err(e) => RecordContent::Unreadable(e.utf8_error().to_string()),
            },
            Err(e) => RecordContent::Unreadable(e.to_string()),
        }
    }

    /// The text that goes into the output file.
    pub fn rendered(&self) -> Cow<'_, str> {
        match self {
            RecordContent::Text(text) => Cow::Borrowed(text),
            RecordContent::Unreadable(error) => {
                Cow::Owned(format!("{}{}", READ_ERROR_PREFIX, error))
            }
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, RecordContent::Unreadable(_))
    }
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub relative_path: PathBuf,
    pub extension: String,
    pub content: RecordContent,
}

impl FileRecord {
    pub fn new<P: Into<PathBuf>>(relative_path: P, content: RecordContent) -> Self {
        let relative_path = relative_path.into();
        let extension = crate::scanner::FileFilter::extension_of(&relative_path).unwrap_or_default();

        Self {
            relative_path,
            extension,
            content,
        }
    }

    pub fn load(source: &SourceFile) -> Self {
        Self {
            relative_path: source.relative_path.clone(),
            extension: source.extension.clone(),
            content: RecordContent::read_from(&source.source_path),
        }
    }

    pub fn delimiter(&self) -> String {
        format!("===== {} =====", self.relative_path.display())
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delimiter_format() {
        let record = FileRecord::new("a.ts", RecordContent::Text("const x=1;".to_string()));
        assert_eq!(record.delimiter(), "===== a.ts =====");
        assert_eq!(record.extension, "ts");
    }

    #[test]
    fn test_unreadable_rendering() {
        let content = RecordContent::Unreadable("permission denied".to_string());
        assert!(content.is_unreadable());
        assert_eq!(content.rendered(), "Error reading file: permission denied");
    }

    #[test]
    fn test_load_text_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("c.css");
        fs::write(&path, "body{}").unwrap();

        let source = SourceFile::new(path, PathBuf::from("c.css"));
        let record = FileRecord::load(&source);

        assert_eq!(record.content, RecordContent::Text("body{}".to_string()));
        assert_eq!(record.content.rendered(), "body{}");
    }

    #[test]
    fn test_load_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.js");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe, 0x6f]).unwrap();

        let source = SourceFile::new(path, PathBuf::from("broken.js"));
        let record = FileRecord::load(&source);

        assert!(record.content.is_unreadable());
        assert!(record.content.rendered().starts_with(READ_ERROR_PREFIX));
        assert_eq!(
            record.content.rendered(),
            "Error reading file: invalid utf-8 sequence of 1 bytes from index 2"
        );
    }

    #[test]
    fn test_load_vanished_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.ts");

        let source = SourceFile::new(path, PathBuf::from("gone.ts"));
        let record = FileRecord::load(&source);

        assert!(record.content.is_unreadable());
    }
}
