use std::path::Path;

/// Extensions eligible for aggregation, lowercase and without the leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "css", "html"];

pub struct FileFilter {
    source_extensions: &'static [&'static str],
}

impl FileFilter {
    pub fn new() -> Self {
        Self {
            source_extensions: ALLOWED_EXTENSIONS,
        }
    }

    /// Lowercased text after the last `.` of the file name.
    ///
    /// Leading dots belong to the name, so `.ts` and `..ts` have no extension.
    pub fn extension_of(path: &Path) -> Option<String> {
        let name = path.file_name()?.to_string_lossy();
        let (_, ext) = name.trim_start_matches('.').rsplit_once('.')?;

        if ext.is_empty() {
            None
        } else {
            Some(ext.to_lowercase())
        }
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        match Self::extension_of(path) {
            Some(ext) => self.source_extensions.contains(&ext.as_str()),
            None => false,
        }
    }

    pub fn get_extensions(&self) -> &[&'static str] {
        self.source_extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_detection() {
        let filter = FileFilter::new();

        assert!(filter.is_source_file(Path::new("index.ts")));
        assert!(filter.is_source_file(Path::new("App.tsx")));
        assert!(filter.is_source_file(Path::new("main.js")));
        assert!(filter.is_source_file(Path::new("Button.jsx")));
        assert!(filter.is_source_file(Path::new("site.css")));
        assert!(filter.is_source_file(Path::new("index.html")));
        assert!(filter.is_source_file(Path::new("src/components/Cell.tsx")));

        assert!(!filter.is_source_file(Path::new("logo.png")));
        assert!(!filter.is_source_file(Path::new("package.json")));
        assert!(!filter.is_source_file(Path::new("README.md")));
        assert!(!filter.is_source_file(Path::new("utils.py")));
        assert!(!filter.is_source_file(Path::new("page.htm")));
    }

    #[test]
    fn test_case_insensitive_extensions() {
        let filter = FileFilter::new();

        assert!(filter.is_source_file(Path::new("INDEX.TS")));
        assert!(filter.is_source_file(Path::new("Page.Html")));
        assert!(filter.is_source_file(Path::new("style.CSS")));
    }

    #[test]
    fn test_only_last_extension_counts() {
        let filter = FileFilter::new();

        assert!(filter.is_source_file(Path::new("game.d.ts")));
        assert!(filter.is_source_file(Path::new("bundle.min.js")));
        assert!(!filter.is_source_file(Path::new("app.js.map")));
        assert!(!filter.is_source_file(Path::new("styles.css.bak")));
    }

    #[test]
    fn test_extensionless_names() {
        let filter = FileFilter::new();

        assert!(!filter.is_source_file(Path::new("Makefile")));
        assert!(!filter.is_source_file(Path::new(".ts")));
        assert!(!filter.is_source_file(Path::new("..ts")));
        assert!(!filter.is_source_file(Path::new("...css")));
        assert!(filter.is_source_file(Path::new(".eslintrc.js")));
        assert!(filter.is_source_file(Path::new("..hidden.ts")));
        assert!(!filter.is_source_file(Path::new("trailing.")));
        assert_eq!(FileFilter::extension_of(Path::new(".js")), None);
        assert_eq!(FileFilter::extension_of(Path::new("..js")), None);
        assert_eq!(FileFilter::extension_of(Path::new("a.TSX")), Some("tsx".to_string()));
    }

    #[test]
    fn test_extension_set_is_fixed() {
        let filter = FileFilter::default();
        assert_eq!(filter.get_extensions(), ALLOWED_EXTENSIONS);
        assert_eq!(filter.get_extensions().len(), 6);
    }
}
