use crate::error::{AggregateError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "aggregated_code.txt";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub follow_links: bool,
    pub sort_entries: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_path: PathBuf,
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            sort_entries: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            show_progress: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AggregateError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| AggregateError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| AggregateError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["codeagg.toml", ".codeagg.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(follow_links) = cli_args.follow_links {
            self.scan.follow_links = follow_links;
        }

        if let Some(sort_entries) = cli_args.sort_entries {
            self.scan.sort_entries = sort_entries;
        }

        if let Some(show_progress) = cli_args.show_progress {
            self.output.show_progress = show_progress;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| AggregateError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| AggregateError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.default_path.as_os_str().is_empty() {
            return Err(AggregateError::Config {
                message: "output.default_path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub follow_links: Option<bool>,
    pub sort_entries: Option<bool>,
    pub show_progress: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_follow_links(mut self, follow_links: Option<bool>) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_sort_entries(mut self, sort_entries: Option<bool>) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    pub fn with_show_progress(mut self, show_progress: Option<bool>) -> Self {
        self.show_progress = show_progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.scan.follow_links);
        assert!(config.scan.sort_entries);
        assert_eq!(config.output.default_path, PathBuf::from("aggregated_code.txt"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.output.default_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.scan.follow_links = true;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(loaded_config.scan.follow_links);
        assert_eq!(config.output.default_path, loaded_config.output.default_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[scan]\nsort_entries = false").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(!config.scan.sort_entries);
        assert!(!config.scan.follow_links);
        assert!(config.output.show_progress);
        assert_eq!(config.output.default_path, PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_invalid_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[scan\nfollow_links = ").unwrap();

        let result = Config::load_from_file(temp_file.path());
        assert!(matches!(result, Err(AggregateError::Config { .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here/codeagg.toml");
        assert!(matches!(result, Err(AggregateError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_follow_links(Some(true))
            .with_sort_entries(Some(false));

        config.merge_with_cli_args(&overrides);

        assert!(config.scan.follow_links);
        assert!(!config.scan.sort_entries);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[output]"));
        assert!(!sample.contains("extensions"));
    }
}
