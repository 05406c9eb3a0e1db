use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Root directory not found: {path}")]
    RootNotFound { path: String },

    #[error("Root path is not a directory: {path}")]
    RootNotDirectory { path: String },

    #[error("Cannot read root directory {path}: {source}")]
    RootUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open output file {path}: {source}")]
    OutputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for AggregateError {
    fn user_message(&self) -> String {
        match self {
            AggregateError::RootNotFound { path } => {
                format!("Directory does not exist: {}", path)
            }
            AggregateError::RootNotDirectory { path } => {
                format!("Not a directory: {}", path)
            }
            AggregateError::RootUnreadable { path, source } => {
                format!("Cannot list directory {}: {}", path, source)
            }
            AggregateError::OutputFile { path, source } => {
                format!("Cannot open output file {} for writing: {}", path, source)
            }
            AggregateError::OutputWrite { path, source } => {
                format!("Writing to {} failed: {}", path, source)
            }
            AggregateError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            AggregateError::RootNotFound { .. } => Some(
                "Check the spelling of the directory path. Relative paths are resolved against the current working directory.".to_string()
            ),
            AggregateError::RootNotDirectory { .. } => Some(
                "Pass the directory that contains the source files, not a single file.".to_string()
            ),
            AggregateError::RootUnreadable { .. } => Some(
                "Ensure you have read and execute permission on the directory.".to_string()
            ),
            AggregateError::OutputFile { .. } | AggregateError::OutputWrite { .. } => Some(
                "Ensure the parent directory exists and is writable, or choose another output path.".to_string()
            ),
            AggregateError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
