// CLI error types

use tabsight_config::ConfigError;
use tabsight_core::IngestError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not load dataset: {0}")]
    Ingest(#[from] IngestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Ingest(IngestError::UnsupportedFormat(ext)) => {
                format!(
                    "Unsupported file format '{}'.\n\nSave the data as .csv or .tsv and try again.",
                    ext
                )
            }
            CliError::Ingest(e) => {
                format!("Could not load dataset: {}", e)
            }
            CliError::Config(e) => {
                format!(
                    "{}\n\nCheck the file passed with --config \
                     or the TABSIGHT_* environment variables.",
                    e
                )
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'tabsight --help' for usage information.",
                    message
                )
            }
            CliError::Json(e) => {
                format!("JSON error: {}", e)
            }
            CliError::Logging(msg) => {
                format!("Could not initialize logging: {}", msg)
            }
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
