//! Error types for shuddho.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShuddhoError {
    // Artifact errors (fatal at startup)
    #[error("Failed to load artifact {path}: {message}")]
    ArtifactLoad { path: String, message: String },

    // Caller errors
    #[error("Invalid correction mode '{value}' (expected 'conservative' or 'aggressive')")]
    InvalidMode { value: String },

    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl ShuddhoError {
    /// Build an `ArtifactLoad` error for a file path.
    pub fn artifact(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Build an `ArtifactLoad` error pointing at a line of a tabular file.
    pub fn artifact_line(path: &std::path::Path, line: usize, message: impl AsRef<str>) -> Self {
        Self::artifact(path, format!("line {}: {}", line, message.as_ref()))
    }
}

pub type Result<T> = std::result::Result<T, ShuddhoError>;
