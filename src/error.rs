use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AocsError {
    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Rule '{rule}' failed: {message}")]
    Rule { rule: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl AocsError {
    /// Short, stable name of the error variant.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Contract(_) => "Contract",
            Self::FileRead { .. } => "FileRead",
            Self::FileWrite { .. } => "FileWrite",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::Rule { .. } => "Rule",
            Self::Io(_) => "Io",
            Self::Json(_) => "Json",
            Self::Prompt(_) => "Prompt",
        }
    }

    /// Full error message including the underlying cause, if any.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::FileRead { path, source } | Self::FileWrite { path, source } => {
                format!("{}: {source}", path.display())
            }
            Self::InvalidPattern { pattern, source } => format!("{pattern}: {source}"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AocsError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
