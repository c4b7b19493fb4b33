//! Error types for the tagging pipeline
//!
//! Library code returns `PipelineResult`; the CLI layer wraps these in
//! `anyhow` with extra context.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while tagging and aggregating documents
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Tagging model data not found at {path}: {reason}")]
    ModelData { path: PathBuf, reason: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No CEFR level found in filename '{file}' (expected a token such as _B1_ or _B1Plus_)")]
    MissingLevelKey { file: String },

    #[error("Failed to tag sentence '{sentence}': {reason}")]
    Tagging { sentence: String, reason: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error belongs to a single document rather than the whole run
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            PipelineError::Io { .. }
                | PipelineError::MissingLevelKey { .. }
                | PipelineError::Tagging { .. }
        )
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_document_classification() {
        let missing = PipelineError::MissingLevelKey {
            file: "notes".into(),
        };
        assert!(missing.is_per_document());
        assert!(!PipelineError::Config("bad".into()).is_per_document());

        let io = PipelineError::io(
            "/tmp/x.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(io.is_per_document());
        assert!(io.to_string().contains("/tmp/x.txt"));
    }
}
