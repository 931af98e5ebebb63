//! Error types for the vocabulary worksheet service

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the worksheet service
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the worksheet service
#[derive(Error, Debug)]
pub enum Error {
    /// No Korean-capable font exists at any searched location
    #[error("Korean font not found (searched: {})", display_paths(.searched))]
    FontNotFound { searched: Vec<PathBuf> },

    /// The resolved font file could not be parsed
    #[error("Invalid font file {path}: {reason}")]
    InvalidFont { path: String, reason: String },

    /// printpdf failed to build or serialize the document
    #[error("PDF generation failed: {reason}")]
    Pdf { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking render task panicked or was cancelled
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::FontNotFound { .. } => {
                "Korean font not found; place NanumGothic.ttf next to the server".to_string()
            }
            Error::InvalidFont { .. } => "Korean font could not be loaded".to_string(),
            Error::Pdf { .. } => "PDF generation failed".to_string(),
            Error::Io(_) => "I/O error".to_string(),
            Error::Worker(_) => "Internal error".to_string(),
        }
    }
}
