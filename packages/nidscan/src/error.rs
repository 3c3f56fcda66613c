//! Error types surfaced by the verification core.
use nidscan_ocr::OcrError;
use std::path::PathBuf;
use thiserror::Error;

/// The only hard failure of a scan: the recognizer produced no text.
///
/// Missing fields are not errors; they come back as sentinel values with a
/// reduced confidence.
#[derive(Debug, Clone, Error)]
pub enum VerifyError {
    #[error("text recognition failed: {0}")]
    Recognition(#[from] OcrError),
}

impl VerifyError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, VerifyError::Recognition(OcrError::Timeout(_)))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, VerifyError::Recognition(OcrError::Cancelled))
    }
}

/// Raised when an uploaded image cannot be turned into recognizer input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("image payload is empty")]
    Empty,
    #[error("image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported data url: {0}")]
    DataUrl(String),
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("audit log {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
