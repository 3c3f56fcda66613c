use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::language::LanguageSet;
use crate::region::TextRegion;

#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

impl OcrInput {
    pub fn is_empty(&self) -> bool {
        match self {
            OcrInput::FilePath(path) => path.as_os_str().is_empty(),
            OcrInput::Bytes(data) => data.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OcrOutput {
    pub text: String,
    pub regions: Vec<TextRegion>,
}

impl OcrOutput {
    /// Builds an output whose text is the region texts joined line by line.
    pub fn from_regions(regions: Vec<TextRegion>) -> Self {
        let text = regions
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        OcrOutput { text, regions }
    }

    /// Builds an output from plain engine text, one region per non-empty line.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let regions = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(TextRegion::plain)
            .collect();
        OcrOutput { text, regions }
    }
}

#[derive(Debug, Clone, Error)]
pub enum OcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("engine error: {0}")]
    EngineError(String),
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    #[error("recognition timed out after {0:?}")]
    Timeout(Duration),
    #[error("recognition cancelled")]
    Cancelled,
}

/// A single recognizer worker. Owned by exactly one scan and released with
/// [`TextRecognizer::terminate`] once that scan is over.
#[async_trait]
pub trait TextRecognizer: Send {
    async fn recognize(&mut self, input: &OcrInput) -> Result<OcrOutput, OcrError>;

    /// Releases the worker. Must succeed even after a failed or interrupted
    /// `recognize`.
    async fn terminate(self: Box<Self>);
}

/// Hands out fresh recognizer workers configured for a language set.
#[async_trait]
pub trait RecognizerFactory: Send + Sync {
    async fn acquire(&self, languages: &LanguageSet) -> Result<Box<dyn TextRecognizer>, OcrError>;
}
