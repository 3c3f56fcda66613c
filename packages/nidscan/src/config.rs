//! Runtime options for the verifier.
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound on a single recognition, acquisition included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration that controls how scans are run.
#[derive(Debug, Clone)]
pub struct VerifierOptions {
    pub timeout: Duration,
    pub tesseract_binary: PathBuf,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            tesseract_binary: PathBuf::from("tesseract"),
        }
    }
}

impl VerifierOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tesseract_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.tesseract_binary = binary.into();
        self
    }
}
