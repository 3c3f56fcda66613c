use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::engine::{OcrError, OcrInput, OcrOutput, RecognizerFactory, TextRecognizer};
use crate::language::LanguageSet;

use super::tsv;

const DEFAULT_BINARY: &str = "tesseract";

fn spawn_error(binary: &Path, e: std::io::Error) -> OcrError {
    if e.kind() == ErrorKind::NotFound {
        OcrError::Unavailable(format!("{} not found on PATH", binary.display()))
    } else {
        OcrError::EngineError(format!("failed to start {}: {}", binary.display(), e))
    }
}

/// Starts recognizer workers backed by the `tesseract` executable.
#[derive(Debug, Clone)]
pub struct TesseractFactory {
    binary: PathBuf,
}

impl TesseractFactory {
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_BINARY)
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Checks that the executable can be launched at all.
    async fn probe(&self) -> Result<(), OcrError> {
        let status = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| spawn_error(&self.binary, e))?;
        if !status.success() {
            return Err(OcrError::Unavailable(format!(
                "{} --version exited with {}",
                self.binary.display(),
                status
            )));
        }
        Ok(())
    }
}

impl Default for TesseractFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecognizerFactory for TesseractFactory {
    async fn acquire(&self, languages: &LanguageSet) -> Result<Box<dyn TextRecognizer>, OcrError> {
        self.probe().await?;
        tracing::debug!(binary = %self.binary.display(), languages = %languages, "tesseract worker ready");
        Ok(Box::new(TesseractRecognizer {
            binary: self.binary.clone(),
            languages: languages.clone(),
            child: None,
        }))
    }
}

/// One tesseract worker. Each `recognize` runs a child process that is held
/// here until it exits, so `terminate` can kill it if the scan was abandoned.
pub struct TesseractRecognizer {
    binary: PathBuf,
    languages: LanguageSet,
    child: Option<Child>,
}

impl TesseractRecognizer {
    fn command(&self, input: &OcrInput) -> Command {
        let mut cmd = Command::new(&self.binary);
        match input {
            OcrInput::FilePath(path) => {
                cmd.arg(path).stdin(Stdio::null());
            }
            OcrInput::Bytes(_) => {
                cmd.arg("stdin").stdin(Stdio::piped());
            }
        }
        cmd.arg("stdout")
            .arg("-l")
            .arg(self.languages.to_string())
            .arg("tsv")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&mut self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        if input.is_empty() {
            return Err(OcrError::InvalidInput("empty image".into()));
        }

        let child = self
            .command(input)
            .spawn()
            .map_err(|e| spawn_error(&self.binary, e))?;
        let child = self.child.insert(child);

        let stdin = child.stdin.take();
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| OcrError::EngineError("stdout not captured".into()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| OcrError::EngineError("stderr not captured".into()))?;

        let feed = async {
            if let (Some(mut stdin), OcrInput::Bytes(data)) = (stdin, input) {
                stdin.write_all(data).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let (fed, read_out, read_err) = tokio::join!(
            feed,
            stdout.read_to_end(&mut out),
            stderr.read_to_end(&mut err)
        );
        read_out.map_err(|e| OcrError::EngineError(format!("reading stdout: {e}")))?;
        read_err.map_err(|e| OcrError::EngineError(format!("reading stderr: {e}")))?;

        let status = child
            .wait()
            .await
            .map_err(|e| OcrError::EngineError(e.to_string()))?;
        self.child = None;

        if !status.success() {
            let msg = String::from_utf8_lossy(&err).trim().to_string();
            return Err(if msg.is_empty() {
                OcrError::EngineError(format!("tesseract exited with {status}"))
            } else {
                OcrError::EngineError(msg)
            });
        }
        // A broken pipe only matters if the engine also failed.
        if let Err(e) = fed {
            tracing::debug!(error = %e, "tesseract closed stdin early");
        }

        let regions = tsv::parse_tsv(&String::from_utf8_lossy(&out))?;
        Ok(OcrOutput::from_regions(regions))
    }

    async fn terminate(self: Box<Self>) {
        let mut this = *self;
        if let Some(mut child) = this.child.take() {
            if let Err(e) = child.kill().await {
                tracing::warn!(error = %e, "failed to kill tesseract process");
            }
        }
        tracing::debug!(languages = %this.languages, "tesseract worker terminated");
    }
}
