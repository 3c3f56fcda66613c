//! Drives one ID card scan from image to scored extraction.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use nidscan_ocr::{LanguageSet, OcrError, OcrInput, RecognizerFactory, TesseractFactory};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::VerifierOptions;
use crate::error::VerifyError;
use crate::extractor::extract;
use crate::model::ExtractionResult;

/// Runs `fut` until it finishes, the deadline passes or `cancel` fires.
async fn bounded<T, F>(
    fut: F,
    deadline: Instant,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<T, OcrError>
where
    F: Future<Output = Result<T, OcrError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(OcrError::Cancelled),
        res = tokio::time::timeout_at(deadline, fut) => {
            res.unwrap_or_else(|_| Err(OcrError::Timeout(timeout)))
        }
    }
}

/// Stateless scan orchestrator. Every call acquires its own recognizer worker
/// and terminates it before returning, so one `Verifier` can serve any number
/// of concurrent sessions.
#[derive(Clone)]
pub struct Verifier {
    factory: Arc<dyn RecognizerFactory>,
    options: VerifierOptions,
}

impl Verifier {
    pub fn new(factory: Arc<dyn RecognizerFactory>, options: VerifierOptions) -> Self {
        Self { factory, options }
    }

    /// A verifier backed by the tesseract executable named in `options`.
    pub fn tesseract(options: VerifierOptions) -> Self {
        let factory = TesseractFactory::with_binary(options.tesseract_binary.clone());
        Self::new(Arc::new(factory), options)
    }

    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }

    pub async fn verify(&self, image: &OcrInput) -> Result<ExtractionResult, VerifyError> {
        self.verify_with_cancel(image, CancellationToken::new()).await
    }

    /// Like [`Verifier::verify`], abandoning the scan as soon as `cancel` fires.
    /// The recognizer is terminated on every path, including timeout and
    /// cancellation.
    pub async fn verify_with_cancel(
        &self,
        image: &OcrInput,
        cancel: CancellationToken,
    ) -> Result<ExtractionResult, VerifyError> {
        let languages = LanguageSet::latin_bengali();
        let timeout = self.options.timeout;
        let started = Instant::now();
        let deadline = started + timeout;

        tracing::info!(languages = %languages, timeout_secs = timeout.as_secs_f64(), "nid scan started");

        let mut recognizer = bounded(self.factory.acquire(&languages), deadline, timeout, &cancel)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "could not acquire recognizer"))?;
        tracing::debug!("recognizer acquired");

        let recognized = bounded(recognizer.recognize(image), deadline, timeout, &cancel).await;
        recognizer.terminate().await;
        tracing::debug!("recognizer released");

        let output = recognized.inspect_err(|e| {
            tracing::warn!(
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "nid scan failed"
            )
        })?;

        let result = extract(&output.text);
        tracing::info!(
            regions = output.regions.len(),
            confidence = result.match_confidence,
            authentic = result.is_authentic,
            name_found = result.has_name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "nid scan finished"
        );
        Ok(result)
    }
}
