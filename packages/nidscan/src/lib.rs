//! # nidscan
//!
//! Identity-document verification for ambassador onboarding: turns a photographed
//! national ID card into a confidence-scored extraction and merges it into the
//! onboarding draft.
//!
//! ## Pipeline
//!
//! - **Recognition**: an injected [`RecognizerFactory`] hands out one recognizer
//!   worker per scan (tesseract by default, configured for English + Bengali)
//! - **Extraction**: [`extract`] finds the holder's name and NID number and scores the result
//! - **Classification**: confidence strictly above 0.6 is `VERIFIED`, anything else `REJECTED`
//! - **Reconciliation**: [`reconcile`] copies found values into the draft, only for verified scans
//! - **Audit**: finalized records are kept newest-first in a JSON [`AuditLog`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use nidscan::prelude::*;
//!
//! let verifier = Verifier::tesseract(VerifierOptions::default());
//! let mut session = ScanSession::new();
//! session.set_full_name("typed by the ambassador");
//!
//! let image = image_from_bytes(std::fs::read("nid.jpg")?)?;
//! match session.scan(&verifier, &image).await {
//!     Ok(NidStatus::Verified) => println!("{}", session.draft().nid_number),
//!     Ok(status) => println!("scan {status}"),
//!     Err(e) => eprintln!("recognizer failed: {e}"),
//! }
//! ```

pub mod audit_log;
pub mod config;
pub mod error;
pub mod extractor;
pub mod input;
pub mod model;
pub mod reconcile;
pub mod session;
pub mod verifier;

// Re-export commonly used types at the root level
pub use audit_log::{AuditLog, AuditStats};
pub use config::VerifierOptions;
pub use error::{AuditError, InputError, VerifyError};
pub use extractor::extract;
pub use input::{decode_base64_image, image_from_bytes};
pub use model::{
  ExtractionResult, NidStatus, OnboardingDraft, OnboardingRecord, OnboardingStatus, VerificationOutcome,
};
pub use nidscan_ocr::{LanguageSet, OcrError, OcrInput, OcrOutput, RecognizerFactory, TextRecognizer};
pub use reconcile::reconcile;
pub use session::{fingerprint, ScanSession};
pub use verifier::Verifier;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use nidscan::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    decode_base64_image, extract, fingerprint, image_from_bytes, reconcile, AuditError, AuditLog, AuditStats,
    ExtractionResult, InputError, LanguageSet, NidStatus, OcrError, OcrInput, OcrOutput, OnboardingDraft,
    OnboardingRecord, OnboardingStatus, RecognizerFactory, ScanSession, TextRecognizer, VerificationOutcome,
    Verifier, VerifierOptions, VerifyError,
  };
}
