//! One ambassador's onboarding session: owns the draft and moves its
//! `nid_status` through the scan lifecycle.
use chrono::Utc;
use nidscan_ocr::OcrInput;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::VerifyError;
use crate::model::{
    ExtractionResult, NidStatus, OnboardingDraft, OnboardingRecord, OnboardingStatus,
};
use crate::reconcile::reconcile;
use crate::verifier::Verifier;

/// Decorative tracking fingerprint stamped on a signed contract, e.g.
/// `WAVE-BD-M2K8Z1QX-4F9A`. Not a cryptographic binding.
pub fn fingerprint() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let random = Uuid::new_v4().simple().to_string();
    format!("WAVE-BD-{}-{}", to_base36(millis), &random[..4]).to_uppercase()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    draft: OnboardingDraft,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: OnboardingDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    pub fn status(&self) -> NidStatus {
        self.draft.nid_status
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.draft.full_name = value.into();
    }

    pub fn set_nid_number(&mut self, value: impl Into<String>) {
        self.draft.nid_number = value.into();
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.draft.address = value.into();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.draft.phone = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
    }

    /// Marks a new upload. Allowed from any state, so a finished scan can be
    /// redone.
    pub fn begin_scan(&mut self) {
        tracing::debug!(from = %self.draft.nid_status, "scan begins");
        self.draft.nid_status = NidStatus::Scanning;
    }

    /// Applies the outcome of the scan started by [`ScanSession::begin_scan`].
    ///
    /// A result is stored whole in `nid_data`, classified, and merged into the
    /// identity fields when verified. A recognizer failure rejects the scan and
    /// leaves the draft's identity fields and previous `nid_data` untouched.
    /// Completions that arrive while no scan is in progress are ignored.
    pub fn complete_scan(&mut self, outcome: Result<ExtractionResult, VerifyError>) -> NidStatus {
        if !self.draft.nid_status.can_transition_to(NidStatus::Rejected) {
            tracing::warn!(status = %self.draft.nid_status, "ignoring scan result with no scan in progress");
            return self.draft.nid_status;
        }

        let next = match outcome {
            Ok(result) => {
                let status = NidStatus::from(result.outcome());
                let mut draft = reconcile(&self.draft, &result);
                draft.nid_data = Some(result);
                draft.nid_status = status;
                draft
            }
            Err(e) => {
                tracing::info!(error = %e, "scan rejected after recognizer failure");
                OnboardingDraft {
                    nid_status: NidStatus::Rejected,
                    ..self.draft.clone()
                }
            }
        };
        self.draft = next;
        self.draft.nid_status
    }

    /// Runs a full scan: `SCANNING`, verification, then `VERIFIED`/`REJECTED`.
    /// On recognizer failure the session is already `REJECTED` when the error
    /// is returned.
    pub async fn scan(
        &mut self,
        verifier: &Verifier,
        image: &OcrInput,
    ) -> Result<NidStatus, VerifyError> {
        self.scan_with_cancel(verifier, image, CancellationToken::new())
            .await
    }

    /// [`ScanSession::scan`] that can be abandoned through `cancel`; an
    /// abandoned scan ends `REJECTED` like any other recognizer failure.
    pub async fn scan_with_cancel(
        &mut self,
        verifier: &Verifier,
        image: &OcrInput,
        cancel: CancellationToken,
    ) -> Result<NidStatus, VerifyError> {
        self.begin_scan();
        match verifier.verify_with_cancel(image, cancel).await {
            Ok(result) => Ok(self.complete_scan(Ok(result))),
            Err(e) => {
                self.complete_scan(Err(e.clone()));
                Err(e)
            }
        }
    }

    /// Turns the draft into a completed record and starts a fresh draft.
    pub fn finalize(&mut self, signature_fingerprint: impl Into<String>) -> OnboardingRecord {
        let draft = std::mem::take(&mut self.draft);
        let record = OnboardingRecord {
            id: Uuid::new_v4(),
            full_name: draft.full_name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            nid_number: draft.nid_number,
            onboarding_status: OnboardingStatus::Completed,
            nid_status: draft.nid_status,
            nid_data: draft.nid_data,
            signed_at: Utc::now(),
            signature_fingerprint: signature_fingerprint.into(),
        };
        tracing::info!(id = %record.id, nid_status = %record.nid_status, "onboarding finalized");
        record
    }

    /// Drops the current draft without recording it.
    pub fn reset(&mut self) {
        self.draft = OnboardingDraft::default();
    }
}
