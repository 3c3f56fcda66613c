//! Merges a scan result into the onboarding draft.
use crate::model::{ExtractionResult, OnboardingDraft, VerificationOutcome};

/// Produces the next draft from `draft` and a scan `result`.
///
/// Only a verified result (confidence strictly above the threshold) touches the
/// draft, and then only the name and ID number, each only when the scan found
/// a value for it. Everything else passes through.
pub fn reconcile(draft: &OnboardingDraft, result: &ExtractionResult) -> OnboardingDraft {
  if result.outcome() != VerificationOutcome::Verified {
    return draft.clone();
  }

  let mut next = draft.clone();
  if result.has_name() {
    next.full_name = result.extracted_name.clone();
  }
  if result.has_id() {
    next.nid_number = result.extracted_id.clone();
  }
  next
}
