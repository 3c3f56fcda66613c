//! Records passed between the scanner, the onboarding session and the audit log.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value written to `extracted_name` when no name label was recognised.
pub const NAME_NOT_FOUND: &str = "NAME NOT FOUND";

/// Value written to `extracted_id` when no ID number was recognised.
pub const ID_NOT_FOUND: &str = "ID NOT FOUND";

/// Address is never parsed from the card; every result carries this marker.
pub const ADDRESS_PLACEHOLDER: &str = "Extracted locally";

/// Confidence above which a scan counts as verified. Strictly greater than.
pub const VERIFICATION_THRESHOLD: f64 = 0.6;

/// Fields pulled out of one recognised ID card image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub extracted_name: String,
    pub extracted_id: String,
    pub extracted_address: String,
    pub match_confidence: f64,
    pub is_authentic: bool,
}

impl ExtractionResult {
    pub fn has_name(&self) -> bool {
        !is_not_found(&self.extracted_name, NAME_NOT_FOUND)
    }

    pub fn has_id(&self) -> bool {
        !is_not_found(&self.extracted_id, ID_NOT_FOUND)
    }

    pub fn outcome(&self) -> VerificationOutcome {
        VerificationOutcome::classify(self.match_confidence)
    }
}

fn is_not_found(value: &str, sentinel: &str) -> bool {
    value.is_empty() || value == sentinel
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationOutcome {
    Verified,
    Rejected,
}

impl VerificationOutcome {
    pub fn classify(confidence: f64) -> Self {
        if confidence > VERIFICATION_THRESHOLD {
            VerificationOutcome::Verified
        } else {
            VerificationOutcome::Rejected
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NidStatus {
    #[default]
    NotStarted,
    Scanning,
    Verified,
    Rejected,
}

impl NidStatus {
    /// Whether the scan lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: NidStatus) -> bool {
        match next {
            NidStatus::Scanning => true,
            NidStatus::Verified | NidStatus::Rejected => self == NidStatus::Scanning,
            NidStatus::NotStarted => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NidStatus::NotStarted => "NOT_STARTED",
            NidStatus::Scanning => "SCANNING",
            NidStatus::Verified => "VERIFIED",
            NidStatus::Rejected => "REJECTED",
        }
    }
}

impl From<VerificationOutcome> for NidStatus {
    fn from(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Verified => NidStatus::Verified,
            VerificationOutcome::Rejected => NidStatus::Rejected,
        }
    }
}

impl std::fmt::Display for NidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress onboarding form for one ambassador.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDraft {
    pub full_name: String,
    pub nid_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub nid_status: NidStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nid_data: Option<ExtractionResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingStatus {
    Pending,
    #[serde(rename = "In Review")]
    InReview,
    Signed,
    Completed,
}

/// A finished onboarding, as written to the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub nid_number: String,
    pub onboarding_status: OnboardingStatus,
    pub nid_status: NidStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nid_data: Option<ExtractionResult>,
    pub signed_at: DateTime<Utc>,
    pub signature_fingerprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(VerificationOutcome::classify(0.6), VerificationOutcome::Rejected);
        assert_eq!(VerificationOutcome::classify(0.6000001), VerificationOutcome::Verified);
        assert_eq!(VerificationOutcome::classify(0.85), VerificationOutcome::Verified);
        assert_eq!(VerificationOutcome::classify(0.4), VerificationOutcome::Rejected);
    }

    #[test]
    fn test_status_transitions() {
        use NidStatus::*;
        assert!(NotStarted.can_transition_to(Scanning));
        assert!(Scanning.can_transition_to(Verified));
        assert!(Scanning.can_transition_to(Rejected));
        assert!(Verified.can_transition_to(Scanning));
        assert!(Rejected.can_transition_to(Scanning));
        assert!(!NotStarted.can_transition_to(Verified));
        assert!(!Verified.can_transition_to(Rejected));
        assert!(!Scanning.can_transition_to(NotStarted));
    }

    #[test]
    fn test_serialized_field_names() {
        let result = ExtractionResult {
            extracted_name: "JOHN SMITH".into(),
            extracted_id: "1234567890".into(),
            extracted_address: ADDRESS_PLACEHOLDER.into(),
            match_confidence: 0.85,
            is_authentic: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["extractedName"], "JOHN SMITH");
        assert_eq!(json["matchConfidence"], 0.85);
        assert_eq!(json["isAuthentic"], true);

        let draft = OnboardingDraft {
            nid_status: NidStatus::NotStarted,
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["nidStatus"], "NOT_STARTED");
        assert!(json.get("nidData").is_none());
    }

    #[test]
    fn test_sentinels_and_empty_count_as_missing() {
        let mut result = ExtractionResult {
            extracted_name: NAME_NOT_FOUND.into(),
            extracted_id: String::new(),
            extracted_address: ADDRESS_PLACEHOLDER.into(),
            match_confidence: 0.4,
            is_authentic: false,
        };
        assert!(!result.has_name());
        assert!(!result.has_id());
        result.extracted_id = ID_NOT_FOUND.into();
        assert!(!result.has_id());
        result.extracted_id = "12345678901".into();
        assert!(result.has_id());
    }
}
