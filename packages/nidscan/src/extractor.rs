//! Pulls the holder's name and national ID number out of raw recognised text.
use crate::model::{ExtractionResult, ADDRESS_PLACEHOLDER, ID_NOT_FOUND, NAME_NOT_FOUND};
use regex::Regex;
use std::sync::OnceLock;

/// Confidence assigned when an ID number was found.
pub const CONFIDENCE_WITH_ID: f64 = 0.85;

/// Confidence assigned when no ID number was found.
pub const CONFIDENCE_WITHOUT_ID: f64 = 0.4;

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
static NID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
  NAME_PATTERN.get_or_init(|| {
    // Label in English or Bengali, any case. The value is the Latin name on
    // the same line, or on the next one when the label ends its line.
    Regex::new(r"(?i:name|নাম)[ \t]*:?[ \t]*(?:\r?\n[ \t]*)?([A-Za-z][A-Za-z ]*)")
      .expect("name pattern compiles")
  })
}

fn nid_pattern() -> &'static Regex {
  NID_PATTERN.get_or_init(|| Regex::new(r"[0-9]{10,17}").expect("nid pattern compiles"))
}

/// Returns the first name following a `Name`/`নাম` label, if any.
pub fn find_name(text: &str) -> Option<String> {
  name_pattern()
    .captures_iter(text)
    .filter_map(|caps| caps.get(1))
    .map(|m| m.as_str().trim())
    .find(|name| !name.is_empty())
    .map(str::to_string)
}

/// Returns the leftmost run of 10 to 17 ASCII digits, if any.
pub fn find_nid(text: &str) -> Option<String> {
  nid_pattern().find(text).map(|m| m.as_str().to_string())
}

/// Scores raw recognised text. Never fails: a missing field is reported with
/// its sentinel value and a reduced confidence.
pub fn extract(raw_text: &str) -> ExtractionResult {
  let name = find_name(raw_text);
  let nid = find_nid(raw_text);
  let is_authentic = nid.is_some();

  ExtractionResult {
    extracted_name: name.unwrap_or_else(|| NAME_NOT_FOUND.to_string()),
    extracted_id: nid.unwrap_or_else(|| ID_NOT_FOUND.to_string()),
    extracted_address: ADDRESS_PLACEHOLDER.to_string(),
    match_confidence: if is_authentic {
      CONFIDENCE_WITH_ID
    } else {
      CONFIDENCE_WITHOUT_ID
    },
    is_authentic,
  }
}
