use std::fmt;
use std::str::FromStr;

use crate::engine::OcrError;

/// Ordered set of engine language codes, rendered the way tesseract expects
/// them (`eng+ben`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageSet {
    codes: Vec<String>,
}

impl LanguageSet {
    pub fn new<I, S>(codes: I) -> Result<Self, OcrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                return Err(OcrError::InvalidInput("blank language code".into()));
            }
            if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(OcrError::InvalidInput(format!(
                    "malformed language code: {code}"
                )));
            }
            if !out.iter().any(|c| c == code) {
                out.push(code.to_string());
            }
        }
        if out.is_empty() {
            return Err(OcrError::InvalidInput("empty language set".into()));
        }
        Ok(Self { codes: out })
    }

    /// Latin script plus Bengali, the configuration national ID cards are
    /// scanned with.
    pub fn latin_bengali() -> Self {
        Self {
            codes: vec!["eng".to_string(), "ben".to_string()],
        }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.codes.join("+"))
    }
}

impl FromStr for LanguageSet {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split('+'))
    }
}
