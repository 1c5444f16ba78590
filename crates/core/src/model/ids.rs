use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a numbered report section (1-based).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(u32);

impl SectionId {
    /// Creates a new `SectionId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The section that follows this one, if representable.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

/// Identifier of one diagnostic, used to namespace persisted state.
///
/// Restricted to ASCII alphanumerics, `-` and `_` so it can be embedded in a
/// storage key without escaping.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiagnosticId(String);

impl DiagnosticId {
    /// Validates and wraps a diagnostic identifier.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is empty or has characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ParseIdError {
                kind: "DiagnosticId".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DiagnosticId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl TryFrom<String> for DiagnosticId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiagnosticId> for String {
    fn from(value: DiagnosticId) -> Self {
        value.0
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Debug for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for SectionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(SectionId::new)
            .map_err(|_| ParseIdError {
                kind: "SectionId".to_string(),
            })
    }
}

impl FromStr for DiagnosticId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_display() {
        let id = SectionId::new(4);
        assert_eq!(id.to_string(), "4");
    }

    #[test]
    fn test_section_id_from_str() {
        let id: SectionId = "7".parse().unwrap();
        assert_eq!(id, SectionId::new(7));
    }

    #[test]
    fn test_section_id_from_str_invalid() {
        assert!("seven".parse::<SectionId>().is_err());
        assert!("-1".parse::<SectionId>().is_err());
    }

    #[test]
    fn test_section_id_next_stops_at_max() {
        assert_eq!(SectionId::new(1).next(), Some(SectionId::new(2)));
        assert_eq!(SectionId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_diagnostic_id_accepts_slug() {
        let id = DiagnosticId::new(" acme-2024_q1 ").unwrap();
        assert_eq!(id.as_str(), "acme-2024_q1");
    }

    #[test]
    fn test_diagnostic_id_rejects_separators() {
        assert!(DiagnosticId::new("").is_err());
        assert!(DiagnosticId::new("a/b").is_err());
        assert!(DiagnosticId::new("with space").is_err());
    }
}
