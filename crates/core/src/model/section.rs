use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Read state of a single report section.
///
/// The serialized tags are the ones stored by earlier versions of the product
/// and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionState {
    /// Not yet reachable by the user.
    #[serde(rename = "locked")]
    Locked,
    /// Reachable, not yet opened.
    #[serde(rename = "nouveau")]
    Unread,
    /// Opened at least once.
    #[serde(rename = "lu")]
    Read,
}

impl SectionState {
    /// Persisted tag for this state.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            SectionState::Locked => "locked",
            SectionState::Unread => "nouveau",
            SectionState::Read => "lu",
        }
    }

    #[must_use]
    pub fn is_accessible(self) -> bool {
        !matches!(self, SectionState::Locked)
    }
}

impl fmt::Display for SectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSectionStateError(String);

impl fmt::Display for ParseSectionStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid section state: {}", self.0)
    }
}

impl std::error::Error for ParseSectionStateError {}

impl FromStr for SectionState {
    type Err = ParseSectionStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "locked" => Ok(SectionState::Locked),
            "nouveau" => Ok(SectionState::Unread),
            "lu" => Ok(SectionState::Read),
            other => Err(ParseSectionStateError(other.to_string())),
        }
    }
}
