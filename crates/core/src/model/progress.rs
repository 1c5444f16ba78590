use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::model::ids::SectionId;
use crate::model::section::SectionState;

/// Number of report sections in the diagnostic.
pub const DEFAULT_SECTION_COUNT: u32 = 9;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("section count must be at least 1")]
    EmptySectionCount,

    #[error("section {0} is missing")]
    MissingSection(SectionId),

    #[error("unexpected section {0}")]
    UnexpectedSection(SectionId),

    #[error("section {section} is {found}, which breaks the read frontier")]
    FrontierViolation {
        section: SectionId,
        found: SectionState,
    },
}

//
// ─── MARK OUTCOME ──────────────────────────────────────────────────────────────
//

/// What `ProgressMap::mark_as_read` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    /// The section is now read; the next one may have been unlocked.
    Applied,
    /// The section is still locked and was left untouched.
    Locked,
    /// The id is outside `1..=section_count`.
    UnknownSection,
}

impl MarkReadOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, MarkReadOutcome::Applied)
    }
}

//
// ─── PROGRESS MAP ──────────────────────────────────────────────────────────────
//

/// Read state of every section `1..=N`.
///
/// Always fully populated, and always satisfies the frontier rule: a run of
/// `Read` sections, then at most one `Unread` section, then only `Locked`
/// sections. The only way to change it is through the methods below,
/// each of which keeps that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProgressMap {
    sections: BTreeMap<SectionId, SectionState>,
}

impl ProgressMap {
    /// Fresh map: section 1 unread, the rest locked.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::EmptySectionCount` if `section_count` is zero.
    pub fn new(section_count: u32) -> Result<Self, ProgressError> {
        if section_count == 0 {
            return Err(ProgressError::EmptySectionCount);
        }
        Ok(Self {
            sections: initial_sections(section_count),
        })
    }

    /// Rebuild a map from persisted entries, checking it against `section_count`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if a section in `1..=section_count` is missing,
    /// an entry falls outside that range, or the frontier rule is broken.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (SectionId, SectionState)>,
        section_count: u32,
    ) -> Result<Self, ProgressError> {
        if section_count == 0 {
            return Err(ProgressError::EmptySectionCount);
        }
        let sections: BTreeMap<SectionId, SectionState> = entries.into_iter().collect();

        if let Some(extra) = sections
            .keys()
            .find(|id| id.value() == 0 || id.value() > section_count)
        {
            return Err(ProgressError::UnexpectedSection(*extra));
        }
        if let Some(missing) = (1..=section_count)
            .map(SectionId::new)
            .find(|id| !sections.contains_key(id))
        {
            return Err(ProgressError::MissingSection(missing));
        }

        let map = Self { sections };
        map.check_frontier()?;
        Ok(map)
    }

    #[must_use]
    pub fn section_count(&self) -> u32 {
        // Keys are exactly 1..=N, so the last key is N.
        self.sections
            .keys()
            .next_back()
            .map_or(0, SectionId::value)
    }

    #[must_use]
    pub fn get(&self, section: SectionId) -> Option<SectionState> {
        self.sections.get(&section).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, SectionState)> + '_ {
        self.sections.iter().map(|(id, state)| (*id, *state))
    }

    /// Mark `section` as read and unlock the section after it.
    ///
    /// Locked and unknown sections are left alone.
    pub fn mark_as_read(&mut self, section: SectionId) -> MarkReadOutcome {
        match self.sections.get(&section) {
            None => return MarkReadOutcome::UnknownSection,
            Some(SectionState::Locked) => return MarkReadOutcome::Locked,
            Some(_) => {}
        }
        self.sections.insert(section, SectionState::Read);

        if let Some(next) = section.next() {
            if let Some(state) = self.sections.get_mut(&next) {
                if *state == SectionState::Locked {
                    *state = SectionState::Unread;
                }
            }
        }
        MarkReadOutcome::Applied
    }

    pub fn unlock_all(&mut self) {
        for state in self.sections.values_mut() {
            *state = SectionState::Read;
        }
    }

    pub fn reset(&mut self) {
        for (id, state) in &mut self.sections {
            *state = initial_state(*id);
        }
    }

    #[must_use]
    pub fn all_read(&self) -> bool {
        self.sections.values().all(|s| *s == SectionState::Read)
    }

    #[must_use]
    pub fn read_count(&self) -> usize {
        self.sections
            .values()
            .filter(|s| **s == SectionState::Read)
            .count()
    }

    /// First section that is not read yet, if any.
    #[must_use]
    pub fn frontier(&self) -> Option<SectionId> {
        self.iter()
            .find(|(_, state)| *state != SectionState::Read)
            .map(|(id, _)| id)
    }

    fn check_frontier(&self) -> Result<(), ProgressError> {
        let mut past_frontier = false;
        for (section, state) in self.iter() {
            if past_frontier {
                if state != SectionState::Locked {
                    return Err(ProgressError::FrontierViolation {
                        section,
                        found: state,
                    });
                }
            } else if state != SectionState::Read {
                // No operation leaves a locked section directly after the read run.
                if state != SectionState::Unread {
                    return Err(ProgressError::FrontierViolation {
                        section,
                        found: state,
                    });
                }
                past_frontier = true;
            }
        }
        Ok(())
    }
}

impl Default for ProgressMap {
    fn default() -> Self {
        Self {
            sections: initial_sections(DEFAULT_SECTION_COUNT),
        }
    }
}

fn initial_state(section: SectionId) -> SectionState {
    if section.value() == 1 {
        SectionState::Unread
    } else {
        SectionState::Locked
    }
}

fn initial_sections(section_count: u32) -> BTreeMap<SectionId, SectionState> {
    (1..=section_count)
        .map(SectionId::new)
        .map(|id| (id, initial_state(id)))
        .collect()
}
