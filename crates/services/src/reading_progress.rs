use std::collections::BTreeMap;
use std::sync::Arc;

use diagnostic_core::model::{
    DiagnosticId, MarkReadOutcome, ProgressError, ProgressMap, SectionId, SectionState,
};
use storage::repository::KeyValueRepository;
use tokio::sync::Mutex;
use tracing::debug;

use crate::keys::reading_progress_key;
use crate::persisted::{self, LoadOutcome};

/// On-disk shape: `{"1": "nouveau", "2": "locked", ...}`.
type PersistedProgress = BTreeMap<u32, SectionState>;

/// Per-section read progress for one diagnostic, mirrored to storage.
///
/// Every mutation holds the lock across the storage write, so writes land in
/// the order the operations were called.
pub struct ReadingProgressStore {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
    map: Mutex<ProgressMap>,
    load_outcome: LoadOutcome,
}

impl ReadingProgressStore {
    /// Restore progress for `diagnostic`, falling back to the initial map when
    /// nothing valid is stored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::EmptySectionCount` if `section_count` is zero.
    /// Storage problems are never errors here; see [`Self::load_outcome`].
    pub async fn load(
        repo: Arc<dyn KeyValueRepository>,
        diagnostic: &DiagnosticId,
        section_count: u32,
    ) -> Result<Self, ProgressError> {
        let initial = ProgressMap::new(section_count)?;
        let key = reading_progress_key(diagnostic);

        let (restored, load_outcome) =
            persisted::load(repo.as_ref(), &key, |raw: PersistedProgress| {
                ProgressMap::from_entries(
                    raw.into_iter()
                        .map(|(id, state)| (SectionId::new(id), state)),
                    section_count,
                )
            })
            .await;

        Ok(Self {
            repo,
            key,
            map: Mutex::new(restored.unwrap_or(initial)),
            load_outcome,
        })
    }

    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current map.
    pub async fn progress(&self) -> ProgressMap {
        self.map.lock().await.clone()
    }

    pub async fn all_read(&self) -> bool {
        self.map.lock().await.all_read()
    }

    /// Mark `section` read and unlock the one after it.
    ///
    /// Locked or unknown sections leave the map untouched and nothing is written.
    pub async fn mark_as_read(&self, section: SectionId) -> ProgressMap {
        let mut map = self.map.lock().await;
        match map.mark_as_read(section) {
            MarkReadOutcome::Applied => {
                debug!(%section, "section marked read");
                persisted::save_or_warn(self.repo.as_ref(), &self.key, &*map).await;
            }
            MarkReadOutcome::Locked => {
                debug!(%section, "ignoring read of locked section");
            }
            MarkReadOutcome::UnknownSection => {
                debug!(%section, "ignoring read of unknown section");
            }
        }
        map.clone()
    }

    pub async fn unlock_all(&self) -> ProgressMap {
        let mut map = self.map.lock().await;
        map.unlock_all();
        debug!("all sections unlocked");
        persisted::save_or_warn(self.repo.as_ref(), &self.key, &*map).await;
        map.clone()
    }

    pub async fn reset_progress(&self) -> ProgressMap {
        let mut map = self.map.lock().await;
        map.reset();
        debug!("reading progress reset");
        persisted::save_or_warn(self.repo.as_ref(), &self.key, &*map).await;
        map.clone()
    }
}
