use std::collections::BTreeSet;
use std::sync::Arc;

use diagnostic_core::model::DiagnosticId;
use storage::repository::{KeyValueRepository, StorageError};
use tracing::info;

use crate::keys::{KEY_NAMESPACE, diagnostic_of, diagnostic_prefix};

/// Enumerates and clears the diagnostics that have state in storage.
#[derive(Clone)]
pub struct DiagnosticDirectory {
    repo: Arc<dyn KeyValueRepository>,
}

impl DiagnosticDirectory {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self { repo }
    }

    /// Diagnostics with at least one stored entry, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if keys cannot be listed.
    pub async fn list(&self) -> Result<Vec<DiagnosticId>, StorageError> {
        let prefix = format!("{KEY_NAMESPACE}/");
        let keys = self.repo.list_keys(&prefix).await?;
        let ids: BTreeSet<DiagnosticId> = keys.iter().filter_map(|key| diagnostic_of(key)).collect();
        Ok(ids.into_iter().collect())
    }

    /// Delete every stored entry of `diagnostic`. Returns how many were removed.
    ///
    /// Stores already loaded for this diagnostic keep their in-memory state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if keys cannot be listed or deleted.
    pub async fn forget(&self, diagnostic: &DiagnosticId) -> Result<usize, StorageError> {
        let keys = self.repo.list_keys(&diagnostic_prefix(diagnostic)).await?;
        let mut removed = 0;
        for key in &keys {
            match self.repo.delete_value(key).await {
                Ok(()) => removed += 1,
                Err(StorageError::NotFound) => {}
                Err(err) => return Err(err),
            }
        }
        info!(%diagnostic, removed, "diagnostic state cleared");
        Ok(removed)
    }
}
