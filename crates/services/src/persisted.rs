//! JSON values stored under a single key, with a recoverable load path.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use storage::repository::{KeyValueRepository, StorageError};
use tracing::{debug, warn};

/// How a store obtained its initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid persisted value was found and used.
    Restored,
    /// Nothing was stored yet; defaults were used.
    Missing,
    /// A value was stored but could not be decoded or validated; defaults were used.
    Corrupt(String),
    /// The backend could not be read; defaults were used.
    Unreadable(String),
}

impl LoadOutcome {
    #[must_use]
    pub fn is_restored(&self) -> bool {
        matches!(self, LoadOutcome::Restored)
    }

    #[must_use]
    pub fn used_default(&self) -> bool {
        !self.is_restored()
    }
}

/// Read `key`, decode it as `R`, then convert with `validate`.
///
/// Every failure collapses into `(None, outcome)`; the caller substitutes its default.
pub(crate) async fn load<R, T, E>(
    repo: &dyn KeyValueRepository,
    key: &str,
    validate: impl FnOnce(R) -> Result<T, E>,
) -> (Option<T>, LoadOutcome)
where
    R: DeserializeOwned,
    E: fmt::Display,
{
    let raw = match repo.get_value(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no persisted state, using defaults");
            return (None, LoadOutcome::Missing);
        }
        Err(err) => {
            warn!(key, error = %err, "persisted state unreadable, using defaults");
            return (None, LoadOutcome::Unreadable(err.to_string()));
        }
    };

    let decoded = serde_json::from_str::<R>(&raw)
        .map_err(|err| err.to_string())
        .and_then(|value| validate(value).map_err(|err| err.to_string()));

    match decoded {
        Ok(value) => {
            debug!(key, "restored persisted state");
            (Some(value), LoadOutcome::Restored)
        }
        Err(reason) => {
            warn!(key, %reason, "persisted state corrupt, using defaults");
            (None, LoadOutcome::Corrupt(reason))
        }
    }
}

/// Serialize `value` and overwrite `key`.
pub(crate) async fn save<T: Serialize>(
    repo: &dyn KeyValueRepository,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let encoded =
        serde_json::to_string(value).map_err(|err| StorageError::Serialization(err.to_string()))?;
    repo.put_value(key, &encoded).await
}

/// `save`, logging instead of returning the error.
///
/// Write failures never reach the UI: the in-memory state stays authoritative
/// until the next successful write.
pub(crate) async fn save_or_warn<T: Serialize>(
    repo: &dyn KeyValueRepository,
    key: &str,
    value: &T,
) -> bool {
    match save(repo, key, value).await {
        Ok(()) => true,
        Err(err) => {
            warn!(key, error = %err, "failed to persist state");
            false
        }
    }
}
