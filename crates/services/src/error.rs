//! Shared error types for the services crate.

use thiserror::Error;

use diagnostic_core::model::{OnboardingError, ProgressError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by `OnboardingStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OnboardingServiceError {
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
}
