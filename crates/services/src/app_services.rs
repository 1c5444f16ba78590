use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::config::DiagnosticConfig;
use crate::deadline_service::DeadlineService;
use crate::diagnostic_directory::DiagnosticDirectory;
use crate::error::AppServicesError;
use crate::onboarding_service::OnboardingStore;
use crate::reading_progress::ReadingProgressStore;

/// Assembles app-facing services for one diagnostic.
#[derive(Clone)]
pub struct AppServices {
    config: DiagnosticConfig,
    reading_progress: Arc<ReadingProgressStore>,
    onboarding: Arc<OnboardingStore>,
    deadlines: DeadlineService,
    directory: DiagnosticDirectory,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// configuration is unusable.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: DiagnosticConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock, config).await
    }

    /// Build services over an existing `Storage` bundle.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the section or step count is zero.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        config: DiagnosticConfig,
    ) -> Result<Self, AppServicesError> {
        let reading_progress = Arc::new(
            ReadingProgressStore::load(
                Arc::clone(&storage.kv),
                &config.diagnostic_id,
                config.section_count,
            )
            .await?,
        );
        let onboarding = Arc::new(
            OnboardingStore::load(
                Arc::clone(&storage.kv),
                &config.diagnostic_id,
                config.onboarding_steps,
            )
            .await?,
        );

        info!(
            diagnostic = %config.diagnostic_id,
            progress = ?reading_progress.load_outcome(),
            onboarding = ?onboarding.load_outcome(),
            "diagnostic state loaded"
        );

        Ok(Self {
            config,
            reading_progress,
            onboarding,
            deadlines: DeadlineService::new(clock),
            directory: DiagnosticDirectory::new(Arc::clone(&storage.kv)),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    #[must_use]
    pub fn reading_progress(&self) -> Arc<ReadingProgressStore> {
        Arc::clone(&self.reading_progress)
    }

    #[must_use]
    pub fn onboarding(&self) -> Arc<OnboardingStore> {
        Arc::clone(&self.onboarding)
    }

    #[must_use]
    pub fn deadlines(&self) -> DeadlineService {
        self.deadlines
    }

    #[must_use]
    pub fn directory(&self) -> DiagnosticDirectory {
        self.directory.clone()
    }
}
