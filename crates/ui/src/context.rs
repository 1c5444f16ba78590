use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use diagnostic_core::model::DiagnosticId;
use services::{OnboardingStore, ReadingProgressStore};

pub trait UiApp: Send + Sync {
    fn diagnostic_id(&self) -> DiagnosticId;
    /// Whether the report should hand over to onboarding on first display.
    fn onboarding_pending(&self) -> bool;

    fn reading_progress(&self) -> Arc<ReadingProgressStore>;
    fn onboarding(&self) -> Arc<OnboardingStore>;
}

#[derive(Clone)]
pub struct AppContext {
    diagnostic_id: DiagnosticId,
    onboarding_redirect_once: Arc<AtomicBool>,

    reading_progress: Arc<ReadingProgressStore>,
    onboarding: Arc<OnboardingStore>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            diagnostic_id: app.diagnostic_id(),
            onboarding_redirect_once: Arc::new(AtomicBool::new(app.onboarding_pending())),
            reading_progress: app.reading_progress(),
            onboarding: app.onboarding(),
        }
    }

    #[must_use]
    pub fn diagnostic_id(&self) -> &DiagnosticId {
        &self.diagnostic_id
    }

    /// True the first time it is called if onboarding was pending at launch.
    #[must_use]
    pub fn take_onboarding_redirect(&self) -> bool {
        self.onboarding_redirect_once.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn reading_progress(&self) -> Arc<ReadingProgressStore> {
        Arc::clone(&self.reading_progress)
    }

    #[must_use]
    pub fn onboarding(&self) -> Arc<OnboardingStore> {
        Arc::clone(&self.onboarding)
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
