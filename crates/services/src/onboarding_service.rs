use std::sync::Arc;

use diagnostic_core::model::{DiagnosticId, OnboardingError, OnboardingState};
use storage::repository::KeyValueRepository;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::OnboardingServiceError;
use crate::keys::onboarding_key;
use crate::persisted::{self, LoadOutcome};

/// Guided onboarding wizard state for one diagnostic, mirrored to storage.
pub struct OnboardingStore {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
    state: Mutex<OnboardingState>,
    load_outcome: LoadOutcome,
}

impl OnboardingStore {
    /// # Errors
    ///
    /// Returns `OnboardingError::NoSteps` if `step_count` is zero.
    pub async fn load(
        repo: Arc<dyn KeyValueRepository>,
        diagnostic: &DiagnosticId,
        step_count: u32,
    ) -> Result<Self, OnboardingError> {
        let initial = OnboardingState::new(step_count)?;
        let key = onboarding_key(diagnostic);

        let (restored, load_outcome) =
            persisted::load(repo.as_ref(), &key, |raw: OnboardingState| {
                raw.validate_for(step_count)
            })
            .await;

        Ok(Self {
            repo,
            key,
            state: Mutex::new(restored.unwrap_or(initial)),
            load_outcome,
        })
    }

    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub async fn state(&self) -> OnboardingState {
        self.state.lock().await.clone()
    }

    pub async fn advance(&self) -> OnboardingState {
        self.update(OnboardingState::advance).await
    }

    pub async fn go_back(&self) -> OnboardingState {
        self.update(OnboardingState::go_back).await
    }

    pub async fn restart(&self) -> OnboardingState {
        self.update(OnboardingState::restart).await
    }

    /// Record an answer for the current wizard.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingServiceError` if the question id is blank; nothing is
    /// written in that case.
    pub async fn record_answer(
        &self,
        question_id: &str,
        answer: &str,
    ) -> Result<OnboardingState, OnboardingServiceError> {
        let mut state = self.state.lock().await;
        state.record_answer(question_id, answer)?;
        persisted::save_or_warn(self.repo.as_ref(), &self.key, &*state).await;
        Ok(state.clone())
    }

    async fn update(&self, apply: impl FnOnce(&mut OnboardingState)) -> OnboardingState {
        let mut state = self.state.lock().await;
        apply(&mut *state);
        debug!(
            step = state.step(),
            completed = state.is_completed(),
            "onboarding updated"
        );
        persisted::save_or_warn(self.repo.as_ref(), &self.key, &*state).await;
        state.clone()
    }
}
