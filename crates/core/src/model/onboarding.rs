use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of steps in the guided onboarding.
pub const DEFAULT_ONBOARDING_STEPS: u32 = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OnboardingError {
    #[error("onboarding needs at least one step")]
    NoSteps,

    #[error("question id cannot be empty")]
    EmptyQuestionId,

    #[error("expected {expected} steps, found {found}")]
    StepCountMismatch { expected: u32, found: u32 },

    #[error("step {step} is out of range for {step_count} steps")]
    StepOutOfRange { step: u32, step_count: u32 },
}

/// Where the user is in the onboarding wizard and what they answered so far.
///
/// `step` is 0-based and always `< step_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    step: u32,
    step_count: u32,
    #[serde(default)]
    answers: BTreeMap<String, String>,
    #[serde(default)]
    completed: bool,
}

impl OnboardingState {
    /// # Errors
    ///
    /// Returns `OnboardingError::NoSteps` if `step_count` is zero.
    pub fn new(step_count: u32) -> Result<Self, OnboardingError> {
        if step_count == 0 {
            return Err(OnboardingError::NoSteps);
        }
        Ok(Self {
            step: 0,
            step_count,
            answers: BTreeMap::new(),
            completed: false,
        })
    }

    /// Check a deserialized state against the configured wizard length.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError` if the step count differs or the current
    /// step is out of range.
    pub fn validate_for(self, step_count: u32) -> Result<Self, OnboardingError> {
        if self.step_count != step_count {
            return Err(OnboardingError::StepCountMismatch {
                expected: step_count,
                found: self.step_count,
            });
        }
        if self.step >= self.step_count {
            return Err(OnboardingError::StepOutOfRange {
                step: self.step,
                step_count: self.step_count,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    #[must_use]
    pub fn is_first_step(&self) -> bool {
        self.step == 0
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step + 1 == self.step_count
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    /// Move forward one step, or finish the wizard from the last step.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        if self.is_last_step() {
            self.completed = true;
        } else {
            self.step += 1;
        }
    }

    /// Step back; reopens a completed wizard on its last step.
    pub fn go_back(&mut self) {
        if self.completed {
            self.completed = false;
            return;
        }
        self.step = self.step.saturating_sub(1);
    }

    /// Store an answer. A blank answer clears the question.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::EmptyQuestionId` if `question_id` is blank.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        answer: &str,
    ) -> Result<(), OnboardingError> {
        let question_id = question_id.trim();
        if question_id.is_empty() {
            return Err(OnboardingError::EmptyQuestionId);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers
                .insert(question_id.to_string(), answer.to_string());
        }
        Ok(())
    }

    pub fn restart(&mut self) {
        self.step = 0;
        self.answers.clear();
        self.completed = false;
    }
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            step: 0,
            step_count: DEFAULT_ONBOARDING_STEPS,
            answers: BTreeMap::new(),
            completed: false,
        }
    }
}
