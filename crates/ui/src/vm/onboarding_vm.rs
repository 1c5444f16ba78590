use diagnostic_core::model::OnboardingState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnboardingVm {
    pub step_label: String,
    pub can_go_back: bool,
    pub next_label: &'static str,
    pub completed: bool,
    pub answered: usize,
    /// Key under which the current step's answer is stored.
    pub question_id: String,
    pub answer: String,
}

#[must_use]
pub fn step_question_id(step: u32) -> String {
    format!("etape-{}", step + 1)
}

#[must_use]
pub fn map_onboarding(state: &OnboardingState) -> OnboardingVm {
    let question_id = step_question_id(state.step());
    OnboardingVm {
        step_label: format!("Étape {} sur {}", state.step() + 1, state.step_count()),
        can_go_back: !state.is_first_step() || state.is_completed(),
        next_label: if state.is_last_step() {
            "Terminer"
        } else {
            "Suivant"
        },
        completed: state.is_completed(),
        answered: state.answers().len(),
        answer: state.answer(&question_id).unwrap_or_default().to_string(),
        question_id,
    }
}
