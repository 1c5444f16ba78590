use diagnostic_core::model::{DEFAULT_ONBOARDING_STEPS, DEFAULT_SECTION_COUNT, DiagnosticId};

/// Per-diagnostic knobs handed to the stores at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticConfig {
    pub diagnostic_id: DiagnosticId,
    pub section_count: u32,
    pub onboarding_steps: u32,
}

impl DiagnosticConfig {
    #[must_use]
    pub fn for_diagnostic(diagnostic_id: DiagnosticId) -> Self {
        Self {
            diagnostic_id,
            ..Self::default()
        }
    }
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            diagnostic_id: DiagnosticId::default(),
            section_count: DEFAULT_SECTION_COUNT,
            onboarding_steps: DEFAULT_ONBOARDING_STEPS,
        }
    }
}
