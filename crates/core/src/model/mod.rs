mod deadline;
mod ids;
mod onboarding;
mod progress;
mod section;

pub use deadline::{
    APPROACHING_WINDOW_DAYS, IMMINENT_WINDOW_DAYS, ParseDeadlineError, RegulatoryDeadline, Urgency,
};
pub use ids::{DiagnosticId, ParseIdError, SectionId};
pub use onboarding::{DEFAULT_ONBOARDING_STEPS, OnboardingError, OnboardingState};
pub use progress::{DEFAULT_SECTION_COUNT, MarkReadOutcome, ProgressError, ProgressMap};
pub use section::{ParseSectionStateError, SectionState};
