mod onboarding_vm;
mod section_vm;

pub use onboarding_vm::{OnboardingVm, map_onboarding};
pub use section_vm::{ReportVm, SectionCardVm, map_report};
