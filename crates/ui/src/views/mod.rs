mod onboarding;
mod report;
mod state;

#[cfg(test)]
mod action_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use onboarding::OnboardingView;
pub use report::ReportView;
pub use state::{ViewState, latest_or_loaded, view_state_from_resource};
