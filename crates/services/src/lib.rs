#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod deadline_service;
pub mod diagnostic_directory;
pub mod error;
pub mod keys;
pub mod onboarding_service;
mod persisted;
pub mod reading_progress;

pub use diagnostic_core::Clock;

pub use app_services::AppServices;
pub use config::DiagnosticConfig;
pub use deadline_service::{ClassifiedDeadline, DeadlineService};
pub use diagnostic_directory::DiagnosticDirectory;
pub use error::{AppServicesError, OnboardingServiceError};
pub use onboarding_service::OnboardingStore;
pub use persisted::LoadOutcome;
pub use reading_progress::ReadingProgressStore;
