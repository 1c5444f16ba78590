//! Storage keys for persisted client state.
//!
//! Layout: `climate-diagnostic/<diagnostic>/<slot>`.

use diagnostic_core::model::DiagnosticId;

pub const KEY_NAMESPACE: &str = "climate-diagnostic";

const READING_PROGRESS_SLOT: &str = "reading-progress";
const ONBOARDING_SLOT: &str = "onboarding";

#[must_use]
pub fn reading_progress_key(diagnostic: &DiagnosticId) -> String {
    format!("{}{READING_PROGRESS_SLOT}", diagnostic_prefix(diagnostic))
}

#[must_use]
pub fn onboarding_key(diagnostic: &DiagnosticId) -> String {
    format!("{}{ONBOARDING_SLOT}", diagnostic_prefix(diagnostic))
}

/// Prefix shared by every key of one diagnostic, trailing slash included.
#[must_use]
pub fn diagnostic_prefix(diagnostic: &DiagnosticId) -> String {
    format!("{KEY_NAMESPACE}/{diagnostic}/")
}

/// Extract the diagnostic id from a namespaced key.
#[must_use]
pub fn diagnostic_of(key: &str) -> Option<DiagnosticId> {
    let rest = key.strip_prefix(KEY_NAMESPACE)?.strip_prefix('/')?;
    let (id, _slot) = rest.split_once('/')?;
    DiagnosticId::new(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_diagnostic() {
        let id = DiagnosticId::new("acme").unwrap();
        assert_eq!(
            reading_progress_key(&id),
            "climate-diagnostic/acme/reading-progress"
        );
        assert_eq!(onboarding_key(&id), "climate-diagnostic/acme/onboarding");
    }

    #[test]
    fn diagnostic_of_parses_back() {
        let id = DiagnosticId::new("acme-2").unwrap();
        assert_eq!(diagnostic_of(&onboarding_key(&id)), Some(id));
        assert_eq!(diagnostic_of("climate-diagnostic/"), None);
        assert_eq!(diagnostic_of("other/acme/onboarding"), None);
    }
}
