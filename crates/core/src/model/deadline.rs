use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deadlines this close (in days) are `Imminent`.
pub const IMMINENT_WINDOW_DAYS: i64 = 30;

/// Deadlines this close (in days) are at least `Approaching`.
pub const APPROACHING_WINDOW_DAYS: i64 = 90;

/// A dated regulatory obligation (reporting window, filing date, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatoryDeadline {
    pub label: String,
    pub due_on: NaiveDate,
}

impl RegulatoryDeadline {
    #[must_use]
    pub fn new(label: impl Into<String>, due_on: NaiveDate) -> Self {
        Self {
            label: label.into(),
            due_on,
        }
    }

    /// Signed number of days between `today` and the due date.
    #[must_use]
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.due_on - today).num_days()
    }

    #[must_use]
    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        Urgency::classify(self.due_on, today)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseDeadlineError {
    #[error("expected <label>=<YYYY-MM-DD>, got {0:?}")]
    MissingSeparator(String),

    #[error("deadline label cannot be empty")]
    EmptyLabel,

    #[error("invalid due date {0:?}")]
    InvalidDate(String),
}

/// Parses `label=YYYY-MM-DD`. The label may itself contain `=`; the date is
/// taken after the last one.
impl FromStr for RegulatoryDeadline {
    type Err = ParseDeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, date) = s
            .rsplit_once('=')
            .ok_or_else(|| ParseDeadlineError::MissingSeparator(s.to_string()))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(ParseDeadlineError::EmptyLabel);
        }
        let date = date.trim();
        let due_on = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ParseDeadlineError::InvalidDate(date.to_string()))?;
        Ok(Self::new(label, due_on))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Imminent,
    Approaching,
    Distant,
}

impl Urgency {
    /// Band a due date relative to `today`. The due day itself counts as imminent.
    #[must_use]
    pub fn classify(due_on: NaiveDate, today: NaiveDate) -> Self {
        let days = (due_on - today).num_days();
        if days < 0 {
            Urgency::Overdue
        } else if days <= IMMINENT_WINDOW_DAYS {
            Urgency::Imminent
        } else if days <= APPROACHING_WINDOW_DAYS {
            Urgency::Approaching
        } else {
            Urgency::Distant
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Overdue => "Dépassée",
            Urgency::Imminent => "Urgente",
            Urgency::Approaching => "Proche",
            Urgency::Distant => "À venir",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn in_days(days: i64) -> NaiveDate {
        today() + Duration::days(days)
    }

    #[test]
    fn classify_band_edges() {
        assert_eq!(Urgency::classify(in_days(-1), today()), Urgency::Overdue);
        assert_eq!(Urgency::classify(in_days(0), today()), Urgency::Imminent);
        assert_eq!(Urgency::classify(in_days(30), today()), Urgency::Imminent);
        assert_eq!(Urgency::classify(in_days(31), today()), Urgency::Approaching);
        assert_eq!(Urgency::classify(in_days(90), today()), Urgency::Approaching);
        assert_eq!(Urgency::classify(in_days(91), today()), Urgency::Distant);
    }

    #[test]
    fn days_remaining_is_signed() {
        let deadline = RegulatoryDeadline::new("CSRD report", in_days(-3));
        assert_eq!(deadline.days_remaining(today()), -3);
        assert_eq!(deadline.urgency(today()), Urgency::Overdue);
    }

    #[test]
    fn parses_label_and_date() {
        let deadline: RegulatoryDeadline = " Décret tertiaire = 2025-09-30 ".parse().unwrap();
        assert_eq!(deadline.label, "Décret tertiaire");
        assert_eq!(deadline.due_on, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());

        let with_equals: RegulatoryDeadline = "a=b=2025-01-02".parse().unwrap();
        assert_eq!(with_equals.label, "a=b");
    }

    #[test]
    fn rejects_malformed_deadlines() {
        assert!(matches!(
            "CSRD".parse::<RegulatoryDeadline>(),
            Err(ParseDeadlineError::MissingSeparator(_))
        ));
        assert_eq!(
            " =2025-01-02".parse::<RegulatoryDeadline>(),
            Err(ParseDeadlineError::EmptyLabel)
        );
        assert_eq!(
            "CSRD=2025-02-30".parse::<RegulatoryDeadline>(),
            Err(ParseDeadlineError::InvalidDate("2025-02-30".to_string()))
        );
    }

    #[test]
    fn urgency_orders_most_pressing_first() {
        let mut bands = vec![
            Urgency::Distant,
            Urgency::Overdue,
            Urgency::Approaching,
            Urgency::Imminent,
        ];
        bands.sort();
        assert_eq!(
            bands,
            vec![
                Urgency::Overdue,
                Urgency::Imminent,
                Urgency::Approaching,
                Urgency::Distant
            ]
        );
    }
}
