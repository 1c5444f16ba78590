use diagnostic_core::Clock;
use diagnostic_core::model::{RegulatoryDeadline, Urgency};

/// A deadline with its urgency band as of the service clock's "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedDeadline {
    pub deadline: RegulatoryDeadline,
    pub urgency: Urgency,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct DeadlineService {
    clock: Clock,
}

impl DeadlineService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Classify every deadline, soonest due date first.
    #[must_use]
    pub fn classify(&self, deadlines: &[RegulatoryDeadline]) -> Vec<ClassifiedDeadline> {
        let today = self.clock.today();
        let mut classified: Vec<ClassifiedDeadline> = deadlines
            .iter()
            .map(|deadline| ClassifiedDeadline {
                urgency: deadline.urgency(today),
                days_remaining: deadline.days_remaining(today),
                deadline: deadline.clone(),
            })
            .collect();
        classified.sort_by(|a, b| {
            a.deadline
                .due_on
                .cmp(&b.deadline.due_on)
                .then_with(|| a.deadline.label.cmp(&b.deadline.label))
        });
        classified
    }

    /// The nearest deadline that is not overdue yet.
    #[must_use]
    pub fn next_due(&self, deadlines: &[RegulatoryDeadline]) -> Option<ClassifiedDeadline> {
        self.classify(deadlines)
            .into_iter()
            .find(|item| item.urgency != Urgency::Overdue)
    }
}
