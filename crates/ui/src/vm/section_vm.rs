use diagnostic_core::model::{ProgressMap, SectionId, SectionState};

/// One report section as the list renders it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionCardVm {
    pub id: SectionId,
    pub title: String,
    pub badge: Option<&'static str>,
    pub clickable: bool,
    pub css_class: &'static str,
}

impl SectionCardVm {
    #[must_use]
    pub fn new(id: SectionId, state: SectionState) -> Self {
        let (badge, css_class) = match state {
            SectionState::Locked => (None, "locked"),
            SectionState::Unread => (Some("Nouveau"), "unread"),
            SectionState::Read => (Some("Lu"), "read"),
        };
        Self {
            id,
            title: format!("Section {id}"),
            badge,
            clickable: state.is_accessible(),
            css_class,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub sections: Vec<SectionCardVm>,
    pub read_count: usize,
    pub total: u32,
    pub all_read: bool,
}

impl ReportVm {
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} / {} sections lues", self.read_count, self.total)
    }
}

#[must_use]
pub fn map_report(progress: &ProgressMap) -> ReportVm {
    ReportVm {
        sections: progress
            .iter()
            .map(|(id, state)| SectionCardVm::new(id, state))
            .collect(),
        read_count: progress.read_count(),
        total: progress.section_count(),
        all_read: progress.all_read(),
    }
}
