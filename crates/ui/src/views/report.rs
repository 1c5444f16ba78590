use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use diagnostic_core::model::SectionId;
use services::ReadingProgressStore;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewState, latest_or_loaded};
use crate::vm::{ReportVm, SectionCardVm, map_report};

/// Callbacks the report page hands to its buttons.
#[derive(Clone, Copy)]
pub(crate) struct ReportActions {
    pub open: Callback<SectionId>,
    pub unlock_all: Callback<()>,
    pub reset: Callback<()>,
}

/// Loads the report once, then follows the snapshot returned by each mutation.
pub(crate) fn use_report(
    store: &Arc<ReadingProgressStore>,
) -> (ViewState<ReportVm>, ReportActions) {
    let latest = use_signal(|| None::<ReportVm>);

    let store_for_resource = Arc::clone(store);
    let resource = use_resource(move || {
        let store = store_for_resource.clone();
        async move { map_report(&store.progress().await) }
    });

    let store_for_open = Arc::clone(store);
    let open = use_callback(move |section: SectionId| {
        let store = store_for_open.clone();
        let mut latest = latest;
        spawn(async move {
            let progress = store.mark_as_read(section).await;
            latest.set(Some(map_report(&progress)));
        });
    });

    let store_for_unlock = Arc::clone(store);
    let unlock_all = use_callback(move |()| {
        let store = store_for_unlock.clone();
        let mut latest = latest;
        spawn(async move {
            let progress = store.unlock_all().await;
            latest.set(Some(map_report(&progress)));
        });
    });

    let store_for_reset = Arc::clone(store);
    let reset = use_callback(move |()| {
        let store = store_for_reset.clone();
        let mut latest = latest;
        spawn(async move {
            let progress = store.reset_progress().await;
            latest.set(Some(map_report(&progress)));
        });
    });

    let state = latest_or_loaded(latest(), &resource);
    (
        state,
        ReportActions {
            open,
            unlock_all,
            reset,
        },
    )
}

#[component]
pub fn ReportView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let redirect_ctx = ctx.clone();
    use_effect(move || {
        if redirect_ctx.take_onboarding_redirect() {
            navigator.push(Route::Onboarding {});
        }
    });

    let (state, actions) = use_report(&ctx.reading_progress());
    render_report(state, actions)
}

pub(crate) fn render_report(state: ViewState<ReportVm>, actions: ReportActions) -> Element {
    let ReportActions {
        open,
        unlock_all,
        reset,
    } = actions;

    rsx! {
        div { class: "page",
            h2 { "Rapport de maturité climat" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(report) => rsx! {
                    p { class: "progress-label", "{report.progress_label()}" }
                    if report.all_read {
                        div { class: "all-read", "Toutes les sections ont été lues." }
                    }
                    ul { class: "section-list",
                        for section in report.sections {
                            SectionCard { key: "{section.id}", section, on_open: open }
                        }
                    }
                    div { class: "report-actions",
                        button { onclick: move |_| unlock_all.call(()), "Tout débloquer" }
                        button { onclick: move |_| reset.call(()), "Réinitialiser" }
                    }
                },
            }
        }
    }
}

#[component]
fn SectionCard(section: SectionCardVm, on_open: Callback<SectionId>) -> Element {
    let id = section.id;
    rsx! {
        li { class: "section-card {section.css_class}",
            if section.clickable {
                button { class: "section-open", onclick: move |_| on_open.call(id),
                    "{section.title}"
                }
            } else {
                span { class: "section-title", "{section.title}" }
            }
            if let Some(badge) = section.badge {
                span { class: "badge", "{badge}" }
            }
        }
    }
}
