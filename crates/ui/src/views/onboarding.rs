use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::Link;
use services::OnboardingStore;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewState, latest_or_loaded};
use crate::vm::{OnboardingVm, map_onboarding};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum WizardAction {
    Next,
    Back,
    Restart,
    Answer { question_id: String, answer: String },
}

pub(crate) struct Wizard {
    pub state: ViewState<OnboardingVm>,
    /// Set when the last answer was refused.
    pub notice: Option<String>,
    pub act: Callback<WizardAction>,
}

pub(crate) fn use_wizard(store: &Arc<OnboardingStore>) -> Wizard {
    let latest = use_signal(|| None::<OnboardingVm>);
    let notice = use_signal(|| None::<String>);

    let store_for_resource = Arc::clone(store);
    let resource = use_resource(move || {
        let store = store_for_resource.clone();
        async move { map_onboarding(&store.state().await) }
    });

    let store = Arc::clone(store);
    let act = use_callback(move |action: WizardAction| {
        let store = store.clone();
        let mut latest = latest;
        let mut notice = notice;
        spawn(async move {
            let state = match action {
                WizardAction::Next => store.advance().await,
                WizardAction::Back => store.go_back().await,
                WizardAction::Restart => store.restart().await,
                WizardAction::Answer {
                    question_id,
                    answer,
                } => match store.record_answer(&question_id, &answer).await {
                    Ok(state) => state,
                    Err(err) => {
                        notice.set(Some(err.to_string()));
                        return;
                    }
                },
            };
            notice.set(None);
            latest.set(Some(map_onboarding(&state)));
        });
    });

    Wizard {
        state: latest_or_loaded(latest(), &resource),
        notice: notice(),
        act,
    }
}

#[component]
pub fn OnboardingView() -> Element {
    let ctx = use_context::<AppContext>();
    let wizard = use_wizard(&ctx.onboarding());
    render_wizard(wizard)
}

pub(crate) fn render_wizard(wizard: Wizard) -> Element {
    let Wizard { state, notice, act } = wizard;

    rsx! {
        div { class: "page",
            h2 { "Démarrage du diagnostic" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(wizard) => {
                    let question_id = wizard.question_id.clone();
                    rsx! {
                        if wizard.completed {
                            p { class: "wizard-done", "Démarrage terminé." }
                            Link { to: Route::Report {}, "Voir le rapport" }
                        } else {
                            p { class: "wizard-step", "{wizard.step_label}" }
                            label { class: "wizard-answer",
                                "Votre réponse"
                                input {
                                    r#type: "text",
                                    value: "{wizard.answer}",
                                    onchange: move |evt: FormEvent| {
                                        act.call(WizardAction::Answer {
                                            question_id: question_id.clone(),
                                            answer: evt.value(),
                                        });
                                    },
                                }
                            }
                        }
                        if let Some(message) = notice {
                            p { class: "wizard-notice", "{message}" }
                        }
                        p { class: "wizard-answered", "Réponses enregistrées : {wizard.answered}" }
                        div { class: "wizard-actions",
                            button {
                                disabled: !wizard.can_go_back,
                                onclick: move |_| act.call(WizardAction::Back),
                                "Précédent"
                            }
                            if !wizard.completed {
                                button {
                                    onclick: move |_| act.call(WizardAction::Next),
                                    "{wizard.next_label}"
                                }
                            }
                            button {
                                onclick: move |_| act.call(WizardAction::Restart),
                                "Recommencer"
                            }
                        }
                    }
                }
            }
        }
    }
}
