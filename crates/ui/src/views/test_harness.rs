use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use diagnostic_core::model::DiagnosticId;
use diagnostic_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, DiagnosticConfig, OnboardingStore, ReadingProgressStore};
use storage::repository::Storage;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::onboarding::{WizardAction, render_wizard, use_wizard};
use crate::views::report::{ReportActions, render_report, use_report};
use crate::views::{OnboardingView, ReportView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn diagnostic_id(&self) -> DiagnosticId {
        self.services.config().diagnostic_id.clone()
    }

    fn onboarding_pending(&self) -> bool {
        false
    }

    fn reading_progress(&self) -> Arc<ReadingProgressStore> {
        self.services.reading_progress()
    }

    fn onboarding(&self) -> Arc<OnboardingStore> {
        self.services.onboarding()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Report,
    Onboarding,
    /// Report page whose callbacks are exposed through `HarnessHandles`.
    ReportActions,
    /// Onboarding page whose callback is exposed through `HarnessHandles`.
    OnboardingActions,
}

#[derive(Clone, Default)]
pub struct HarnessHandles {
    report: Rc<RefCell<Option<ReportActions>>>,
    wizard: Rc<RefCell<Option<Callback<WizardAction>>>>,
}

impl HarnessHandles {
    pub fn report(&self) -> ReportActions {
        (*self.report.borrow()).expect("report actions registered")
    }

    pub fn wizard(&self) -> Callback<WizardAction> {
        (*self.wizard.borrow()).expect("wizard callback registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Report => rsx! { ReportView {} },
        ViewKind::Onboarding => rsx! { OnboardingView {} },
        ViewKind::ReportActions => rsx! { ReportActionsHarness {} },
        ViewKind::OnboardingActions => rsx! { OnboardingActionsHarness {} },
    }
}

#[component]
fn ReportActionsHarness() -> Element {
    let ctx = use_context::<AppContext>();
    let handles = use_context::<HarnessHandles>();
    let (state, actions) = use_report(&ctx.reading_progress());
    *handles.report.borrow_mut() = Some(actions);
    render_report(state, actions)
}

#[component]
fn OnboardingActionsHarness() -> Element {
    let ctx = use_context::<AppContext>();
    let handles = use_context::<HarnessHandles>();
    let wizard = use_wizard(&ctx.onboarding());
    *handles.wizard.borrow_mut() = Some(wizard.act);
    render_wizard(wizard)
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub handles: HarnessHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Let spawned resources finish and re-render.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Run `f` inside the dom's runtime, as an event handler would.
    pub fn in_runtime<O>(&self, f: impl FnOnce() -> O) -> O {
        self.dom.in_runtime(f)
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory()).await
}

pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(&storage, fixed_clock(), DiagnosticConfig::default())
        .await
        .expect("build services");

    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        services,
        handles,
    }
}
