use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{OnboardingView, ReportView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ReportView)] Report {},
        #[route("/onboarding", OnboardingView)] Onboarding {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    rsx! {
        nav { class: "sidebar",
            h1 { "Diagnostic" }
            p { class: "diagnostic-id", "{ctx.diagnostic_id()}" }
            ul {
                li { Link { to: Route::Report {}, "Rapport" } }
                li { Link { to: Route::Onboarding {}, "Démarrage" } }
            }
        }
    }
}
