use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(resource: &Resource<T>) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(data) => ViewState::Ready(data.clone()),
            None => ViewState::Loading,
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Prefer a snapshot pushed by the last mutation over the initial load.
#[must_use]
pub fn latest_or_loaded<T: Clone>(latest: Option<T>, resource: &Resource<T>) -> ViewState<T> {
    match latest {
        Some(data) => ViewState::Ready(data),
        None => view_state_from_resource(resource),
    }
}
