use std::sync::Arc;

use dioxus::prelude::*;
use services::DashboardService;

use crate::context::AppContext;
use crate::views::{LoadFailedView, ViewError};
use crate::vm::{RenderInput, build_dashboard_vm};

use super::confetti::{ConfettiLayer, use_celebration_slot};
use super::detail_modal::DetailModal;
use super::intent::{DashboardIntent, collapse_sidebar_if_narrow, use_dashboard_dispatcher};
use super::sidebar::Sidebar;
use super::state::use_dashboard_signals;
use super::topics::TopicGrid;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    match ctx.dashboard() {
        Some(service) => rsx! {
            DashboardScreen { service: ServiceHandle(service) }
        },
        None => {
            let message = ctx
                .load_error()
                .unwrap_or_else(|| "Content is unavailable.".to_string());
            rsx! { LoadFailedView { message } }
        }
    }
}

#[derive(Clone)]
struct ServiceHandle(Arc<DashboardService>);

impl PartialEq for ServiceHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[component]
fn DashboardScreen(service: ServiceHandle) -> Element {
    let service = service.0;
    let signals = use_dashboard_signals();
    let slot = use_celebration_slot();
    let dispatch = use_dashboard_dispatcher(Arc::clone(&service), signals, slot);
    use_hook(move || {
        spawn(collapse_sidebar_if_narrow(signals));
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<DashboardTestHandles>() {
                handles.register(dispatch);
            }
        }
    }

    // Subscribe to service changes.
    let _ = signals.revision.read();
    let snapshot = service.snapshot();
    let vm = build_dashboard_vm(RenderInput {
        mode: snapshot.mode,
        active_tab: snapshot.active_tab,
        catalog: snapshot.content.catalog(snapshot.mode),
        record: &snapshot.record,
        details: snapshot.content.details(),
        search: &snapshot.search,
    });

    let dark = *signals.dark_theme.read();
    let theme_class = if dark { "dark" } else { "light" };
    let fade_class = if *signals.fading.read() { " fading" } else { "" };
    let theme_icon = if dark { "☾" } else { "☀" };
    let error_message = (*signals.error.read()).map(ViewError::message);
    let detail = signals.detail.read().clone();
    let copied = signals.copied.read().clone();

    rsx! {
        div {
            id: "dashboard-root",
            class: "dashboard {theme_class}{fade_class}",
            style: "--accent: {vm.accent_color};",
            Sidebar {
                logo_title: vm.logo_title.clone(),
                mode: vm.mode,
                tabs: vm.tabs.clone(),
                mastery_percent: vm.mastery_percent,
                mastery_label: vm.mastery_label.clone(),
                open: *signals.sidebar_open.read(),
                dispatch,
            }
            main { class: "main-content",
                header { class: "top-bar",
                    button {
                        class: "sidebar-toggle",
                        onclick: move |_| dispatch.call(DashboardIntent::ToggleSidebar),
                        "☰"
                    }
                    div { class: "header-text",
                        h1 { id: "headerTitle", "{vm.header_title}" }
                        p { id: "headerSubtitle", "{vm.header_subtitle}" }
                    }
                    input {
                        id: "searchInput",
                        class: "search-input",
                        r#type: "search",
                        placeholder: "Search topics...",
                        value: "{vm.search}",
                        oninput: move |evt: FormEvent| dispatch.call(DashboardIntent::Search(evt.value())),
                    }
                    button {
                        class: "theme-toggle",
                        onclick: move |_| dispatch.call(DashboardIntent::ToggleTheme),
                        "{theme_icon}"
                    }
                }
                if let Some(message) = error_message {
                    div { class: "error-banner", role: "alert",
                        span { "{message}" }
                        button {
                            onclick: move |_| dispatch.call(DashboardIntent::DismissError),
                            "Dismiss"
                        }
                    }
                }
                TopicGrid {
                    groups: vm.groups.clone(),
                    no_results: vm.no_results,
                    dispatch,
                }
            }
            if let Some(detail) = detail {
                DetailModal { detail, copied, dispatch }
            }
            ConfettiLayer { particles: signals.particles }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct DashboardTestHandles {
    dispatch: Rc<RefCell<Option<Callback<DashboardIntent>>>>,
}

#[cfg(test)]
impl DashboardTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<DashboardIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<DashboardIntent> {
        (*self.dispatch.borrow()).expect("dashboard dispatch registered")
    }
}
