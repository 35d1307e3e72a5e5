use dioxus::prelude::*;

/// Shown instead of the dashboard when the startup documents fail to load.
#[component]
pub fn LoadFailedView(message: String) -> Element {
    rsx! {
        div { class: "load-failed",
            h1 { id: "headerTitle", "Error Loading Data" }
            p { id: "headerSubtitle", "{message}" }
        }
    }
}
