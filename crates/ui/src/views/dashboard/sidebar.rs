use dioxus::prelude::*;
use tracker_core::model::Mode;

use crate::vm::TabPillVm;

use super::intent::DashboardIntent;

#[component]
pub(super) fn Sidebar(
    logo_title: String,
    mode: Mode,
    tabs: Vec<TabPillVm>,
    mastery_percent: u8,
    mastery_label: String,
    open: bool,
    dispatch: Callback<DashboardIntent>,
) -> Element {
    let sidebar_class = if open { "sidebar" } else { "sidebar closed" };

    rsx! {
        aside { class: "{sidebar_class}",
            div { class: "logo",
                h2 { id: "logoTitle", "{logo_title}" }
            }

            div { class: "mode-switch",
                for option in Mode::ALL {
                    button {
                        key: "{option}",
                        id: format!("btn-{}", option.as_str().to_ascii_lowercase()),
                        class: if option == mode { "mode-option active" } else { "mode-option" },
                        onclick: move |_| dispatch.call(DashboardIntent::SwitchMode(option)),
                        "{option}"
                    }
                }
            }

            div { class: "mastery",
                div { class: "mastery-header",
                    span { "Mastery" }
                    span { id: "masteryPercent", "{mastery_label}" }
                }
                div { class: "mastery-track",
                    div {
                        id: "masteryBar",
                        class: "mastery-bar",
                        style: "width: {mastery_percent}%;",
                    }
                }
            }

            nav { id: "navContainer", class: "nav",
                {tabs.iter().map(|tab| {
                    let index = tab.index;
                    let pill_class = if tab.percent == 100 { "progress-pill done" } else { "progress-pill" };
                    rsx! {
                        div {
                            key: "{index}",
                            class: if tab.active { "nav-item active" } else { "nav-item" },
                            onclick: move |_| dispatch.call(DashboardIntent::SwitchTab(index)),
                            span { "{tab.title}" }
                            span { id: "pill-{index}", class: "{pill_class}", "{tab.percent_label}" }
                        }
                    }
                })}
            }
        }
    }
}
