use dioxus::prelude::*;

use crate::vm::{GroupVm, TopicCardVm};

use super::intent::DashboardIntent;
use super::scripts::probe_pointer;

#[component]
pub(super) fn TopicGrid(
    groups: Vec<GroupVm>,
    no_results: bool,
    dispatch: Callback<DashboardIntent>,
) -> Element {
    if no_results {
        return rsx! {
            div { class: "empty-state",
                h3 { "No vibes found." }
                p { "Try searching for something else." }
            }
        };
    }

    rsx! {
        div { id: "contentArea", class: "content-area",
            for group in groups.iter() {
                div { key: "{group.key}", class: "group-section",
                    div { class: "group-title", "{group.name}" }
                    div { class: "topic-grid",
                        for card in group.cards.iter() {
                            TopicCard { key: "{card.dom_id}", card: card.clone(), dispatch }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TopicCard(card: TopicCardVm, dispatch: Callback<DashboardIntent>) -> Element {
    let done_class = if card.completed { " completed" } else { "" };
    let toggle_title = card.title.clone();
    let detail_title = card.title.clone();

    rsx! {
        div {
            id: "{card.dom_id}",
            class: "topic-card {card.priority_class}{done_class}",
            onclick: move |evt: MouseEvent| {
                let point = evt.client_coordinates();
                let title = toggle_title.clone();
                spawn(async move {
                    let click = probe_pointer().await.click_at(point.x, point.y);
                    dispatch.call(DashboardIntent::ToggleTopic { title, click });
                });
            },
            div { class: "card-top-row",
                div { class: "card-title-group",
                    div { class: "checkbox" }
                    span { class: "topic-text", "{card.title}" }
                }
                if card.stars > 0 {
                    div { class: "star-badge {card.priority_class}",
                        for _ in 0..card.stars {
                            span { class: "star", "★" }
                        }
                    }
                }
                if card.has_details {
                    div { class: "card-actions",
                        button {
                            class: "btn-action",
                            title: "Read Notes",
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                dispatch.call(DashboardIntent::OpenDetail(detail_title.clone()));
                            },
                            "Notes"
                        }
                    }
                }
            }
            if let Some(note) = card.note.as_ref() {
                div { class: "card-note-row",
                    div { class: "topic-note", "{note}" }
                }
            }
        }
    }
}
