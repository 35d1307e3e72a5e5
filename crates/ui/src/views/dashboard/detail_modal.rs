use dioxus::prelude::*;

use crate::vm::{DetailBlockVm, DetailVm};

use super::intent::DashboardIntent;

#[component]
pub(super) fn DetailModal(
    detail: DetailVm,
    copied: Option<String>,
    dispatch: Callback<DashboardIntent>,
) -> Element {
    rsx! {
        div {
            id: "noteModal",
            class: "modal-backdrop",
            onclick: move |_| dispatch.call(DashboardIntent::CloseDetail),
            div {
                class: "modal-panel",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                div { class: "modal-header",
                    h2 { id: "modalTitle", "{detail.title}" }
                    button {
                        class: "modal-close",
                        onclick: move |_| dispatch.call(DashboardIntent::CloseDetail),
                        "×"
                    }
                }
                div { id: "modalBody", class: "modal-body",
                    if let Some(placeholder) = detail.placeholder() {
                        p { class: "modal-text", "{placeholder}" }
                    }
                    {detail.blocks.iter().enumerate().map(|(idx, block)| {
                        render_block(idx, block, copied.as_deref(), dispatch)
                    })}
                }
            }
        }
    }
}

fn render_block(
    idx: usize,
    block: &DetailBlockVm,
    copied: Option<&str>,
    dispatch: Callback<DashboardIntent>,
) -> Element {
    match block {
        DetailBlockVm::Text { html } => rsx! {
            div { key: "{idx}", class: "modal-text", dangerous_inner_html: "{html}" }
        },
        DetailBlockVm::Code {
            dom_id,
            language,
            tokens,
            raw,
        } => {
            let copy_label = if copied == Some(dom_id.as_str()) {
                "Copied!"
            } else {
                "Copy code"
            };
            let intent = DashboardIntent::CopyCode {
                dom_id: dom_id.clone(),
                raw: raw.clone(),
            };
            rsx! {
                div { key: "{idx}", class: "code-container",
                    div { class: "code-header",
                        span { class: "code-lang", "{language}" }
                        button {
                            class: "copy-btn",
                            onclick: move |_| dispatch.call(intent.clone()),
                            "{copy_label}"
                        }
                    }
                    div { class: "code-scroll",
                        pre { class: "code-content", id: "{dom_id}",
                            for token in tokens.iter() {
                                span { class: token.kind.css_class(), "{token.text}" }
                            }
                        }
                    }
                }
            }
        }
        DetailBlockVm::Gallery { urls, caption } => rsx! {
            div { key: "{idx}", class: "modal-images",
                for url in urls.iter() {
                    img {
                        class: "modal-img",
                        src: "{url}",
                        alt: "Topic Diagram",
                        loading: "lazy",
                    }
                }
                if let Some(caption) = caption.as_ref() {
                    p { class: "modal-caption", "{caption}" }
                }
            }
        },
    }
}
