use tracker_core::highlight::{Token, highlight};
use tracker_core::model::DetailBlock;

use super::markdown_to_html;

pub const NO_NOTES_PLACEHOLDER: &str = "No formatted notes available.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailBlockVm {
    Text {
        html: String,
    },
    Code {
        dom_id: String,
        language: String,
        tokens: Vec<Token>,
        /// Unhighlighted source, used for copying.
        raw: String,
    },
    Gallery {
        urls: Vec<String>,
        caption: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailVm {
    pub title: String,
    pub blocks: Vec<DetailBlockVm>,
}

impl DetailVm {
    /// Text shown instead of blocks when there is nothing to render.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.blocks.is_empty().then_some(NO_NOTES_PLACEHOLDER)
    }
}

#[must_use]
pub fn build_detail_vm(title: &str, blocks: &[DetailBlock]) -> DetailVm {
    let blocks = blocks
        .iter()
        .enumerate()
        .filter_map(|(idx, block)| match block {
            DetailBlock::Text { content } => Some(DetailBlockVm::Text {
                html: markdown_to_html(content),
            }),
            DetailBlock::Code { language, content } => Some(DetailBlockVm::Code {
                dom_id: format!("code-block-{idx}"),
                language: language.clone(),
                tokens: highlight(content),
                raw: content.clone(),
            }),
            DetailBlock::Gallery { urls, caption } => Some(DetailBlockVm::Gallery {
                urls: urls.clone(),
                caption: caption.clone().filter(|c| !c.trim().is_empty()),
            }),
            DetailBlock::Unsupported => None,
        })
        .collect();

    DetailVm {
        title: title.to_string(),
        blocks,
    }
}
