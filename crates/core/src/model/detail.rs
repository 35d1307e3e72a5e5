use std::collections::HashMap;

use serde::Deserialize;

use crate::model::CatalogError;

/// A unit of supplementary content shown in the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DetailBlock {
    Text {
        #[serde(default)]
        content: String,
    },
    Code {
        #[serde(default)]
        language: String,
        #[serde(default)]
        content: String,
    },
    Gallery {
        #[serde(default)]
        urls: Vec<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    /// Any block type this build does not know how to render.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TopicDetail {
    #[serde(default)]
    blocks: Vec<DetailBlock>,
}

/// Detail blocks keyed by topic title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DetailIndex {
    entries: HashMap<String, TopicDetail>,
}

impl DetailIndex {
    /// Parse the detail index document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not an object of
    /// `{ "blocks": [...] }` entries.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Blocks for a title; empty when there is no entry.
    #[must_use]
    pub fn blocks(&self, title: &str) -> &[DetailBlock] {
        self.entries
            .get(title)
            .map(|detail| detail.blocks.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_details(&self, title: &str) -> bool {
        !self.blocks(title).is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
