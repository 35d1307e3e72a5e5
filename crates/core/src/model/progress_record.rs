use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Persisted progress for one mode.
///
/// Completion entries are created lazily; an absent title counts as not
/// completed. Titles that no longer exist in the catalog are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    active_tab: usize,
    #[serde(default)]
    completed: BTreeMap<String, bool>,
}

impl ProgressRecord {
    /// Decode a persisted record.
    ///
    /// # Errors
    ///
    /// Returns the decoding error for corrupt input; callers decide whether
    /// to fall back to [`ProgressRecord::default`].
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Encode for persistence.
    ///
    /// # Errors
    ///
    /// Returns the encoding error (not expected for string keys).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, index: usize) {
        self.active_tab = index;
    }

    #[must_use]
    pub fn is_completed(&self, title: &str) -> bool {
        self.completed.get(title).copied().unwrap_or(false)
    }

    /// Flip the flag for `title` and return the new value.
    pub fn toggle(&mut self, title: &str) -> bool {
        let next = !self.is_completed(title);
        self.set_completed(title, next);
        next
    }

    /// Force the flag for `title`.
    pub fn set_completed(&mut self, title: &str, value: bool) {
        self.completed.insert(title.to_owned(), value);
    }
}
