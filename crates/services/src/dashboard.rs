use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracker_core::milestone::{CelebrationTier, NormalizedPoint};
use tracker_core::model::{DetailBlock, Mode, ProgressRecord};
use tracker_core::progress::CatalogProgress;

use crate::content::ContentStore;
use crate::error::ProgressError;
use crate::progress::ProgressService;

/// What the view knew about the click that asked for a toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickContext {
    /// The user is dragging out a text selection.
    pub selecting_text: bool,
    pub pointer: NormalizedPoint,
}

impl ClickContext {
    #[must_use]
    pub fn at(pointer: NormalizedPoint) -> Self {
        Self {
            selecting_text: false,
            pointer,
        }
    }

    #[must_use]
    pub fn selecting() -> Self {
        Self {
            selecting_text: true,
            pointer: NormalizedPoint::CENTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToggleOutcome {
    /// The click was part of a text selection; nothing changed.
    Ignored,
    Toggled {
        completed: bool,
        /// Present only when the topic became complete.
        celebration: Option<CelebrationTier>,
    },
}

/// Everything the renderer needs for one pass.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub mode: Mode,
    pub active_tab: usize,
    pub search: String,
    pub record: ProgressRecord,
    pub content: Arc<ContentStore>,
}

/// The application state for one session.
///
/// Owns the transient view state (search filter) and routes every gesture
/// through the progress store. The active section index lives in the
/// current mode's progress record.
pub struct DashboardService {
    content: Arc<ContentStore>,
    progress: Arc<ProgressService>,
    search: Mutex<String>,
}

impl DashboardService {
    #[must_use]
    pub fn new(content: Arc<ContentStore>, progress: Arc<ProgressService>) -> Self {
        Self {
            content,
            progress,
            search: Mutex::new(String::new()),
        }
    }

    fn search_guard(&self) -> MutexGuard<'_, String> {
        self.search.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentStore> {
        Arc::clone(&self.content)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.progress.mode()
    }

    #[must_use]
    pub fn search(&self) -> String {
        self.search_guard().clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let mode = self.progress.mode();
        let record = self.progress.record(mode);
        let active_tab = self.content.catalog(mode).clamp_tab(record.active_tab());
        DashboardSnapshot {
            mode,
            active_tab,
            search: self.search(),
            record,
            content: Arc::clone(&self.content),
        }
    }

    /// Switch to `mode`. Returns `false` when it was already active.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the preference cannot be stored.
    pub async fn switch_mode(&self, mode: Mode) -> Result<bool, ProgressError> {
        if self.progress.mode() == mode {
            return Ok(false);
        }
        self.progress.set_mode(mode).await?;
        self.search_guard().clear();
        tracing::info!(%mode, "switched mode");
        Ok(true)
    }

    /// Activate section `index` of the current mode and clear the search.
    /// Returns `false` for an index outside the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be stored.
    pub async fn switch_tab(&self, index: usize) -> Result<bool, ProgressError> {
        let mode = self.progress.mode();
        if index >= self.content.catalog(mode).len() {
            tracing::debug!(%mode, index, "ignoring tab outside catalog");
            return Ok(false);
        }
        self.search_guard().clear();
        self.progress.set_active_tab(mode, index).await?;
        Ok(true)
    }

    pub fn set_search(&self, filter: impl Into<String>) {
        *self.search_guard() = filter.into();
    }

    /// Flip completion for `title` in the current mode.
    ///
    /// Completing a topic selects a celebration tier from the post-toggle
    /// progress of the whole mode and of the active section.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the change cannot be stored; the topic
    /// keeps its previous state.
    pub async fn toggle_topic(
        &self,
        title: &str,
        click: ClickContext,
    ) -> Result<ToggleOutcome, ProgressError> {
        if click.selecting_text {
            tracing::debug!(title, "ignoring click during text selection");
            return Ok(ToggleOutcome::Ignored);
        }

        let mode = self.progress.mode();
        let completed = self.progress.toggle_completion(mode, title).await?;
        if !completed {
            return Ok(ToggleOutcome::Toggled {
                completed,
                celebration: None,
            });
        }

        let record = self.progress.record(mode);
        let catalog = self.content.catalog(mode);
        let progress = CatalogProgress::compute(catalog, &record);
        let section = progress.section(catalog.clamp_tab(record.active_tab()));
        let tier = CelebrationTier::select(progress.global.percent(), section, click.pointer);
        tracing::debug!(title, tier = tier.name(), "topic completed");

        Ok(ToggleOutcome::Toggled {
            completed,
            celebration: Some(tier),
        })
    }

    /// Detail blocks for `title`; empty when none are available.
    #[must_use]
    pub fn detail(&self, title: &str) -> Vec<DetailBlock> {
        self.content.detail_blocks(title).to_vec()
    }
}
