use dioxus::prelude::*;
use services::ProgressError;

use crate::views::ViewError;
use crate::vm::{DetailVm, ParticleVm};

/// View-local state for one dashboard instance. Domain state lives in
/// `DashboardService`; `revision` is bumped whenever it changes.
#[derive(Clone, Copy)]
pub(crate) struct DashboardSignals {
    pub revision: Signal<u64>,
    pub dark_theme: Signal<bool>,
    pub sidebar_open: Signal<bool>,
    pub fading: Signal<bool>,
    pub detail: Signal<Option<DetailVm>>,
    pub copied: Signal<Option<String>>,
    pub error: Signal<Option<ViewError>>,
    pub particles: Signal<Vec<ParticleVm>>,
}

impl DashboardSignals {
    /// Ask for a re-render from the service's current state.
    pub fn refresh(self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    pub fn fail(self, err: &ProgressError) {
        tracing::warn!(error = %err, "change was not saved");
        let mut error = self.error;
        error.set(Some(ViewError::SaveFailed));
        self.refresh();
    }
}

pub(crate) fn use_dashboard_signals() -> DashboardSignals {
    DashboardSignals {
        revision: use_signal(|| 0),
        dark_theme: use_signal(|| false),
        sidebar_open: use_signal(|| true),
        fading: use_signal(|| false),
        detail: use_signal(|| None),
        copied: use_signal(|| None),
        error: use_signal(|| None),
        particles: use_signal(Vec::new),
    }
}
