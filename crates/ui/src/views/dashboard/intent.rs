use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use services::{CelebrationPlan, ClickContext, DashboardService, ToggleOutcome};
use tracker_core::model::Mode;

use crate::vm::build_detail_vm;

use super::confetti::{CelebrationSlot, celebrate};
use super::scripts::{copy_to_clipboard, probe_pointer};
use super::state::DashboardSignals;

/// Fade applied to the dashboard while the mode changes.
const MODE_FADE: Duration = Duration::from_millis(250);
const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DashboardIntent {
    SwitchMode(Mode),
    SwitchTab(usize),
    Search(String),
    ToggleTopic { title: String, click: ClickContext },
    OpenDetail(String),
    CloseDetail,
    CopyCode { dom_id: String, raw: String },
    ToggleTheme,
    ToggleSidebar,
    DismissError,
}

/// Close the sidebar when the viewport is phone or tablet sized.
pub(super) async fn collapse_sidebar_if_narrow(signals: DashboardSignals) {
    if probe_pointer().await.is_narrow() {
        let mut sidebar_open = signals.sidebar_open;
        sidebar_open.set(false);
    }
}

pub(super) fn use_dashboard_dispatcher(
    service: Arc<DashboardService>,
    signals: DashboardSignals,
    slot: CelebrationSlot,
) -> Callback<DashboardIntent> {
    use_callback(move |intent: DashboardIntent| {
        tracing::debug!(?intent, "dashboard intent");
        let service = Arc::clone(&service);
        match intent {
            DashboardIntent::SwitchMode(mode) => {
                if service.mode() == mode {
                    return;
                }
                let slot = slot.clone();
                spawn(async move {
                    let mut fading = signals.fading;
                    let mut detail = signals.detail;
                    fading.set(true);
                    detail.set(None);
                    // The old mode stays on screen until the fade completes.
                    tokio::time::sleep(MODE_FADE).await;
                    let switched = service.switch_mode(mode).await;
                    fading.set(false);
                    match switched {
                        Ok(true) => {
                            signals.refresh();
                            celebrate(CelebrationPlan::mode_switch(mode), slot, signals.particles)
                                .await;
                        }
                        Ok(false) => {}
                        Err(err) => signals.fail(&err),
                    }
                });
            }
            DashboardIntent::SwitchTab(index) => {
                spawn(async move {
                    match service.switch_tab(index).await {
                        Ok(true) => {
                            signals.refresh();
                            collapse_sidebar_if_narrow(signals).await;
                        }
                        Ok(false) => {}
                        Err(err) => signals.fail(&err),
                    }
                });
            }
            DashboardIntent::Search(filter) => {
                service.set_search(filter);
                signals.refresh();
            }
            DashboardIntent::ToggleTopic { title, click } => {
                let slot = slot.clone();
                spawn(async move {
                    match service.toggle_topic(&title, click).await {
                        Ok(ToggleOutcome::Ignored) => {}
                        Ok(ToggleOutcome::Toggled { celebration, .. }) => {
                            signals.refresh();
                            if let Some(tier) = celebration {
                                let plan = CelebrationPlan::for_tier(tier, service.mode());
                                celebrate(plan, slot, signals.particles).await;
                            }
                        }
                        Err(err) => signals.fail(&err),
                    }
                });
            }
            DashboardIntent::OpenDetail(title) => {
                let mut detail = signals.detail;
                detail.set(Some(build_detail_vm(&title, &service.detail(&title))));
            }
            DashboardIntent::CloseDetail => {
                let mut detail = signals.detail;
                let mut copied = signals.copied;
                detail.set(None);
                copied.set(None);
            }
            DashboardIntent::CopyCode { dom_id, raw } => {
                spawn(async move {
                    let mut copied = signals.copied;
                    if !copy_to_clipboard(&raw).await {
                        tracing::warn!(dom_id = %dom_id, "clipboard write failed");
                        return;
                    }
                    copied.set(Some(dom_id.clone()));
                    tokio::time::sleep(COPIED_FEEDBACK).await;
                    if copied.peek().as_deref() == Some(dom_id.as_str()) {
                        copied.set(None);
                    }
                });
            }
            DashboardIntent::ToggleTheme => {
                let mut dark_theme = signals.dark_theme;
                let next = !*dark_theme.peek();
                dark_theme.set(next);
            }
            DashboardIntent::ToggleSidebar => {
                let mut sidebar_open = signals.sidebar_open;
                let next = !*sidebar_open.peek();
                sidebar_open.set(next);
            }
            DashboardIntent::DismissError => {
                let mut error = signals.error;
                error.set(None);
            }
        }
    })
}
