use std::sync::Arc;

use services::DashboardService;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    /// The loaded dashboard, or `None` when startup content failed to load.
    fn dashboard(&self) -> Option<Arc<DashboardService>>;

    /// Human-readable reason the content could not be loaded.
    fn load_error(&self) -> Option<String>;
}

#[derive(Clone)]
pub struct AppContext {
    dashboard: Option<Arc<DashboardService>>,
    load_error: Option<String>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            dashboard: app.dashboard(),
            load_error: app.load_error(),
        }
    }

    #[must_use]
    pub fn dashboard(&self) -> Option<Arc<DashboardService>> {
        self.dashboard.clone()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<String> {
        self.load_error.clone()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
