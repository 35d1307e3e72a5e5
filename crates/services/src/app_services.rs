use std::sync::Arc;

use storage::repository::{KeyValueRepository, Storage};

use crate::content::{ContentSource, ContentStore};
use crate::dashboard::DashboardService;
use crate::error::AppServicesError;
use crate::progress::ProgressService;

/// Assembles app-facing services once content and storage are available.
#[derive(Clone)]
pub struct AppServices {
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Open `SQLite` storage and load content concurrently, then build the
    /// dashboard.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage cannot be opened or any content
    /// document fails to load.
    pub async fn new_sqlite(db_url: &str, source: &ContentSource) -> Result<Self, AppServicesError> {
        let (storage, content) = tokio::try_join!(
            async { Storage::sqlite(db_url).await.map_err(AppServicesError::from) },
            async { ContentStore::load(source).await.map_err(AppServicesError::from) },
        )?;
        Ok(Self::assemble(content, storage.kv).await)
    }

    /// Build services from loaded content and any key-value backend.
    pub async fn assemble(content: ContentStore, kv: Arc<dyn KeyValueRepository>) -> Self {
        let progress = Arc::new(ProgressService::load(kv).await);
        let dashboard = Arc::new(DashboardService::new(Arc::new(content), progress));
        Self { dashboard }
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}
