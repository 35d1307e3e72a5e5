//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use tracker_core::model::CatalogError;

/// A startup document could not be fetched or parsed.
///
/// Fatal: the dashboard is never shown with partial content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {document}: {source}")]
    Read {
        document: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {document}: {source}")]
    Fetch {
        document: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching {document} returned status {status}")]
    HttpStatus {
        document: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{document} is malformed: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: CatalogError,
    },
    #[error("invalid content location: {0}")]
    InvalidSource(String),
}

impl LoadError {
    /// Name of the document that failed, when there is one.
    #[must_use]
    pub fn document(&self) -> Option<&'static str> {
        match self {
            LoadError::Read { document, .. }
            | LoadError::Fetch { document, .. }
            | LoadError::HttpStatus { document, .. }
            | LoadError::Parse { document, .. } => Some(document),
            LoadError::InvalidSource(_) => None,
        }
    }
}

/// Errors emitted by `ProgressService` when a change cannot be made durable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode progress record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
