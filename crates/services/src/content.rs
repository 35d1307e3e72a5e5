use std::path::PathBuf;

use reqwest::Url;
use tracker_core::model::{Catalog, DetailBlock, DetailIndex, Mode};

use crate::error::LoadError;

pub const DETAILS_DOCUMENT: &str = "details.json";

/// Where the three startup documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Directory(PathBuf),
    Remote(Url),
}

impl ContentSource {
    /// Interpret `raw` as an HTTP(S) base URL or a directory path.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidSource` for an empty value or an
    /// unparsable URL.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LoadError::InvalidSource("empty location".into()));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            // Without a trailing slash `join` would replace the last segment.
            let base = if trimmed.ends_with('/') {
                trimmed.to_owned()
            } else {
                format!("{trimmed}/")
            };
            let url = Url::parse(&base).map_err(|err| LoadError::InvalidSource(err.to_string()))?;
            return Ok(Self::Remote(url));
        }
        Ok(Self::Directory(PathBuf::from(trimmed)))
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        document: &'static str,
    ) -> Result<String, LoadError> {
        match self {
            ContentSource::Directory(dir) => tokio::fs::read_to_string(dir.join(document))
                .await
                .map_err(|source| LoadError::Read { document, source }),
            ContentSource::Remote(base) => {
                let url = base
                    .join(document)
                    .map_err(|err| LoadError::InvalidSource(err.to_string()))?;
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|source| LoadError::Fetch { document, source })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::HttpStatus { document, status });
                }
                response
                    .text()
                    .await
                    .map_err(|source| LoadError::Fetch { document, source })
            }
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Directory(dir) => write!(f, "{}", dir.display()),
            ContentSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Both catalogs and the detail index. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStore {
    lld: Catalog,
    hld: Catalog,
    details: DetailIndex,
}

impl ContentStore {
    #[must_use]
    pub fn new(lld: Catalog, hld: Catalog, details: DetailIndex) -> Self {
        Self { lld, hld, details }
    }

    /// Fetch all three documents concurrently and parse them.
    ///
    /// # Errors
    ///
    /// Returns the first `LoadError`; nothing is returned unless every
    /// document loads.
    pub async fn load(source: &ContentSource) -> Result<Self, LoadError> {
        let client = reqwest::Client::new();
        let (lld, hld, details) = tokio::try_join!(
            source.fetch(&client, Mode::Lld.catalog_document()),
            source.fetch(&client, Mode::Hld.catalog_document()),
            source.fetch(&client, DETAILS_DOCUMENT),
        )?;
        let store = Self::from_documents(&lld, &hld, &details)?;
        tracing::info!(
            %source,
            lld_sections = store.lld.len(),
            hld_sections = store.hld.len(),
            details = store.details.len(),
            "content loaded"
        );
        Ok(store)
    }

    /// Parse already-fetched documents.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Parse` naming the malformed document.
    pub fn from_documents(lld: &str, hld: &str, details: &str) -> Result<Self, LoadError> {
        let parse_catalog = |mode: Mode, raw: &str| {
            Catalog::from_json(raw).map_err(|source| LoadError::Parse {
                document: mode.catalog_document(),
                source,
            })
        };
        Ok(Self {
            lld: parse_catalog(Mode::Lld, lld)?,
            hld: parse_catalog(Mode::Hld, hld)?,
            details: DetailIndex::from_json(details).map_err(|source| LoadError::Parse {
                document: DETAILS_DOCUMENT,
                source,
            })?,
        })
    }

    #[must_use]
    pub fn catalog(&self, mode: Mode) -> &Catalog {
        match mode {
            Mode::Lld => &self.lld,
            Mode::Hld => &self.hld,
        }
    }

    #[must_use]
    pub fn details(&self) -> &DetailIndex {
        &self.details
    }

    #[must_use]
    pub fn detail_blocks(&self, title: &str) -> &[DetailBlock] {
        self.details.blocks(title)
    }
}
