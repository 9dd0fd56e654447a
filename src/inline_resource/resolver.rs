//! Content resolution for candidate artifacts
//!
//! Local outputs are read straight from the bundle. Remote artifacts are
//! fetched through the configured `Fetcher`, with results kept in the
//! `RemoteCache` when caching is on.

use std::sync::Arc;

use super::cache::RemoteCache;
use super::downloaders::Fetcher;
use crate::bundle::{Artifact, ArtifactContent};
use crate::error::{FetchError, InlineError, InlineResult};
use crate::utils::to_fetchable_url;

#[derive(Clone)]
pub struct ContentResolver {
    fetcher: Arc<dyn Fetcher>,
    cache: RemoteCache,
    use_cache: bool,
    force_refresh: bool,
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver")
            .field("cache_entries", &self.cache.len())
            .field("use_cache", &self.use_cache)
            .field("force_refresh", &self.force_refresh)
            .finish_non_exhaustive()
    }
}

impl ContentResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: RemoteCache, use_cache: bool, force_refresh: bool) -> Self {
        Self {
            fetcher,
            cache,
            use_cache,
            force_refresh,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &RemoteCache {
        &self.cache
    }

    /// Text to embed for `artifact`
    ///
    /// # Errors
    ///
    /// `Resolution` when a local artifact has no UTF-8 content, `Fetch` when a
    /// remote one cannot be downloaded.
    pub async fn resolve(&self, artifact: &Artifact) -> InlineResult<Arc<str>> {
        if artifact.is_remote() {
            return self
                .resolve_remote(&artifact.name)
                .await
                .map_err(|source| InlineError::Fetch {
                    name: artifact.name.clone(),
                    source,
                });
        }

        // Chunks carry code, assets carry source; either way it must be text
        artifact
            .content
            .as_ref()
            .and_then(ArtifactContent::as_text)
            .map(Arc::from)
            .ok_or_else(|| InlineError::Resolution(artifact.name.clone()))
    }

    async fn resolve_remote(&self, reference: &str) -> Result<Arc<str>, FetchError> {
        let url = to_fetchable_url(reference)?;

        if self.use_cache
            && !self.force_refresh
            && let Some(content) = self.cache.get(&url)
        {
            log::debug!("Using cached content for {url}");
            return Ok(content);
        }

        let bytes = self.fetcher.fetch(&url).await?;
        let text = String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8 { url: url.clone() })?;
        let content: Arc<str> = Arc::from(text);

        if self.use_cache {
            self.cache.insert(&url, Arc::clone(&content));
        }

        log::info!("Fetched remote resource {url} ({} bytes)", content.len());
        Ok(content)
    }
}
