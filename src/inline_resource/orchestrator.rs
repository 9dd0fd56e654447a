//! Inlining pass orchestration
//!
//! One pass runs at bundle finalization:
//!
//! 1. Candidates are selected from the bundle in build order (plus remote
//!    references found in the document when `inlineRemote` is on).
//! 2. Each candidate is located, checked against attribute rules, resolved,
//!    transformed and embedded. The document is threaded through this fold as
//!    a single owned buffer, so every step sees all earlier replacements.
//! 3. The rewritten document is emitted once, replacing the original `.html`
//!    output. Any fatal error returns before this point and leaves the bundle
//!    untouched.

use std::sync::Arc;

use super::cache::RemoteCache;
use super::downloaders::{Fetcher, HttpFetcher};
use super::filters::FilterEngine;
use super::locator::{self, reference_key, value_matches_key};
use super::resolver::ContentResolver;
use super::rewriter;
use super::transform::{HtmlMinifier, Minifier, TransformAdapter};
use super::types::{InlineOutcome, InlineReport};
use crate::bundle::{Artifact, Bundle};
use crate::config::{InlineConfig, NonMatchedLevel};
use crate::error::{InlineError, InlineResult};

/// Inlines script and style outputs into a bundle's HTML document
#[derive(Debug, Clone)]
pub struct ResourceInliner {
    config: InlineConfig,
    filters: FilterEngine,
    resolver: ContentResolver,
    transform: TransformAdapter,
}

impl ResourceInliner {
    /// Inliner with the HTTP fetcher, a fresh cache and the minify-html minifier
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` if the config's rules do not compile.
    pub fn new(config: InlineConfig) -> InlineResult<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout(), config.max_remote_size());
        Self::with_parts(config, Arc::new(fetcher), RemoteCache::new(), Arc::new(HtmlMinifier))
    }

    /// Inliner with caller-supplied collaborators
    ///
    /// Pass the same `RemoteCache` to several inliners to share fetched content
    /// across passes.
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` if the config's rules do not compile.
    pub fn with_parts(
        config: InlineConfig,
        fetcher: Arc<dyn Fetcher>,
        cache: RemoteCache,
        minifier: Arc<dyn Minifier>,
    ) -> InlineResult<Self> {
        let filters = FilterEngine::from_config(&config)?;
        let resolver = ContentResolver::new(fetcher, cache, config.cache(), config.force_refresh());
        let transform = TransformAdapter::new(minifier, config.compress());

        Ok(Self {
            config,
            filters,
            resolver,
            transform,
        })
    }

    #[must_use]
    pub fn config(&self) -> &InlineConfig {
        &self.config
    }

    #[must_use]
    pub fn filters(&self) -> &FilterEngine {
        &self.filters
    }

    #[must_use]
    pub fn cache(&self) -> &RemoteCache {
        self.resolver.cache()
    }

    /// Run one inlining pass over `bundle`
    ///
    /// On success the bundle's `.html` output has been replaced with the
    /// rewritten document; every other output is untouched.
    ///
    /// # Errors
    ///
    /// `MissingDocument` without an `.html` output; `Transform` and `Rewrite`
    /// always; `UnmatchedReference`, `Fetch` and `Resolution` when `nonMatched`
    /// is `error`.
    pub async fn generate_bundle(&self, bundle: &mut Bundle) -> InlineResult<InlineReport> {
        let (document_name, document, report) = {
            let (document_name, original) = bundle.document()?;
            let document_name = document_name.to_string();

            let candidates = self.candidates(bundle, original)?;
            log::debug!(
                "Inlining into {document_name}: {} candidate(s) of {} output(s)",
                candidates.len(),
                bundle.len()
            );

            let mut report = InlineReport {
                document: document_name.clone(),
                ..InlineReport::default()
            };
            let mut document = original.to_string();
            for artifact in &candidates {
                document = self.inline_artifact(artifact, document, &mut report).await?;
            }

            (document_name, document, report)
        };

        bundle.emit_asset(&document_name, document);
        log::info!(
            "Emitted {document_name}: {} inlined, {} skipped, {} unmatched, {} failed",
            report.inlined.len(),
            report.skipped.len(),
            report.unmatched.len(),
            report.failed.len()
        );

        Ok(report)
    }

    /// Local candidates in build order, then remote references in document order
    fn candidates(&self, bundle: &Bundle, document: &str) -> InlineResult<Vec<Artifact>> {
        let mut candidates: Vec<Artifact> = bundle
            .iter()
            .filter(|artifact| self.filters.is_candidate(&artifact.name))
            .cloned()
            .collect();

        if self.config.inline_remote() {
            for (url, kind) in locator::remote_references(document)? {
                if bundle.contains(&url)
                    || self.is_bundle_output(bundle, &url)
                    || !self.filters.is_candidate(&url)
                {
                    continue;
                }
                candidates.push(Artifact::remote(url, kind));
            }
        }

        Ok(candidates)
    }

    /// True when `url` is how the document addresses one of the bundle's own
    /// outputs, e.g. when `base` is a CDN origin
    fn is_bundle_output(&self, bundle: &Bundle, url: &str) -> bool {
        let base = self.config.base();
        bundle
            .iter()
            .filter(|artifact| !artifact.is_document())
            .any(|artifact| value_matches_key(url, &reference_key(artifact, base)))
    }

    /// CANDIDATE -> LOCATED | NOT_FOUND -> SKIPPED | EMBEDDED, returning the next document
    async fn inline_artifact(
        &self,
        artifact: &Artifact,
        document: String,
        report: &mut InlineReport,
    ) -> InlineResult<String> {
        let key = reference_key(artifact, self.config.base());

        let Some(reference) = locator::locate(artifact, &key, &document)? else {
            let error = InlineError::UnmatchedReference {
                name: artifact.name.clone(),
                key,
                attribute: artifact.kind.reference_attribute(),
            };
            self.apply_policy(error, InlineOutcome::NotFound, report)?;
            return Ok(document);
        };
        log::debug!("Located {} at {}", artifact.name, reference.describe());

        if self.filters.is_excluded_by_attributes(&reference) {
            log::debug!(
                "Skipping {}: attributes [{}] match an exclusion rule",
                artifact.name,
                reference.attribute_text()
            );
            report.record(&artifact.name, InlineOutcome::Skipped);
            return Ok(document);
        }

        let content = match self.resolver.resolve(artifact).await {
            Ok(content) => content,
            Err(error) if error.is_policy_gated() => {
                self.apply_policy(error, InlineOutcome::Failed, report)?;
                return Ok(document);
            }
            Err(error) => return Err(error),
        };

        let content = self.transform.transform(&content, artifact.kind)?;
        let markup = rewriter::synthesize(&reference, &content);
        let document = rewriter::replace(&document, &reference, &markup)?;

        log::debug!(
            "Embedded {} as <{}> ({} bytes)",
            artifact.name,
            reference.tag_kind.as_str(),
            content.len()
        );
        report.record(&artifact.name, InlineOutcome::Embedded);
        Ok(document)
    }

    /// Abort, warn or stay quiet according to `nonMatched`
    fn apply_policy(
        &self,
        error: InlineError,
        outcome: InlineOutcome,
        report: &mut InlineReport,
    ) -> InlineResult<()> {
        match self.config.non_matched() {
            NonMatchedLevel::Error => Err(error),
            NonMatchedLevel::Warn => {
                log::warn!("{error}; leaving reference in place");
                if let Some(name) = error.artifact_name() {
                    report.record(name, outcome);
                }
                Ok(())
            }
            NonMatchedLevel::Silent => {
                if let Some(name) = error.artifact_name() {
                    report.record(name, outcome);
                }
                Ok(())
            }
        }
    }
}
