pub mod bundle;
pub mod config;
pub mod error;
pub mod inline_resource;
pub mod utils;

pub use bundle::{Artifact, ArtifactContent, ArtifactKind, Bundle, Origin};
pub use config::{ExcludeAttr, IncludeRule, InlineConfig, NonMatchedLevel};
pub use error::{FetchError, InlineError, InlineResult, TransformError};
pub use inline_resource::{
    Fetcher, HttpFetcher, InlineOutcome, InlineReport, Minifier, RemoteCache, ResourceInliner,
};

/// Run one inlining pass over `bundle` with `config` and the default collaborators
///
/// Convenience for callers that do not share a cache between passes.
pub async fn inline_bundle(config: InlineConfig, bundle: &mut Bundle) -> InlineResult<InlineReport> {
    let inliner = ResourceInliner::new(config)?;
    inliner.generate_bundle(bundle).await
}
