//! Resource inlining functionality
//!
//! This module replaces `<script src>` / `<link href>` references in a bundle's
//! HTML document with inline `<script>` / `<style>` elements carrying the
//! referenced output's content, optionally minified.

// Sub-modules
pub mod attributes;
pub mod cache;
pub mod downloaders;
pub mod filters;
pub mod locator;
pub mod orchestrator;
pub mod resolver;
pub mod rewriter;
pub mod transform;
pub mod types;

// Re-exports for public API
pub use cache::RemoteCache;
pub use downloaders::{Fetcher, HttpFetcher};
pub use filters::FilterEngine;
pub use orchestrator::ResourceInliner;
pub use resolver::ContentResolver;
pub use transform::{HtmlMinifier, Minifier, TransformAdapter};
pub use types::{Attribute, InlineOutcome, InlineReport, Reference, TagKind};
