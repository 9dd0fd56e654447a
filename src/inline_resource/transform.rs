//! Optional minification of resolved content
//!
//! The `Minifier` trait is the seam for the external minifier. `HtmlMinifier`
//! runs content through minify-html: comments stripped, whitespace collapsed,
//! embedded JS/CSS minified. Script and style bodies are minified inside their
//! embedding element so minify-html applies its JS/CSS passes, then unwrapped.

use minify_html::Cfg;
use std::sync::Arc;

use crate::bundle::ArtifactKind;
use crate::error::TransformError;

/// Markup-in, markup-out minifier
pub trait Minifier: Send + Sync {
    fn minify(&self, content: &str, kind: ArtifactKind) -> Result<String, TransformError>;
}

/// minify-html backed minifier
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMinifier;

impl HtmlMinifier {
    fn cfg() -> Cfg {
        Cfg {
            minify_css: true,
            minify_js: true,
            keep_closing_tags: true,
            keep_comments: false,
            ..Cfg::default()
        }
    }
}

fn wrapper_tag(kind: ArtifactKind) -> Option<&'static str> {
    match kind {
        ArtifactKind::Script => Some("script"),
        ArtifactKind::Style => Some("style"),
        ArtifactKind::Asset => None,
    }
}

impl Minifier for HtmlMinifier {
    fn minify(&self, content: &str, kind: ArtifactKind) -> Result<String, TransformError> {
        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let Some(tag) = wrapper_tag(kind) else {
            let minified = minify_html::minify(content.as_bytes(), &Self::cfg());
            return String::from_utf8(minified).map_err(|_| TransformError::InvalidUtf8 { kind });
        };

        let wrapped = format!("<{tag}>{content}</{tag}>");
        let minified = minify_html::minify(wrapped.as_bytes(), &Self::cfg());
        let minified = String::from_utf8(minified).map_err(|_| TransformError::InvalidUtf8 { kind })?;

        unwrap_element(&minified, tag)
            .map(str::to_string)
            .ok_or(TransformError::MissingWrapper { kind, tag })
    }
}

/// Inner content of `<tag ...>inner</tag>`
fn unwrap_element<'a>(markup: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let trimmed = markup.trim();
    if !trimmed.starts_with(&open) || !trimmed.ends_with(&close) {
        return None;
    }
    let start = trimmed.find('>')? + 1;
    let end = trimmed.len() - close.len();
    (start <= end).then(|| &trimmed[start..end])
}

/// Applies the minifier when compression is enabled, passes content through otherwise
#[derive(Clone)]
pub struct TransformAdapter {
    minifier: Arc<dyn Minifier>,
    enabled: bool,
}

impl std::fmt::Debug for TransformAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformAdapter")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl TransformAdapter {
    pub fn new(minifier: Arc<dyn Minifier>, enabled: bool) -> Self {
        Self { minifier, enabled }
    }

    /// # Errors
    ///
    /// Propagates minifier failures; they abort the pass.
    pub fn transform(&self, content: &str, kind: ArtifactKind) -> Result<String, TransformError> {
        if !self.enabled {
            return Ok(content.to_string());
        }
        self.minifier.minify(content, kind)
    }
}
