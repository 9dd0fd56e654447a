//! Error types for resource inlining
//!
//! `InlineError` is the single error surfaced by an inlining pass. Fetch and
//! transform failures carry their own enums so callers can match on the
//! underlying cause.

use thiserror::Error;

use crate::bundle::ArtifactKind;

/// Result type alias for inlining operations
pub type InlineResult<T> = Result<T, InlineError>;

/// Error types for an inlining pass
#[derive(Debug, Error)]
pub enum InlineError {
    /// Invalid or missing include rule, bad regex, malformed config document
    #[error("Invalid inline-resource configuration: {0}")]
    Configuration(String),

    /// The bundle carries no `.html` output to rewrite
    #[error("No .html output found in bundle; nothing to inline into")]
    MissingDocument,

    /// A candidate artifact has no element referencing it
    #[error("No element references '{name}' via {attribute}=\"{key}\"")]
    UnmatchedReference {
        name: String,
        key: String,
        attribute: &'static str,
    },

    /// Remote content could not be fetched
    #[error("Failed to fetch content for '{name}': {source}")]
    Fetch {
        name: String,
        #[source]
        source: FetchError,
    },

    /// A local artifact has no usable content
    #[error("No content available for '{0}'")]
    Resolution(String),

    /// Minifier failure
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The tokenizer rejected the document
    #[error("HTML rewrite failed: {0}")]
    Rewrite(String),
}

impl From<lol_html::errors::RewritingError> for InlineError {
    fn from(error: lol_html::errors::RewritingError) -> Self {
        InlineError::Rewrite(error.to_string())
    }
}

impl InlineError {
    /// Errors whose handling follows the configured `nonMatched` level.
    ///
    /// Everything else aborts the pass unconditionally.
    #[must_use]
    pub fn is_policy_gated(&self) -> bool {
        matches!(
            self,
            InlineError::UnmatchedReference { .. }
                | InlineError::Fetch { .. }
                | InlineError::Resolution(_)
        )
    }

    /// Errors that abort the pass whatever `nonMatched` says
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !self.is_policy_gated()
    }

    /// Name of the artifact the error is about, when there is one
    #[must_use]
    pub fn artifact_name(&self) -> Option<&str> {
        match self {
            InlineError::UnmatchedReference { name, .. } | InlineError::Fetch { name, .. } => {
                Some(name)
            }
            InlineError::Resolution(name) => Some(name),
            _ => None,
        }
    }
}

/// Error type for remote fetch failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),

    #[error("Request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Anything other than 200 or 204
    #[error("HTTP error {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("Response from {url} too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        url: String,
        size: u64,
        limit: usize,
    },

    #[error("Response from {url} is not valid UTF-8")]
    InvalidUtf8 { url: String },
}

impl FetchError {
    /// Returns true if the server answered but with a rejected status
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// Error type for minifier failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("Minified {kind} output is not valid UTF-8")]
    InvalidUtf8 { kind: ArtifactKind },

    #[error("Minifier dropped the <{tag}> wrapper around {kind} content")]
    MissingWrapper {
        kind: ArtifactKind,
        tag: &'static str,
    },

    #[error("Minification failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_gated_classification() {
        let unmatched = InlineError::UnmatchedReference {
            name: "app.js".to_string(),
            key: "app.js".to_string(),
            attribute: "src",
        };
        assert!(unmatched.is_policy_gated());
        assert_eq!(unmatched.artifact_name(), Some("app.js"));

        let transform = InlineError::Transform(TransformError::Failed("boom".to_string()));
        assert!(!transform.is_policy_gated());
        assert!(transform.is_fatal());
        assert!(!InlineError::MissingDocument.is_policy_gated());
        assert!(!InlineError::Configuration("x".to_string()).is_policy_gated());
    }

    #[test]
    fn test_fetch_error_display() {
        let err = InlineError::Fetch {
            name: "https://cdn.example.com/lib.js".to_string(),
            source: FetchError::Status {
                url: "https://cdn.example.com/lib.js".to_string(),
                status: 404,
            },
        };
        let message = err.to_string();
        assert!(message.contains("lib.js"));
        assert!(message.contains("404"));
    }
}
