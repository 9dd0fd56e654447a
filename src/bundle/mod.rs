//! Build-output data model shared with the host bundler
//!
//! A `Bundle` is the ordered set of named outputs produced by one build. The
//! inliner reads script/style outputs from it and writes back exactly one
//! rewritten `.html` output at the end of a pass.

use indexmap::IndexMap;
use std::path::Path;

use crate::error::{InlineError, InlineResult};

/// Kind of a build output, decided from its name for local outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Script,
    Style,
    Asset,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Script => write!(f, "script"),
            ArtifactKind::Style => write!(f, "style"),
            ArtifactKind::Asset => write!(f, "asset"),
        }
    }
}

impl ArtifactKind {
    /// Infer the kind from an output name or URL
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match extension_of(name).as_deref() {
            Some("js" | "mjs" | "cjs") => ArtifactKind::Script,
            Some("css") => ArtifactKind::Style,
            _ => ArtifactKind::Asset,
        }
    }

    /// Attribute an element uses to point at an artifact of this kind
    #[must_use]
    pub fn reference_attribute(self) -> &'static str {
        match self {
            ArtifactKind::Style => "href",
            ArtifactKind::Script | ArtifactKind::Asset => "src",
        }
    }
}

/// Where an artifact's content lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Produced by this build; content is in memory
    Local,
    /// Referenced by URL from outside the build; content must be fetched
    Remote,
}

/// Content attached to a local output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContent {
    /// Compiled chunk code
    Code(String),
    /// Raw asset source
    Source(Vec<u8>),
}

impl ArtifactContent {
    /// Borrow the content as text, if it is valid UTF-8
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArtifactContent::Code(code) => Some(code),
            ArtifactContent::Source(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }
}

/// A named build output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub kind: ArtifactKind,
    pub content: Option<ArtifactContent>,
    pub origin: Origin,
}

impl Artifact {
    /// A compiled chunk, e.g. `app.js`
    pub fn chunk(name: impl Into<String>, code: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: ArtifactKind::from_name(&name),
            name,
            content: Some(ArtifactContent::Code(code.into())),
            origin: Origin::Local,
        }
    }

    /// An emitted asset, e.g. `app.css` or `index.html`
    pub fn asset(name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        Self {
            kind: ArtifactKind::from_name(&name),
            name,
            content: Some(ArtifactContent::Source(source.into())),
            origin: Origin::Local,
        }
    }

    /// A resource living at `url`, outside the build
    pub fn remote(url: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            name: url.into(),
            kind,
            content: None,
            origin: Origin::Remote,
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.origin == Origin::Remote
    }

    /// True for the `.html` output the pass rewrites
    #[must_use]
    pub fn is_document(&self) -> bool {
        is_document_name(&self.name)
    }
}

/// Ordered map of output name to artifact, in the order the build produced them
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    outputs: IndexMap<String, Artifact>,
}

impl Bundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an output. Replacing keeps the original position.
    pub fn insert(&mut self, artifact: Artifact) {
        self.outputs.insert(artifact.name.clone(), artifact);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.outputs.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.outputs.contains_key(name)
    }

    /// Outputs in build order
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.outputs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// The first `.html` output and its text
    ///
    /// # Errors
    ///
    /// `MissingDocument` if no output ends in `.html`, `Resolution` if its
    /// content is absent or not UTF-8.
    pub fn document(&self) -> InlineResult<(&str, &str)> {
        let artifact = self
            .outputs
            .values()
            .find(|artifact| artifact.is_document())
            .ok_or(InlineError::MissingDocument)?;

        let text = artifact
            .content
            .as_ref()
            .and_then(ArtifactContent::as_text)
            .ok_or_else(|| InlineError::Resolution(artifact.name.clone()))?;

        Ok((&artifact.name, text))
    }

    /// Register `source` as the asset named `name`, replacing any previous output
    pub fn emit_asset(&mut self, name: &str, source: String) {
        self.insert(Artifact::asset(name, source.into_bytes()));
    }
}

impl FromIterator<Artifact> for Bundle {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        let mut bundle = Bundle::new();
        for artifact in iter {
            bundle.insert(artifact);
        }
        bundle
    }
}

/// Lower-cased extension without the leading dot, ignoring any query or fragment
#[must_use]
pub fn extension_of(name: &str) -> Option<String> {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

#[must_use]
pub fn is_document_name(name: &str) -> bool {
    extension_of(name).as_deref() == Some("html")
}
