//! Type definitions for resource inlining

use crate::utils::BOOLEAN_ATTRIBUTES;

/// One attribute of a located element, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Empty boolean attributes (`defer`, `async`) render bare; `alt=""` keeps its quotes
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.value.is_empty()
            && BOOLEAN_ATTRIBUTES
                .iter()
                .any(|name| self.name.eq_ignore_ascii_case(name))
    }

    /// Serialized `key="value"` fragment, or the bare name
    #[must_use]
    pub fn to_fragment(&self) -> String {
        if self.is_bare() {
            self.name.clone()
        } else if self.value.contains('"') {
            format!("{}='{}'", self.name, self.value)
        } else {
            format!("{}=\"{}\"", self.name, self.value)
        }
    }
}

/// Element name used for the embedded replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Script,
    /// `<link>` references become `<style>` blocks
    Style,
    /// Any other element keeps its own name
    Other(String),
}

impl TagKind {
    /// Map a matched element name to the element that will carry its content
    #[must_use]
    pub fn for_matched_tag(tag_name: &str) -> Self {
        match tag_name.to_ascii_lowercase().as_str() {
            "script" => TagKind::Script,
            "link" | "style" => TagKind::Style,
            other => TagKind::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TagKind::Script => "script",
            TagKind::Style => "style",
            TagKind::Other(name) => name,
        }
    }
}

/// The element in the document that points at an artifact
///
/// Derived fresh for every artifact; a replacement invalidates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub artifact_name: String,
    /// `src` or `href`
    pub reference_attribute: &'static str,
    /// Exact attribute value that matched
    pub reference_value: String,
    /// Name of the matched element (`script`, `link`, ...)
    pub matched_tag: String,
    pub tag_kind: TagKind,
    /// Attributes other than `src`/`href`, in source order
    pub attributes: Vec<Attribute>,
}

impl Reference {
    /// Opening tag rebuilt from the located attributes, for diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        let attributes = self.attribute_text();
        if attributes.is_empty() {
            format!(
                "<{} {}=\"{}\">",
                self.matched_tag, self.reference_attribute, self.reference_value
            )
        } else {
            format!(
                "<{} {}=\"{}\" {attributes}>",
                self.matched_tag, self.reference_attribute, self.reference_value
            )
        }
    }

    /// Non-reference attributes joined the way they appear in markup
    #[must_use]
    pub fn attribute_text(&self) -> String {
        self.attributes
            .iter()
            .map(Attribute::to_fragment)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Terminal state of one candidate within a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineOutcome {
    /// Replaced by an inline element
    Embedded,
    /// Located but vetoed by an attribute rule
    Skipped,
    /// No referencing element
    NotFound,
    /// Located, but content could not be obtained
    Failed,
}

impl std::fmt::Display for InlineOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InlineOutcome::Embedded => write!(f, "embedded"),
            InlineOutcome::Skipped => write!(f, "skipped"),
            InlineOutcome::NotFound => write!(f, "not found"),
            InlineOutcome::Failed => write!(f, "failed"),
        }
    }
}

/// Per-artifact outcomes of a pass, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineReport {
    pub document: String,
    pub inlined: Vec<String>,
    pub skipped: Vec<String>,
    pub unmatched: Vec<String>,
    pub failed: Vec<String>,
}

impl InlineReport {
    pub(crate) fn record(&mut self, name: &str, outcome: InlineOutcome) {
        let bucket = match outcome {
            InlineOutcome::Embedded => &mut self.inlined,
            InlineOutcome::Skipped => &mut self.skipped,
            InlineOutcome::NotFound => &mut self.unmatched,
            InlineOutcome::Failed => &mut self.failed,
        };
        bucket.push(name.to_string());
    }

    /// Total number of candidates processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.inlined.len() + self.skipped.len() + self.unmatched.len() + self.failed.len()
    }

    /// Check if any candidate could not be inlined for lack of a reference or content
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.unmatched.is_empty() || !self.failed.is_empty()
    }

    #[must_use]
    pub fn outcome_of(&self, name: &str) -> Option<InlineOutcome> {
        let contains = |bucket: &Vec<String>| bucket.iter().any(|n| n == name);
        if contains(&self.inlined) {
            Some(InlineOutcome::Embedded)
        } else if contains(&self.skipped) {
            Some(InlineOutcome::Skipped)
        } else if contains(&self.unmatched) {
            Some(InlineOutcome::NotFound)
        } else if contains(&self.failed) {
            Some(InlineOutcome::Failed)
        } else {
            None
        }
    }
}
