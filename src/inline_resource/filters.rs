//! Candidate selection and attribute vetoes
//!
//! Rules are compiled once from `InlineConfig`; matching never compiles a
//! regex.

use regex::Regex;
use std::collections::HashSet;

use super::types::Reference;
use crate::bundle::{extension_of, is_document_name};
use crate::config::{ExcludeAttr, IncludeRule, InlineConfig};
use crate::error::{InlineError, InlineResult};

#[derive(Debug, Clone)]
enum CompiledInclude {
    Extensions(HashSet<String>),
    Pattern(Regex),
}

/// Compiled include/exclude/attribute rules for one pass
#[derive(Debug, Clone)]
pub struct FilterEngine {
    include: CompiledInclude,
    exclude: Option<Regex>,
    exclude_attrs: Vec<ExcludeAttr>,
}

fn compile_pattern(field: &str, pattern: &str) -> InlineResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| InlineError::Configuration(format!("invalid {field} pattern '{pattern}': {e}")))
}

impl FilterEngine {
    /// Compile the rules in `config`
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` when the include rule names no extension or
    /// a pattern does not compile.
    pub fn from_config(config: &InlineConfig) -> InlineResult<Self> {
        let include = match config.includes() {
            IncludeRule::Extensions(extensions) => {
                let set: HashSet<String> = extensions
                    .iter()
                    .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect();
                if set.is_empty() {
                    return Err(InlineError::Configuration(
                        "includes must name at least one extension or be a pattern".to_string(),
                    ));
                }
                CompiledInclude::Extensions(set)
            }
            IncludeRule::Pattern(pattern) => {
                CompiledInclude::Pattern(compile_pattern("includes", pattern)?)
            }
        };

        let exclude = config
            .excludes()
            .map(|pattern| compile_pattern("excludes", pattern))
            .transpose()?;

        Ok(Self {
            include,
            exclude,
            exclude_attrs: config.exclude_attrs().to_vec(),
        })
    }

    /// Included, not excluded, and not the HTML document itself
    #[must_use]
    pub fn is_candidate(&self, artifact_name: &str) -> bool {
        if is_document_name(artifact_name) {
            return false;
        }

        let included = match &self.include {
            CompiledInclude::Extensions(set) => {
                extension_of(artifact_name).is_some_and(|ext| set.contains(&ext))
            }
            CompiledInclude::Pattern(regex) => regex.is_match(artifact_name),
        };

        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|regex| regex.is_match(artifact_name));

        included && !excluded
    }

    /// True when any attribute rule vetoes inlining this reference
    ///
    /// Token rules match anywhere in the pass-through attribute text. Pair
    /// rules need an attribute with exactly that name and value, and may also
    /// name the reference itself (`src`/`href`).
    #[must_use]
    pub fn is_excluded_by_attributes(&self, reference: &Reference) -> bool {
        if self.exclude_attrs.is_empty() {
            return false;
        }

        let attribute_text = reference.attribute_text();
        self.exclude_attrs.iter().any(|rule| match rule {
            ExcludeAttr::Token(token) => !token.is_empty() && attribute_text.contains(token.as_str()),
            ExcludeAttr::Pair { key, value } => {
                (reference.reference_attribute.eq_ignore_ascii_case(key)
                    && reference.reference_value == *value)
                    || reference
                        .attributes
                        .iter()
                        .any(|attr| attr.name.eq_ignore_ascii_case(key) && attr.value == *value)
            }
        })
    }
}
