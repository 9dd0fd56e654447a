//! Core configuration types for resource inlining
//!
//! `InlineConfig` is the immutable rule set for one pass. It deserializes from
//! the plugin-options shape used by bundler configs (camelCase keys, polymorphic
//! `includes`, numeric or named `nonMatched`).

use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_EXCLUDE_ATTR_PAIRS, DEFAULT_EXCLUDE_ATTR_TOKENS, DEFAULT_EXCLUDE_PATTERN,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_INCLUDE_PATTERN, DEFAULT_MAX_REMOTE_SIZE,
};

/// Which outputs are candidates for inlining
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludeRule {
    /// Extension set, compared without the leading dot (`["js", "css"]`)
    Extensions(Vec<String>),
    /// Regex tested against the full output name
    Pattern(String),
}

impl Default for IncludeRule {
    fn default() -> Self {
        IncludeRule::Pattern(DEFAULT_INCLUDE_PATTERN.to_string())
    }
}

/// Attribute rule that keeps a reference external
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcludeAttr {
    /// Matches when the token appears anywhere in the element's attribute text
    Token(String),
    /// Matches an attribute `key="value"`
    Pair { key: String, value: String },
}

impl ExcludeAttr {
    pub fn token(token: impl Into<String>) -> Self {
        ExcludeAttr::Token(token.into())
    }

    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        ExcludeAttr::Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    /// `async`, `defer`, `type="module"`, `rel="modulepreload"`
    #[must_use]
    pub fn defaults() -> Vec<ExcludeAttr> {
        DEFAULT_EXCLUDE_ATTR_TOKENS
            .iter()
            .map(|token| ExcludeAttr::token(*token))
            .chain(
                DEFAULT_EXCLUDE_ATTR_PAIRS
                    .iter()
                    .map(|(key, value)| ExcludeAttr::pair(*key, *value)),
            )
            .collect()
    }
}

/// Reaction when a candidate has no referencing element (or its content cannot be obtained)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "NonMatchedRepr")]
pub enum NonMatchedLevel {
    /// Continue without logging
    Silent,
    /// Log a warning and continue
    Warn,
    /// Abort the pass
    #[default]
    Error,
}

impl NonMatchedLevel {
    /// Numeric code: 2 error, 1 warn, 0 silent
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            NonMatchedLevel::Silent => 0,
            NonMatchedLevel::Warn => 1,
            NonMatchedLevel::Error => 2,
        }
    }
}

impl TryFrom<u8> for NonMatchedLevel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, String> {
        match code {
            0 => Ok(NonMatchedLevel::Silent),
            1 => Ok(NonMatchedLevel::Warn),
            2 => Ok(NonMatchedLevel::Error),
            other => Err(format!("nonMatched code must be 0, 1 or 2, got {other}")),
        }
    }
}

impl std::str::FromStr for NonMatchedLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "silent" => Ok(NonMatchedLevel::Silent),
            "warn" | "warning" => Ok(NonMatchedLevel::Warn),
            "error" | "fail" => Ok(NonMatchedLevel::Error),
            other => Err(format!(
                "nonMatched must be one of error/fail, warn, none/silent, got '{other}'"
            )),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NonMatchedRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<NonMatchedRepr> for NonMatchedLevel {
    type Error = String;

    fn try_from(repr: NonMatchedRepr) -> Result<Self, String> {
        match repr {
            NonMatchedRepr::Code(code) => NonMatchedLevel::try_from(code),
            NonMatchedRepr::Name(name) => name.parse(),
        }
    }
}

/// Main configuration struct for an inlining pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineConfig {
    pub(crate) includes: IncludeRule,
    pub(crate) excludes: Option<String>,
    pub(crate) exclude_attrs: Vec<ExcludeAttr>,
    pub(crate) compress: bool,

    /// Prefix joined onto output names before matching `src`/`href` values,
    /// for deployments served under a public path or CDN origin
    pub(crate) base: String,
    pub(crate) non_matched: NonMatchedLevel,

    /// Keep fetched remote content for reuse by later passes sharing the cache
    pub(crate) cache: bool,

    /// Ignore cached remote content but still refresh the cache
    pub(crate) force_refresh: bool,

    /// Also inline `http(s)://` and `//` references found in the document
    ///
    /// Also read from the `download` key.
    #[serde(alias = "download")]
    pub(crate) inline_remote: bool,

    pub(crate) fetch_timeout_secs: u64,
    pub(crate) max_remote_size: usize,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            includes: IncludeRule::default(),
            excludes: Some(DEFAULT_EXCLUDE_PATTERN.to_string()),
            exclude_attrs: ExcludeAttr::defaults(),
            compress: true,
            base: String::new(),
            non_matched: NonMatchedLevel::default(),
            cache: true,
            force_refresh: false,
            inline_remote: false,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_remote_size: DEFAULT_MAX_REMOTE_SIZE,
        }
    }
}
