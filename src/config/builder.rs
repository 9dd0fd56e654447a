//! Fluent builder for `InlineConfig`
//!
//! Every field has a default, so the builder carries no type state; `build()`
//! validates the rule set (regex compilation, non-empty extension set) before
//! handing the config out.

use std::time::Duration;

use super::types::{ExcludeAttr, IncludeRule, InlineConfig, NonMatchedLevel};
use crate::error::InlineResult;

#[derive(Debug, Clone, Default)]
pub struct InlineConfigBuilder {
    config: InlineConfig,
}

impl InlineConfig {
    /// Create a builder for configuring an `InlineConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> InlineConfigBuilder {
        InlineConfigBuilder::default()
    }
}

impl InlineConfigBuilder {
    /// Select candidates by extension, e.g. `["js", "css"]`
    #[must_use]
    pub fn include_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.includes =
            IncludeRule::Extensions(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Select candidates by a regex over the full output name
    #[must_use]
    pub fn include_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.includes = IncludeRule::Pattern(pattern.into());
        self
    }

    #[must_use]
    pub fn includes(mut self, rule: IncludeRule) -> Self {
        self.config.includes = rule;
        self
    }

    #[must_use]
    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.excludes = Some(pattern.into());
        self
    }

    /// Remove the default `\.(svg|jpg)$` exclusion
    #[must_use]
    pub fn no_excludes(mut self) -> Self {
        self.config.excludes = None;
        self
    }

    /// Replace the attribute exclusion rules. An empty list inlines everything.
    #[must_use]
    pub fn exclude_attrs(mut self, rules: Vec<ExcludeAttr>) -> Self {
        self.config.exclude_attrs = rules;
        self
    }

    #[must_use]
    pub fn exclude_attr(mut self, rule: ExcludeAttr) -> Self {
        self.config.exclude_attrs.push(rule);
        self
    }

    #[must_use]
    pub fn compress(mut self, compress: bool) -> Self {
        self.config.compress = compress;
        self
    }

    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.config.base = base.into();
        self
    }

    #[must_use]
    pub fn non_matched(mut self, level: NonMatchedLevel) -> Self {
        self.config.non_matched = level;
        self
    }

    #[must_use]
    pub fn cache(mut self, cache: bool) -> Self {
        self.config.cache = cache;
        self
    }

    #[must_use]
    pub fn force_refresh(mut self, force: bool) -> Self {
        self.config.force_refresh = force;
        self
    }

    #[must_use]
    pub fn inline_remote(mut self, inline_remote: bool) -> Self {
        self.config.inline_remote = inline_remote;
        self
    }

    /// Set the per-request timeout for remote fetches (whole seconds, minimum 1)
    #[must_use]
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout_secs = timeout.as_secs().max(1);
        self
    }

    #[must_use]
    pub fn max_remote_size(mut self, bytes: usize) -> Self {
        self.config.max_remote_size = bytes;
        self
    }

    /// Validate and return the config
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` for an empty extension set or an invalid regex.
    pub fn build(self) -> InlineResult<InlineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
