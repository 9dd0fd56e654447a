//! Getter methods for `InlineConfig`

use std::time::Duration;

use super::types::{ExcludeAttr, IncludeRule, InlineConfig, NonMatchedLevel};

impl InlineConfig {
    #[must_use]
    pub fn includes(&self) -> &IncludeRule {
        &self.includes
    }

    #[must_use]
    pub fn excludes(&self) -> Option<&str> {
        self.excludes.as_deref()
    }

    #[must_use]
    pub fn exclude_attrs(&self) -> &[ExcludeAttr] {
        &self.exclude_attrs
    }

    #[must_use]
    pub fn compress(&self) -> bool {
        self.compress
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn non_matched(&self) -> NonMatchedLevel {
        self.non_matched
    }

    #[must_use]
    pub fn cache(&self) -> bool {
        self.cache
    }

    #[must_use]
    pub fn force_refresh(&self) -> bool {
        self.force_refresh
    }

    #[must_use]
    pub fn inline_remote(&self) -> bool {
        self.inline_remote
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn max_remote_size(&self) -> usize {
        self.max_remote_size
    }
}
