//! Loading and validation for `InlineConfig`

use super::types::InlineConfig;
use crate::error::{InlineError, InlineResult};
use crate::inline_resource::filters::FilterEngine;

impl InlineConfig {
    /// Parse plugin options from JSON and validate them
    ///
    /// Missing keys take their defaults; an `includes` value that is neither an
    /// array nor a string is rejected here, before any artifact is looked at.
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` on malformed JSON or an invalid rule set.
    pub fn from_json_str(json: &str) -> InlineResult<Self> {
        let config: InlineConfig = serde_json::from_str(json)
            .map_err(|e| InlineError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Same as `from_json_str` for an already-parsed value
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` on a mismatched shape or an invalid rule set.
    pub fn from_json_value(value: serde_json::Value) -> InlineResult<Self> {
        let config: InlineConfig = serde_json::from_value(value)
            .map_err(|e| InlineError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the rules compile
    ///
    /// # Errors
    ///
    /// `InlineError::Configuration` for an empty extension set or an invalid regex.
    pub fn validate(&self) -> InlineResult<()> {
        FilterEngine::from_config(self).map(|_| ())
    }
}
