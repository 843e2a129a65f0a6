use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HighlightError;

pub const DEFAULT_MAX_LINE_LENGTH: usize = 256;
pub const DEFAULT_FRAGMENT_SIZE: usize = 100;
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 40;
pub const DEFAULT_PRE_TAG: &str = "<em class='highlight'>";
pub const DEFAULT_POST_TAG: &str = "</em>";

/// Settings shared by every highlighter built from one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Display cap for a single code line, marker included.
    pub max_line_length: usize,
    /// Width of a text fragment, in bytes of source text.
    pub fragment_size: usize,
    /// Tokens longer than this are dropped by both analyzers.
    pub max_token_length: usize,
    pub pre_tag: String,
    pub post_tag: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            pre_tag: DEFAULT_PRE_TAG.to_string(),
            post_tag: DEFAULT_POST_TAG.to_string(),
        }
    }
}

impl HighlightConfig {
    pub fn from_json(raw: &str) -> Result<Self, HighlightError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, HighlightError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`HighlightConfig::load`], but a missing or broken file yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default highlight config");
                Self::default()
            }
        }
    }
}
