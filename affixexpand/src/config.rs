//! Expansion settings.
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where a suffix rule's condition has to match on the stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionAnchor {
    /// The condition must match starting at the first character of the stem.
    Start,
    /// The condition must match the tail of the stem (hunspell convention).
    End,
}

impl ConditionAnchor {
    /// Wraps a raw condition into an anchored regular expression.
    pub(crate) fn anchor(self, condition: &str) -> String {
        match self {
            ConditionAnchor::Start => format!("^(?:{})", condition),
            ConditionAnchor::End => format!("(?:{})$", condition),
        }
    }
}

/// Settings shared by the parser, the expansion drivers and the corpus run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandConfig {
    /// Anchoring applied to suffix conditions when they are compiled.
    pub condition_anchor: ConditionAnchor,
    /// Expand words on the rayon thread pool.
    pub parallel: bool,
    /// File extension (without the dot) of word lists picked up by the corpus run.
    pub input_extension: String,
}

impl ExpandConfig {
    /// Condition anchored at the stem start, sequential, `.cat` word lists.
    pub fn default() -> ExpandConfig {
        ExpandConfig {
            condition_anchor: ConditionAnchor::Start,
            parallel: false,
            input_extension: "cat".into(),
        }
    }

    /// Reads a JSON config file. Missing keys fall back to the defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ExpandConfig, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| ConfigError::Json(path.display().to_string(), e))
    }
}

impl Default for ExpandConfig {
    fn default() -> Self {
        ExpandConfig::default()
    }
}

/// Errors loading an [`ExpandConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be opened.
    #[error("Failed to read config '{0}'")]
    Io(String, #[source] std::io::Error),

    /// The config file is not valid JSON for [`ExpandConfig`].
    #[error("Invalid config '{0}'")]
    Json(String, #[source] serde_json::Error),
}
