//! Word annotation errors.
use super::annotation::Annotation;

/// A word claims brace or slash structure but does not have it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedAnnotationError {
    /// No `{alternatives}remainder` pair at the start of the word
    #[error("'{word}' ({kind}): expected {{alternatives}} followed by a remainder")]
    BraceGroup {
        /// the offending word
        word: String,
        /// how the word was classified
        kind: Annotation,
    },
}

impl MalformedAnnotationError {
    /// The word that failed to expand.
    pub fn word(&self) -> &str {
        match self {
            MalformedAnnotationError::BraceGroup { word, .. } => word,
        }
    }
}
