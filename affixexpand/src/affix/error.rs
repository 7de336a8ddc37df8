//! Affix file parsing errors.

/// Errors raised while reading an affix file.
///
/// Every variant carries the 1-based line number in the original text,
/// counting the two banner lines.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A header or rule record has the wrong number of fields
    #[error("Line {line}: expected {expected} fields, found {found}")]
    TokenCount {
        /// line number
        line: usize,
        /// fields required for this kind of record
        expected: usize,
        /// fields present on the line
        found: usize,
    },

    /// Affix type is neither `PFX` nor `SFX`
    #[error("Line {line}: unknown affix type '{value}'")]
    UnknownType {
        /// line number
        line: usize,
        /// offending token
        value: String,
    },

    /// Rule-set identifier is not a single character
    #[error("Line {line}: identifier '{value}' must be a single character")]
    Identifier {
        /// line number
        line: usize,
        /// offending token
        value: String,
    },

    /// Declared rule count is not a non-negative integer
    #[error("Line {line}: invalid rule count '{value}'")]
    Count {
        /// line number
        line: usize,
        /// offending token
        value: String,
    },

    /// Rule record does not belong to the block it appears in
    #[error("Line {line}: rule '{found}' inside block '{expected}'")]
    BlockMismatch {
        /// line number
        line: usize,
        /// type and identifier of the open block
        expected: String,
        /// type and identifier of the rule
        found: String,
    },

    /// Condition is not a valid pattern
    #[error("Line {line}: invalid condition '{condition}'")]
    Condition {
        /// line number
        line: usize,
        /// raw condition text
        condition: String,
        /// compilation failure
        #[source]
        source: regex::Error,
    },
}

impl ParseError {
    /// Line of the affix file the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::TokenCount { line, .. }
            | ParseError::UnknownType { line, .. }
            | ParseError::Identifier { line, .. }
            | ParseError::Count { line, .. }
            | ParseError::BlockMismatch { line, .. }
            | ParseError::Condition { line, .. } => *line,
        }
    }
}
