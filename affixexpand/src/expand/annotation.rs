//! Classification of word-list entries.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Leading `{...}` group, anchored at the start of the word.
static LEADING_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{.*\}").unwrap());

/// Annotation syntax carried by a word-list entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    /// Plain word
    None,
    /// `stem/IDS`
    Slash,
    /// `{alt1,alt2}remainder`
    Curly,
    /// `{alt1,alt2}remainder/IDS`
    Both,
}

impl Annotation {
    /// Lowercase name of the annotation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::None => "none",
            Annotation::Slash => "slash",
            Annotation::Curly => "curly",
            Annotation::Both => "both",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `word`.
///
/// A brace group only counts when the word starts with it; a `/` counts
/// anywhere in the word.
pub fn classify(word: &str) -> Annotation {
    let has_group = LEADING_GROUP.is_match(word);
    let has_slash = word.contains('/');

    match (has_group, has_slash) {
        (true, true) => Annotation::Both,
        (false, true) => Annotation::Slash,
        (true, false) => Annotation::Curly,
        (false, false) => Annotation::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_kinds() {
        assert_eq!(classify("cat/ABC"), Annotation::Slash);
        assert_eq!(classify("{cat,dog}s"), Annotation::Curly);
        assert_eq!(classify("{cat,dog}/ABC"), Annotation::Both);
        assert_eq!(classify("cat"), Annotation::None);
    }

    #[test]
    fn group_must_lead() {
        assert_eq!(classify("x{cat,dog}s"), Annotation::None);
        assert_eq!(classify("x{cat,dog}/A"), Annotation::Slash);
        assert_eq!(classify("{cat,dog"), Annotation::None);
    }

    #[test]
    fn slash_inside_group() {
        assert_eq!(classify("{a/b,c}d"), Annotation::Both);
    }

    #[test]
    fn edge_inputs() {
        assert_eq!(classify(""), Annotation::None);
        assert_eq!(classify("/"), Annotation::Slash);
        assert_eq!(classify("{}"), Annotation::Curly);
        assert_eq!(Annotation::Both.to_string(), "both");
    }
}
