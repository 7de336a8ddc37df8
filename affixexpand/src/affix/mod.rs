//! Affix rule table.
//!
//! An affix file starts with two banner lines, followed by blocks separated
//! by blank lines. Each block opens with a header record
//! (`SFX B Y 2`: type, identifier, combinable flag, declared rule count) and
//! continues with rule records
//! (`SFX B y ies .*[^aeiou]y`: type, identifier, strip, add, condition).
//!
//! The parsed [`AffixTable`] is immutable and indexes its blocks by
//! identifier, so it can be shared across threads and queried for every
//! word of a list.
use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use regex::Regex;
use smol_str::SmolStr;

use crate::config::{ConditionAnchor, ExpandConfig};

pub mod error;
mod parser;

pub use self::error::ParseError;
pub use self::parser::parse_blocks;

/// Strip value meaning "remove nothing".
pub const STRIP_NOTHING: &str = "0";

/// Which end of the stem an affix attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AffixType {
    /// `PFX`
    Prefix,
    /// `SFX`
    Suffix,
}

impl AffixType {
    /// Token used for this type in affix files.
    pub fn as_str(&self) -> &'static str {
        match self {
            AffixType::Prefix => "PFX",
            AffixType::Suffix => "SFX",
        }
    }
}

impl FromStr for AffixType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PFX" => Ok(AffixType::Prefix),
            "SFX" => Ok(AffixType::Suffix),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AffixType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule condition, compiled once when the affix file is read.
#[derive(Clone, Debug)]
pub struct Condition {
    raw: SmolStr,
    regex: Regex,
}

impl Condition {
    /// Compiles `raw` with the given anchoring.
    pub fn new(raw: &str, anchor: ConditionAnchor) -> Result<Condition, regex::Error> {
        let regex = Regex::new(&anchor.anchor(raw))?;
        Ok(Condition {
            raw: raw.into(),
            regex,
        })
    }

    /// Condition text as written in the affix file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `stem` satisfies the condition.
    #[inline]
    pub fn matches(&self, stem: &str) -> bool {
        self.regex.is_match(stem)
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for Condition {}

/// One transformation record inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffixRule {
    /// Same as the owning block's type
    pub rule_type: AffixType,
    /// Same as the owning block's identifier
    pub identifier: char,
    /// Text removed from the stem, or [`STRIP_NOTHING`]
    pub strip: SmolStr,
    /// Text added to the stem
    pub add: SmolStr,
    /// Condition the stem must satisfy (suffix rules only)
    pub condition: Condition,
}

impl AffixRule {
    /// Applies a suffix rule to `stem`.
    ///
    /// Returns `None` when the condition does not match or the stem does not
    /// end with the strip text.
    pub fn apply_suffix(&self, stem: &str) -> Option<String> {
        if !self.condition.matches(stem) {
            return None;
        }

        if self.strip == STRIP_NOTHING {
            return Some(format!("{}{}", stem, self.add));
        }

        stem.strip_suffix(self.strip.as_str())
            .map(|rest| format!("{}{}", rest, self.add))
    }

    /// Applies a prefix rule to `stem`. Strip and condition are not consulted.
    pub fn apply_prefix(&self, stem: &str) -> String {
        format!("{}{}", self.add, stem)
    }

    /// Applies the rule according to its type.
    #[inline]
    pub fn apply(&self, stem: &str) -> Option<String> {
        match self.rule_type {
            AffixType::Prefix => Some(self.apply_prefix(stem)),
            AffixType::Suffix => self.apply_suffix(stem),
        }
    }
}

/// One rule-set declaration: header plus its rules in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffixBlock {
    /// `PFX` or `SFX`
    pub rule_type: AffixType,
    /// Rule-set key referenced from word annotations
    pub identifier: char,
    /// Combinability flag, kept verbatim
    pub combinable: SmolStr,
    /// Rule count from the header; not checked against `rules`
    pub declared_count: usize,
    /// Rules in file order
    pub rules: Vec<AffixRule>,
}

impl AffixBlock {
    pub(crate) fn new(
        rule_type: AffixType,
        identifier: char,
        combinable: SmolStr,
        declared_count: usize,
    ) -> AffixBlock {
        AffixBlock {
            rule_type,
            identifier,
            combinable,
            declared_count,
            rules: Vec::new(),
        }
    }
}

/// Parsed affix file with an identifier index.
#[derive(Clone, Debug, Default)]
pub struct AffixTable {
    blocks: Vec<AffixBlock>,
    index: HashMap<char, Vec<usize>>,
}

impl AffixTable {
    /// Builds a table from already parsed blocks.
    pub fn new(blocks: Vec<AffixBlock>) -> AffixTable {
        let mut index: HashMap<char, Vec<usize>> = HashMap::new();

        for (i, block) in blocks.iter().enumerate() {
            index.entry(block.identifier).or_default().push(i);
        }

        AffixTable { blocks, index }
    }

    /// Parses an affix file with default settings.
    pub fn parse(text: &str) -> Result<AffixTable, ParseError> {
        Self::parse_with_config(text, &ExpandConfig::default())
    }

    /// Parses an affix file, compiling conditions with the configured anchoring.
    pub fn parse_with_config(text: &str, config: &ExpandConfig) -> Result<AffixTable, ParseError> {
        let blocks = parse_blocks(text, config.condition_anchor)?;
        log::debug!(
            "Parsed {} affix blocks ({} rules)",
            blocks.len(),
            blocks.iter().map(|b| b.rules.len()).sum::<usize>()
        );
        Ok(AffixTable::new(blocks))
    }

    /// All blocks in file order.
    pub fn blocks(&self) -> &[AffixBlock] {
        &self.blocks
    }

    /// Blocks of either type declared under `identifier`, in file order.
    pub fn blocks_for(&self, identifier: char) -> impl Iterator<Item = &AffixBlock> + '_ {
        self.index
            .get(&identifier)
            .into_iter()
            .flatten()
            .map(move |&i| &self.blocks[i])
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the table has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl FromStr for AffixTable {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AffixTable::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rule_type: AffixType, strip: &str, add: &str, condition: &str) -> AffixRule {
        AffixRule {
            rule_type,
            identifier: 'X',
            strip: strip.into(),
            add: add.into(),
            condition: Condition::new(condition, ConditionAnchor::Start).unwrap(),
        }
    }

    #[test]
    fn suffix_without_strip_appends() {
        let r = rule(AffixType::Suffix, "0", "s", ".");
        let out = r.apply("cat").unwrap();
        assert_eq!(out, "cats");
        assert_eq!(out.len(), "cat".len() + "s".len());
    }

    #[test]
    fn suffix_strip_must_match() {
        let r = rule(AffixType::Suffix, "y", "ies", ".*[^aeiou]y");
        assert_eq!(r.apply("city").as_deref(), Some("cities"));
        assert_eq!(r.apply("boy"), None);
        assert_eq!(r.apply("cat"), None);
    }

    #[test]
    fn prefix_ignores_strip_and_condition() {
        let r = rule(AffixType::Prefix, "x", "un", "zzz");
        assert_eq!(r.apply("happy").as_deref(), Some("unhappy"));
    }

    #[test]
    fn condition_anchoring() {
        let start = Condition::new("[^aeiou]y", ConditionAnchor::Start).unwrap();
        let end = Condition::new("[^aeiou]y", ConditionAnchor::End).unwrap();

        assert!(!start.matches("city"));
        assert!(start.matches("ty"));
        assert!(end.matches("city"));
        assert!(!end.matches("boy"));
        assert_eq!(start.as_str(), "[^aeiou]y");
    }

    #[test]
    fn index_spans_both_types() {
        let table = AffixTable::new(vec![
            AffixBlock::new(AffixType::Prefix, 'A', "Y".into(), 0),
            AffixBlock::new(AffixType::Suffix, 'B', "Y".into(), 0),
            AffixBlock::new(AffixType::Suffix, 'A', "N".into(), 0),
        ]);

        let types: Vec<_> = table.blocks_for('A').map(|b| b.rule_type).collect();
        assert_eq!(types, vec![AffixType::Prefix, AffixType::Suffix]);
        assert_eq!(table.blocks_for('Z').count(), 0);
        assert_eq!(table.len(), 3);
    }
}
