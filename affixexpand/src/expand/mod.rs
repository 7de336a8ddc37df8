//! Expansion of annotated words into word forms.
//!
//! Every word is classified once (see [`classify`]) and routed:
//!
//! - plain words pass through unchanged,
//! - `stem/IDS` goes through [`apply_rules`],
//! - `{alt1,alt2}rest` goes through [`expand_braces`],
//! - `{alt1,alt2}rest/IDS` is brace-expanded first, then each variant goes
//!   through [`apply_rules`].
//!
//! Words are independent of each other; the [`AffixTable`] is only read, so
//! [`expand_words_par`] can fan the work out over rayon.
use hashbrown::HashSet;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use smol_str::SmolStr;

use crate::affix::{AffixTable, ParseError};
use crate::config::ExpandConfig;

pub mod annotation;
pub mod error;

pub use self::annotation::{classify, Annotation};
pub use self::error::MalformedAnnotationError;

/// `{alternatives}remainder` at the start of a word.
static BRACE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{(.+?)\}(.+)").unwrap());

/// Separator between a stem and its rule-set identifiers.
const RULE_SEPARATOR: char = '/';

/// Separator between stem alternatives inside braces.
const ALTERNATIVE_SEPARATOR: char = ',';

/// Deduplicated word forms generated from one entry.
///
/// Forms keep insertion order; the stem is always first.
#[derive(Clone, Debug)]
pub struct Variations {
    forms: Vec<SmolStr>,
    seen: HashSet<SmolStr>,
}

impl Variations {
    /// Starts a set containing only `stem`.
    pub fn new(stem: &str) -> Variations {
        let mut v = Variations {
            forms: Vec::new(),
            seen: HashSet::new(),
        };
        v.insert(stem);
        v
    }

    /// Adds `form` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, form: &str) -> bool {
        if self.seen.contains(form) {
            return false;
        }
        let form = SmolStr::from(form);
        self.seen.insert(form.clone());
        self.forms.push(form);
        true
    }

    /// Whether `form` was generated.
    pub fn contains(&self, form: &str) -> bool {
        self.seen.contains(form)
    }

    /// The stem the set was started from.
    pub fn stem(&self) -> &str {
        &self.forms[0]
    }

    /// Number of distinct forms, stem included.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Always `false`: the stem is never removed.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Forms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(SmolStr::as_str)
    }

    /// Consumes the set into owned strings.
    pub fn into_vec(self) -> Vec<String> {
        self.forms.into_iter().map(|f| f.to_string()).collect()
    }
}

/// Expands a leading brace group: `{cat,dog}s` gives `cats`, `dogs`.
///
/// The remainder after the closing brace is copied untouched, including any
/// `/IDS` suffix.
pub fn expand_braces(word: &str) -> Result<Vec<String>, MalformedAnnotationError> {
    let captures = BRACE_GROUP
        .captures(word)
        .ok_or_else(|| MalformedAnnotationError::BraceGroup {
            word: word.to_string(),
            kind: classify(word),
        })?;

    let remainder = &captures[2];
    Ok(captures[1]
        .split(ALTERNATIVE_SEPARATOR)
        .map(|alternative| format!("{}{}", alternative, remainder))
        .collect())
}

/// Applies the rule sets named after the first `/` to the stem before it.
///
/// Each character after the separator is looked up on its own; identifiers
/// without a block contribute nothing. A word without a separator yields
/// just itself.
pub fn apply_rules(table: &AffixTable, word: &str) -> Variations {
    let (stem, identifiers) = word.split_once(RULE_SEPARATOR).unwrap_or((word, ""));
    let mut variations = Variations::new(stem);

    for identifier in identifiers.chars() {
        for block in table.blocks_for(identifier) {
            for rule in &block.rules {
                if let Some(form) = rule.apply(stem) {
                    variations.insert(&form);
                }
            }
        }
    }

    log::trace!("{} -> {} forms", word, variations.len());
    variations
}

/// Expands one word-list entry according to its annotation.
pub fn expand_word(table: &AffixTable, word: &str) -> Result<Vec<String>, MalformedAnnotationError> {
    Ok(match classify(word) {
        Annotation::None => vec![word.to_string()],
        Annotation::Slash => apply_rules(table, word).into_vec(),
        Annotation::Curly => expand_braces(word)?,
        Annotation::Both => expand_braces(word)?
            .iter()
            .flat_map(|variant| apply_rules(table, variant).into_vec())
            .collect(),
    })
}

fn expand_or_skip(table: &AffixTable, word: &str) -> Vec<String> {
    match expand_word(table, word) {
        Ok(forms) => forms,
        Err(e) => {
            log::warn!("Skipping word: {}", e);
            vec![]
        }
    }
}

/// Expands a word list in order. Malformed entries are skipped with a warning.
///
/// Forms are deduplicated within one entry only.
pub fn expand_words<I, S>(table: &AffixTable, words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .flat_map(|word| expand_or_skip(table, word.as_ref()))
        .collect()
}

/// Same as [`expand_words`], spread over the rayon thread pool.
///
/// The output order matches the sequential version.
pub fn expand_words_par<S>(table: &AffixTable, words: &[S]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    words
        .par_iter()
        .flat_map(|word| expand_or_skip(table, word.as_ref()))
        .collect()
}

/// An affix table paired with the settings it was built with.
#[derive(Clone, Debug)]
pub struct Expander {
    table: AffixTable,
    config: ExpandConfig,
}

impl Expander {
    /// Wraps an already parsed table.
    pub fn new(table: AffixTable, config: ExpandConfig) -> Expander {
        Expander { table, config }
    }

    /// Parses affix file text with the given settings.
    pub fn from_affix_text(text: &str, config: ExpandConfig) -> Result<Expander, ParseError> {
        let table = AffixTable::parse_with_config(text, &config)?;
        Ok(Expander::new(table, config))
    }

    /// The underlying table.
    pub fn table(&self) -> &AffixTable {
        &self.table
    }

    /// The settings in use.
    pub fn config(&self) -> &ExpandConfig {
        &self.config
    }

    /// Expands a word list, in parallel when configured.
    pub fn expand<S>(&self, words: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        if self.config.parallel {
            expand_words_par(&self.table, words)
        } else {
            expand_words(&self.table, words)
        }
    }
}
