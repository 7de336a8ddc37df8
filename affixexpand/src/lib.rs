/*! Expansion of annotated dictionary word lists with ispell affix rules.

An affix file describes, block by block, how prefixes (`PFX`) and suffixes
(`SFX`) attach to a stem. A word list refers to those blocks by their
single-character identifiers (`city/B`), lists interchangeable stem
spellings in a leading brace group (`{cat,dog}s`), or does both
(`{cat,dog}/B`). This crate parses the affix file once and expands each
annotated entry into every word form it implies.

# Usage examples

```
use affixexpand::affix::AffixTable;
use affixexpand::expand::expand_words;

let table: AffixTable = "banner\nbanner\n\nPFX A Y 1\nPFX A 0 un .\n"
    .parse()
    .unwrap();

let forms = expand_words(&table, ["happy/A", "{cat,dog}s"]);
assert_eq!(forms, vec!["happy", "unhappy", "cats", "dogs"]);
```

A complete run over a directory of word lists is available in [`corpus`],
and the `affixexpand` binary in the same repository wraps all of it in a
command-line frontend.
*/

#![warn(missing_docs)]
pub mod affix;
pub mod config;
pub mod corpus;
pub mod expand;
pub mod vfs;
pub mod wordlist;

pub use crate::affix::AffixTable;
pub use crate::config::ExpandConfig;
pub use crate::expand::Expander;
