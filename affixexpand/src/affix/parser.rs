use smol_str::SmolStr;

use super::error::ParseError;
use super::{AffixBlock, AffixRule, AffixType, Condition};
use crate::config::ConditionAnchor;

/// Banner lines at the top of an affix file.
const PREAMBLE_LINES: usize = 2;

const HEADER_FIELDS: usize = 4;
const RULE_FIELDS: usize = 5;

/// Parses the blocks of an affix file in file order.
///
/// Conditions are compiled with `anchor`. A block still open at the end of
/// the input is kept.
pub fn parse_blocks(text: &str, anchor: ConditionAnchor) -> Result<Vec<AffixBlock>, ParseError> {
    let mut blocks = vec![];
    let mut current: Option<AffixBlock> = None;

    for (i, line) in text.lines().enumerate().skip(PREAMBLE_LINES) {
        let line_no = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.is_empty() {
            if let Some(block) = current.take() {
                log::trace!(
                    "{} {}: {} rules (declared {})",
                    block.rule_type,
                    block.identifier,
                    block.rules.len(),
                    block.declared_count
                );
                blocks.push(block);
            }
            continue;
        }

        match current.as_mut() {
            None => current = Some(parse_header(line_no, &fields)?),
            Some(block) => {
                let rule = parse_rule(line_no, &fields, anchor)?;
                if rule.rule_type != block.rule_type || rule.identifier != block.identifier {
                    return Err(ParseError::BlockMismatch {
                        line: line_no,
                        expected: format!("{} {}", block.rule_type, block.identifier),
                        found: format!("{} {}", rule.rule_type, rule.identifier),
                    });
                }
                block.rules.push(rule);
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    Ok(blocks)
}

fn check_count(line: usize, fields: &[&str], expected: usize) -> Result<(), ParseError> {
    if fields.len() != expected {
        return Err(ParseError::TokenCount {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn parse_type(line: usize, value: &str) -> Result<AffixType, ParseError> {
    value.parse().map_err(|_| ParseError::UnknownType {
        line,
        value: value.to_string(),
    })
}

fn parse_identifier(line: usize, value: &str) -> Result<char, ParseError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::Identifier {
            line,
            value: value.to_string(),
        }),
    }
}

fn parse_header(line: usize, fields: &[&str]) -> Result<AffixBlock, ParseError> {
    check_count(line, fields, HEADER_FIELDS)?;

    let rule_type = parse_type(line, fields[0])?;
    let identifier = parse_identifier(line, fields[1])?;
    let declared_count = fields[3].parse::<usize>().map_err(|_| ParseError::Count {
        line,
        value: fields[3].to_string(),
    })?;

    Ok(AffixBlock::new(
        rule_type,
        identifier,
        SmolStr::from(fields[2]),
        declared_count,
    ))
}

fn parse_rule(line: usize, fields: &[&str], anchor: ConditionAnchor) -> Result<AffixRule, ParseError> {
    check_count(line, fields, RULE_FIELDS)?;

    let condition = Condition::new(fields[4], anchor).map_err(|source| ParseError::Condition {
        line,
        condition: fields[4].to_string(),
        source,
    })?;

    Ok(AffixRule {
        rule_type: parse_type(line, fields[0])?,
        identifier: parse_identifier(line, fields[1])?,
        strip: fields[2].into(),
        add: fields[3].into(),
        condition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::AffixTable;

    const AFFIXES: &str = "\
# affix file for tests
# generated

PFX A Y 1
PFX A 0 un .

SFX B Y 3
SFX B y ies .*[^aeiou]y
SFX B 0 s .*[aeiou]y
SFX B 0 s .*[^sy]

SFX C N 7
SFX C e ing .*e
";

    #[test]
    fn blocks_and_rule_counts() {
        let blocks = parse_blocks(AFFIXES, ConditionAnchor::Start).unwrap();

        assert_eq!(blocks.len(), 3);
        let counts: Vec<usize> = blocks.iter().map(|b| b.rules.len()).collect();
        assert_eq!(counts, vec![1, 3, 1]);

        assert_eq!(blocks[0].rule_type, AffixType::Prefix);
        assert_eq!(blocks[0].identifier, 'A');
        assert_eq!(blocks[1].combinable, "Y");
        assert_eq!(blocks[2].combinable, "N");
    }

    #[test]
    fn declared_count_is_not_enforced() {
        let blocks = parse_blocks(AFFIXES, ConditionAnchor::Start).unwrap();
        assert_eq!(blocks[2].declared_count, 7);
        assert_eq!(blocks[2].rules.len(), 1);
    }

    #[test]
    fn huge_declared_count() {
        let text = "a\nb\nSFX B Y 18446744073709551615\nSFX B 0 s .\n\nPFX A Y 1000000000000\nPFX A 0 un .\n";
        let blocks = parse_blocks(text, ConditionAnchor::Start).unwrap();
        assert_eq!(blocks[0].declared_count, usize::MAX);
        assert_eq!(blocks[0].rules.len(), 1);
        assert_eq!(blocks[1].declared_count, 1_000_000_000_000);
        assert_eq!(blocks[1].rules.len(), 1);
    }

    #[test]
    fn trailing_block_is_flushed() {
        let text = "banner\nbanner\nSFX D Y 1\nSFX D 0 ed .";
        let blocks = parse_blocks(text, ConditionAnchor::Start).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rules[0].add, "ed");
    }

    #[test]
    fn repeated_blank_lines() {
        let text = "a\nb\n\n\n\nPFX A Y 1\nPFX A 0 re .\n\n\n";
        let blocks = parse_blocks(text, ConditionAnchor::Start).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn banner_lines_are_skipped_verbatim() {
        // The banner would be a malformed header if it were read.
        let text = "PFX A\nSFX\nSFX E Y 1\nSFX E 0 s .\n";
        assert!(parse_blocks(text, ConditionAnchor::Start).is_ok());
    }

    #[test]
    fn rule_fields() {
        let table = AffixTable::parse(AFFIXES).unwrap();
        let rule = &table.blocks()[1].rules[0];
        assert_eq!(rule.strip, "y");
        assert_eq!(rule.add, "ies");
        assert_eq!(rule.condition.as_str(), ".*[^aeiou]y");
    }

    #[test]
    fn wrong_field_count() {
        let text = "a\nb\nSFX B Y 1\nSFX B y ies\n";
        match parse_blocks(text, ConditionAnchor::Start) {
            Err(ParseError::TokenCount { line, expected, found }) => {
                assert_eq!((line, expected, found), (4, 5, 4));
            }
            other => panic!("unexpected {:?}", other),
        }

        let text = "a\nb\nSFX B Y\n";
        let err = parse_blocks(text, ConditionAnchor::Start).unwrap_err();
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn bad_header_values() {
        assert!(matches!(
            parse_blocks("a\nb\nXFX B Y 1\n", ConditionAnchor::Start),
            Err(ParseError::UnknownType { line: 3, .. })
        ));
        assert!(matches!(
            parse_blocks("a\nb\nSFX BB Y 1\n", ConditionAnchor::Start),
            Err(ParseError::Identifier { line: 3, .. })
        ));
        assert!(matches!(
            parse_blocks("a\nb\nSFX B Y many\n", ConditionAnchor::Start),
            Err(ParseError::Count { line: 3, .. })
        ));
    }

    #[test]
    fn rule_outside_its_block() {
        let text = "a\nb\nSFX B Y 2\nSFX B 0 s .\nSFX C 0 s .\n";
        assert!(matches!(
            parse_blocks(text, ConditionAnchor::Start),
            Err(ParseError::BlockMismatch { line: 5, .. })
        ));
    }

    #[test]
    fn invalid_condition() {
        let text = "a\nb\nSFX B Y 1\nSFX B 0 s [a-\n";
        let err = parse_blocks(text, ConditionAnchor::Start).unwrap_err();
        assert!(matches!(err, ParseError::Condition { line: 4, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
