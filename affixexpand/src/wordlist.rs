//! Word lists: reading entries out of text and measuring them.
use serde::Serialize;

/// Entries of a word list, in order.
///
/// Lines are trimmed and blank lines dropped. A line holding several
/// space-separated tokens yields each token as its own entry. Repeated
/// spaces leave empty entries between them.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| line.split(' '))
}

/// Number of entries [`words`] yields for `text`.
pub fn count_words(text: &str) -> usize {
    words(text).count()
}

/// Shortest, longest and average word length, in characters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WordLengthStats {
    /// length of the shortest word
    pub short: usize,
    /// length of the longest word
    pub long: usize,
    /// mean length
    pub avg: f64,
}

impl WordLengthStats {
    /// Computes the statistics, or `None` for an empty list.
    pub fn from_words<I, S>(words: I) -> Option<WordLengthStats>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0usize;
        let mut total = 0usize;
        let mut short = usize::MAX;
        let mut long = 0usize;

        for word in words {
            let len = word.as_ref().chars().count();
            count += 1;
            total += len;
            short = short.min(len);
            long = long.max(len);
        }

        if count == 0 {
            return None;
        }

        Some(WordLengthStats {
            short,
            long,
            avg: total as f64 / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_token_lines_are_exploded() {
        let text = "cat\n\n  foo bar  \nbaz/A\n";
        assert_eq!(words(text).collect::<Vec<_>>(), vec!["cat", "foo", "bar", "baz/A"]);
        assert_eq!(count_words(text), 4);
    }

    #[test]
    fn repeated_spaces() {
        assert_eq!(words("a  b").collect::<Vec<_>>(), vec!["a", "", "b"]);
        assert_eq!(count_words("a  b\n"), 3);
        assert_eq!(count_words("x   y\nz\n"), 5);
    }

    #[test]
    fn tabs_are_not_separators() {
        assert_eq!(words("a\tb").collect::<Vec<_>>(), vec!["a\tb"]);
    }

    #[test]
    fn length_stats() {
        let stats = WordLengthStats::from_words(["a", "abc", "žluť"]).unwrap();
        assert_eq!(stats.short, 1);
        assert_eq!(stats.long, 4);
        assert!((stats.avg - 8.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn length_stats_empty() {
        assert_eq!(WordLengthStats::from_words(Vec::<String>::new()), None);
    }
}
