//! Ordered rule tables shared by the tagger and the answer generator.
//!
//! A table is evaluated top to bottom against the lowercased input and the
//! first matching rule wins, so priority is the table order.

/// Condition a rule checks against the lowercased input.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Input contains any of the given substrings.
    AnyKeyword(&'static [&'static str]),
    /// Input has fewer than `n` tokens when split on the space character.
    FewerTokensThan(usize),
}

impl Matcher {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Matcher::AnyKeyword(keywords) => keywords.iter().any(|k| lowered.contains(k)),
            Matcher::FewerTokensThan(n) => lowered.split(' ').count() < *n,
        }
    }
}

/// A single `(predicate, result)` pair.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub matcher: Matcher,
    pub outcome: T,
}

impl<T: 'static> Rule<T> {
    pub const fn keywords(keywords: &'static [&'static str], outcome: T) -> Self {
        Self {
            matcher: Matcher::AnyKeyword(keywords),
            outcome,
        }
    }

    pub const fn fewer_tokens_than(n: usize, outcome: T) -> Self {
        Self {
            matcher: Matcher::FewerTokensThan(n),
            outcome,
        }
    }
}

/// Returns the outcome of the first rule matching `text`, compared case-insensitively.
pub fn first_match<T: Copy + 'static>(rules: &[Rule<T>], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matcher.matches(&lowered))
        .map(|rule| rule.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[Rule<u8>] = &[
        Rule::keywords(&["alpha"], 1),
        Rule::keywords(&["beta", "gamma"], 2),
        Rule::fewer_tokens_than(2, 3),
    ];

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(first_match(TABLE, "ALPHA and beta together"), Some(1));
        assert_eq!(first_match(TABLE, "only Gamma here"), Some(2));
    }

    #[test]
    fn test_token_rule_counts_space_separated_pieces() {
        assert_eq!(first_match(TABLE, "single"), Some(3));
        assert_eq!(first_match(TABLE, "two words"), None);
        // Double spaces produce an empty token, as a plain split does.
        assert_eq!(first_match(TABLE, "x  "), None);
    }
}
