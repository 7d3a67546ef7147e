//! Topic tagging by keyword containment.

use super::rules::{first_match, Rule};
use crate::models::Tag;

/// Checked in order; a question mentioning both "python" and "career" is programming.
pub const TAG_RULES: &[Rule<Tag>] = &[
    Rule::keywords(&["python", "java", "program", "code"], Tag::Programming),
    Rule::keywords(&["bio", "chem", "science"], Tag::Science),
    Rule::keywords(&["job", "career", "salary", "interview"], Tag::Career),
];

/// Maps question text to a topic label. Falls back to [`Tag::General`].
pub fn classify(question: &str) -> Tag {
    first_match(TAG_RULES, question).unwrap_or(Tag::General)
}
