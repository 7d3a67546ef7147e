//! Canned answer generation.
//!
//! This is the whole of the demo "intelligence". It is only reached through
//! [`crate::actors::traits::Responder`], so a real backend can take its place.

use super::rules::{first_match, Rule};

pub const AI_DEFINITION: &str = "AI stands for Artificial Intelligence: systems that perform tasks that normally require human intelligence.";
pub const ML_DEFINITION: &str =
    "Machine Learning is a subset of AI where models learn patterns from data.";
pub const PYTHON_BLURB: &str =
    "Python is a popular programming language used for web, automation, and data science.";
pub const CAREER_ADVICE: &str =
    "Build projects, internships, and practice interview problems to improve job prospects.";
pub const MORE_DETAIL: &str = "Please give a little more detail so I can answer better.";
pub const ECHO_PREFIX: &str = "Nice question! Here is a concise demo answer: ";

/// Maximum number of characters of the question quoted in the generic answer.
pub const ECHO_EXCERPT_CHARS: usize = 130;

const ANSWER_RULES: &[Rule<&str>] = &[
    Rule::keywords(&["what is ai", "define ai"], AI_DEFINITION),
    Rule::keywords(&["what is ml", "define ml"], ML_DEFINITION),
    Rule::keywords(&["python"], PYTHON_BLURB),
    Rule::keywords(&["career", "job"], CAREER_ADVICE),
    Rule::fewer_tokens_than(3, MORE_DETAIL),
];

/// Produces the canned answer for `question`. Total and deterministic.
pub fn respond(question: &str) -> String {
    match first_match(ANSWER_RULES, question) {
        Some(canned) => canned.to_string(),
        None => format!("{}{}", ECHO_PREFIX, excerpt(question, ECHO_EXCERPT_CHARS)),
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
