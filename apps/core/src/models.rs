use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Topic label attached to every history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    General,
    Programming,
    Science,
    Career,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::General, Tag::Programming, Tag::Science, Tag::Career];

    pub fn label(&self) -> &'static str {
        match self {
            Tag::General => "general",
            Tag::Programming => "programming",
            Tag::Science => "science",
            Tag::Career => "career",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tag {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tag::ALL
            .into_iter()
            .find(|tag| tag.label() == wanted)
            .ok_or_else(|| AppError::Validation(format!("Unknown tag: {}", s)))
    }
}

/// Selection of the history sidebar filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(Tag),
}

impl TagFilter {
    pub fn matches(&self, tag: Tag) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Only(wanted) => *wanted == tag,
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => f.write_str("all"),
            TagFilter::Only(tag) => tag.fmt(f),
        }
    }
}

impl FromStr for TagFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TagFilter::All);
        }
        s.parse::<Tag>().map(TagFilter::Only).map_err(|_| {
            AppError::Validation(format!(
                "Unknown filter '{}': expected all, general, programming, science or career",
                s
            ))
        })
    }
}

/// A single question/answer exchange kept in the session history.
///
/// Field names on the wire follow the exported history format
/// (`id`, `q`, `a`, `tag`, `time`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Session-unique identifier.
    pub id: i64,
    /// The question as submitted (trimmed).
    #[serde(rename = "q")]
    pub question: String,
    /// The answer produced by the responder.
    #[serde(rename = "a")]
    pub answer: String,
    /// Topic assigned by the tagger.
    pub tag: Tag,
    /// Creation time, millisecond precision.
    #[serde(rename = "time")]
    pub created_at: DateTime<Utc>,
}
