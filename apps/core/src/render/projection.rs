//! Pure projections of the history into view models.

use chrono::{DateTime, Utc};

use crate::models::{HistoryRecord, Tag, TagFilter};

pub const EMPTY_TRANSCRIPT_TIP: &str = "Ask a question below to start the chat.";
pub const EMPTY_SIDEBAR_PLACEHOLDER: &str = "No history yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bubble {
    Question {
        record_id: i64,
        text: String,
    },
    Answer {
        record_id: i64,
        text: String,
        tag: Tag,
        created_at: DateTime<Utc>,
    },
}

impl Bubble {
    pub fn record_id(&self) -> i64 {
        match self {
            Bubble::Question { record_id, .. } | Bubble::Answer { record_id, .. } => *record_id,
        }
    }
}

/// Chat transcript: oldest exchange first, question then answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptView {
    pub bubbles: Vec<Bubble>,
    /// Set when there is nothing to show.
    pub tip: Option<&'static str>,
    /// The painter should bring the last bubble into view.
    pub scroll_to_latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    /// Key for the "view" and "copy answer" actions.
    pub id: i64,
    pub question: String,
    pub tag: Tag,
    pub created_at: DateTime<Utc>,
}

/// History sidebar: newest first, restricted to the selected tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub filter: TagFilter,
    pub items: Vec<SidebarItem>,
    /// Set when the filtered result is empty.
    pub placeholder: Option<&'static str>,
}

/// `records` must be in storage order (newest first).
pub fn transcript(records: &[HistoryRecord]) -> TranscriptView {
    let bubbles: Vec<Bubble> = records
        .iter()
        .rev()
        .flat_map(|r| {
            [
                Bubble::Question {
                    record_id: r.id,
                    text: r.question.clone(),
                },
                Bubble::Answer {
                    record_id: r.id,
                    text: r.answer.clone(),
                    tag: r.tag,
                    created_at: r.created_at,
                },
            ]
        })
        .collect();

    let empty = bubbles.is_empty();
    TranscriptView {
        bubbles,
        tip: empty.then_some(EMPTY_TRANSCRIPT_TIP),
        scroll_to_latest: !empty,
    }
}

/// `filtered` is the store's `filtered_by(filter)` result, newest first.
pub fn sidebar<'a>(
    filtered: impl IntoIterator<Item = &'a HistoryRecord>,
    filter: TagFilter,
) -> SidebarView {
    let items: Vec<SidebarItem> = filtered
        .into_iter()
        .map(|r| SidebarItem {
            id: r.id,
            question: r.question.clone(),
            tag: r.tag,
            created_at: r.created_at,
        })
        .collect();

    let placeholder = items.is_empty().then_some(EMPTY_SIDEBAR_PLACEHOLDER);
    SidebarView {
        filter,
        items,
        placeholder,
    }
}
