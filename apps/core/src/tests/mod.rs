//! Test Module
//!
//! Test suite for the ChatHelper core.
//!
//! ## Test Categories
//! - `brain_tests`: topic tagging and canned answers
//! - `store_tests`: history ordering, ids, filtering and clearing
//! - `export_tests`: plain-text and JSON history exports
//! - `render_tests`: view projections and the HTML/terminal painters
//! - `supervisor_tests`: controller workflow against recording fakes
//! - `remote_tests`: HTTP responder against a mock server
//! - `config_tests`: environment-driven configuration

pub mod config_tests;
pub mod remote_tests;

use crate::models::{HistoryRecord, Tag};
use chrono::DateTime;

/// Builds a record with a fixed timestamp (`base_ms + id`).
pub(crate) fn record(id: i64, question: &str, answer: &str, tag: Tag) -> HistoryRecord {
    HistoryRecord {
        id,
        question: question.to_string(),
        answer: answer.to_string(),
        tag,
        created_at: DateTime::from_timestamp_millis(1_700_000_000_000 + id).unwrap(),
    }
}
