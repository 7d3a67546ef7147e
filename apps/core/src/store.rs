//! In-memory session history.
//!
//! The store is the only place the record collection is mutated. Records are
//! kept newest first; readers reverse when they need chronological order.

use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use tracing::debug;

use crate::models::{HistoryRecord, Tag, TagFilter};

/// Upper bound (exclusive) of the random component added to the millisecond clock.
const ID_JITTER: i64 = 1000;

#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
    last_id: i64,
    revision: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a new record and returns a copy of it.
    pub fn append(&mut self, question: String, answer: String, tag: Tag) -> HistoryRecord {
        let now = Utc::now();
        let record = HistoryRecord {
            id: self.next_id(now),
            question,
            answer,
            tag,
            created_at: now.trunc_subsecs(3),
        };
        debug!(id = record.id, tag = %record.tag, "Appending history record");
        self.records.insert(0, record.clone());
        self.revision += 1;
        record
    }

    /// Removes every record. Clearing an empty store is a no-op that still counts as a mutation.
    pub fn clear(&mut self) {
        debug!(count = self.records.len(), "Clearing history");
        self.records.clear();
        self.revision += 1;
    }

    /// All records, newest first.
    pub fn all(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Records matching `filter`, newest first.
    pub fn filtered_by(&self, filter: TagFilter) -> Vec<&HistoryRecord> {
        self.records.iter().filter(|r| filter.matches(r.tag)).collect()
    }

    pub fn find(&self, id: i64) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis() + rand::thread_rng().gen_range(0..ID_JITTER);
        // Ids stay strictly increasing even if the clock goes backwards.
        let id = candidate.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
