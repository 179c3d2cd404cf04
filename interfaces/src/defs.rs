use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional inclusive date bounds for a search. Both absent means "recent".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SearchWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

/// A classified, deduplicated search hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Canonical link: `link` without its query string.
    pub id: String,
    pub title: String,
    pub link: String,
    pub pub_date: NaiveDate,
    pub pub_date_display: String,
    pub source: String,
    pub snippet: String,
    pub sortable_date: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrichmentState {
    Pending,
    Resolved,
    Failed,
}

impl EnrichmentState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, EnrichmentState::Pending)
    }
}

/// A result the user accepted into the report.
///
/// `key` is the canonical link of the originating `ResultItem`; `id` is
/// generated per selection so a re-selected link is a distinct record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedRecord {
    pub id: Uuid,
    pub key: String,
    pub title: String,
    pub source: String,
    pub summary: String,
    pub content: String,
    pub link: String,
    pub original_link: String,
    pub date: NaiveDate,
    pub position: u64,
    pub state: EnrichmentState,
}

