use crate::model::{
    id::EventId,
    list::{Cursored, SortOrder},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub image: String,
    pub category: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// イベント一覧は作成日時の降順、同時刻は ID の降順で並べる
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCursor {
    pub created_at: DateTime<Utc>,
    pub event_id: EventId,
}

impl Cursored for Event {
    type Cursor = EventCursor;

    const ORDER: SortOrder = SortOrder::Descending;

    fn cursor(&self) -> Self::Cursor {
        EventCursor {
            created_at: self.created_at,
            event_id: self.event_id,
        }
    }
}

/// Catalogue filter used by the public event listing.
#[derive(Debug, Clone, Default)]
pub struct EventSearch {
    pub keyword: Option<String>,
    pub category: Option<String>,
}

impl EventSearch {
    pub fn new(keyword: Option<String>, category: Option<String>) -> Self {
        let keyword = keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        // "all" はカテゴリ絞り込みなしと同じ扱い
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
        Self { keyword, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ignores_blank_keyword_and_all_category() {
        let search = EventSearch::new(Some("   ".into()), Some("All".into()));
        assert!(search.keyword.is_none());
        assert!(search.category.is_none());

        let search = EventSearch::new(Some(" rust ".into()), Some("AI".into()));
        assert_eq!(search.keyword.as_deref(), Some("rust"));
        assert_eq!(search.category.as_deref(), Some("AI"));
    }
}
