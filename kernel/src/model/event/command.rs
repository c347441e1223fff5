use crate::model::id::EventId;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub image: String,
    pub category: String,
    pub price: String,
}

// 指定されたフィールドだけを上書きする
#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}
