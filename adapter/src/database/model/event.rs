use chrono::{DateTime, Utc};
use kernel::model::{event::Event, id::EventId};

#[derive(sqlx::FromRow)]
pub struct EventRow {
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

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            description,
            date,
            location,
            image,
            category,
            price,
            created_at,
            updated_at,
        } = value;
        Event {
            event_id,
            title,
            description,
            date,
            location,
            image,
            category,
            price,
            created_at,
            updated_at,
        }
    }
}
