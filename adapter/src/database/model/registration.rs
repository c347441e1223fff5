use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::{RegisteredEvent, Registration},
};

#[derive(sqlx::FromRow)]
pub struct RegistrationRow {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub registered_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(value: RegistrationRow) -> Self {
        let RegistrationRow {
            registration_id,
            user_id,
            event_id,
            registered_at,
        } = value;
        Registration {
            registration_id,
            user_id,
            event_id,
            registered_at,
        }
    }
}

// registrations と events を結合した行
#[derive(sqlx::FromRow)]
pub struct RegisteredEventRow {
    pub event_id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub image: String,
    pub location: String,
    pub registered_at: DateTime<Utc>,
}

impl From<RegisteredEventRow> for RegisteredEvent {
    fn from(value: RegisteredEventRow) -> Self {
        let RegisteredEventRow {
            event_id,
            title,
            date,
            image,
            location,
            registered_at,
        } = value;
        RegisteredEvent {
            event_id,
            title,
            date,
            image,
            location,
            registered_at,
        }
    }
}
