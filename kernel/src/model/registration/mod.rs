use crate::model::id::{EventId, RegistrationId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub registered_at: DateTime<Utc>,
}

// プロフィール画面で使う、登録済みイベントの概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredEvent {
    pub event_id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub image: String,
    pub location: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(RegistrationId),
    AlreadyRegistered,
}
