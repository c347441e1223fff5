use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId},
    registration::{RegisteredEvent, RegistrationOutcome},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<RegistrationId>,
    pub already_registered: bool,
}

impl From<RegistrationOutcome> for RegistrationResponse {
    fn from(value: RegistrationOutcome) -> Self {
        match value {
            RegistrationOutcome::Registered(id) => Self {
                registration_id: Some(id),
                already_registered: false,
            },
            RegistrationOutcome::AlreadyRegistered => Self {
                registration_id: None,
                already_registered: true,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegistrationStatusResponse {
    pub registered: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredEventResponse {
    pub event_id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub image: String,
    pub location: String,
    pub registered_at: DateTime<Utc>,
}

impl From<RegisteredEvent> for RegisteredEventResponse {
    fn from(value: RegisteredEvent) -> Self {
        let RegisteredEvent {
            event_id,
            title,
            date,
            image,
            location,
            registered_at,
        } = value;
        Self {
            event_id,
            title,
            date,
            image,
            location,
            registered_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredEventsResponse {
    pub items: Vec<RegisteredEventResponse>,
}

impl From<Vec<RegisteredEvent>> for RegisteredEventsResponse {
    fn from(value: Vec<RegisteredEvent>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(RegisteredEventResponse::from)
                .collect(),
        }
    }
}
