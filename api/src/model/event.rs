use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        Event, EventSearch,
    },
    id::EventId,
};
use serde::{Deserialize, Deserializer, Serialize};

fn default_price() -> String {
    "Free".into()
}

// 前後の空白を除いてから検証する
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn trimmed_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(chars, min = 3))]
    #[serde(deserialize_with = "trimmed")]
    pub title: String,
    #[garde(length(chars, min = 10))]
    #[serde(deserialize_with = "trimmed")]
    pub description: String,
    #[garde(skip)]
    pub date: DateTime<Utc>,
    #[garde(length(chars, min = 1))]
    #[serde(deserialize_with = "trimmed")]
    pub location: String,
    #[garde(url)]
    #[serde(deserialize_with = "trimmed")]
    pub image: String,
    #[garde(length(chars, min = 1))]
    #[serde(deserialize_with = "trimmed")]
    pub category: String,
    #[garde(length(chars, min = 1))]
    #[serde(default = "default_price", deserialize_with = "trimmed")]
    pub price: String,
}

impl From<CreateEventRequest> for CreateEvent {
    fn from(value: CreateEventRequest) -> Self {
        let CreateEventRequest {
            title,
            description,
            date,
            location,
            image,
            category,
            price,
        } = value;
        CreateEvent {
            title,
            description,
            date,
            location,
            image,
            category,
            price,
        }
    }
}

// 指定されたフィールドだけを検証・更新する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(chars, min = 3))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub title: Option<String>,
    #[garde(length(chars, min = 10))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub description: Option<String>,
    #[garde(skip)]
    pub date: Option<DateTime<Utc>>,
    #[garde(length(chars, min = 1))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub location: Option<String>,
    #[garde(url)]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub image: Option<String>,
    #[garde(length(chars, min = 1))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub category: Option<String>,
    #[garde(length(chars, min = 1))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub price: Option<String>,
}

#[derive(new)]
pub struct UpdateEventRequestWithId(EventId, UpdateEventRequest);

impl From<UpdateEventRequestWithId> for UpdateEvent {
    fn from(value: UpdateEventRequestWithId) -> Self {
        let UpdateEventRequestWithId(
            event_id,
            UpdateEventRequest {
                title,
                description,
                date,
                location,
                image,
                category,
                price,
            },
        ) = value;
        UpdateEvent {
            event_id,
            title,
            description,
            date,
            location,
            image,
            category,
            price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl From<EventListQuery> for EventSearch {
    fn from(value: EventListQuery) -> Self {
        EventSearch::new(value.q, value.category)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
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

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
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
        Self {
            id: event_id,
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(overrides: serde_json::Value) -> CreateEventRequest {
        let mut body = json!({
            "title": "Tech Summit",
            "description": "Explore the latest breakthroughs",
            "date": "2025-09-01T10:00:00Z",
            "location": "Convention Center",
            "image": "https://example.com/e.png",
            "category": "AI",
        });
        if let (Some(body), Some(overrides)) = (body.as_object_mut(), overrides.as_object()) {
            for (k, v) in overrides {
                body.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn price_defaults_to_free() {
        let req = request(json!({}));
        assert!(req.validate(&()).is_ok());
        assert_eq!(req.price, "Free");
    }

    #[test]
    fn short_title_and_bad_image_are_rejected() {
        assert!(request(json!({ "title": "AI" })).validate(&()).is_err());
        assert!(request(json!({ "description": "short" })).validate(&()).is_err());
        assert!(request(json!({ "image": "not a url" })).validate(&()).is_err());
        assert!(request(json!({ "category": "" })).validate(&()).is_err());
    }

    #[test]
    fn update_validates_only_supplied_fields() {
        let empty: UpdateEventRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.validate(&()).is_ok());

        let bad: UpdateEventRequest = serde_json::from_value(json!({ "title": "x" })).unwrap();
        assert!(bad.validate(&()).is_err());

        let event: UpdateEvent =
            UpdateEventRequestWithId::new(EventId::new(), serde_json::from_value(json!({ "price": "$5" })).unwrap()).into();
        assert_eq!(event.price.as_deref(), Some("$5"));
        assert!(event.title.is_none());
    }

    #[test]
    fn lengths_count_characters_after_trimming() {
        assert!(request(json!({ "title": "日本" })).validate(&()).is_err());
        assert!(request(json!({ "title": "日本語" })).validate(&()).is_ok());
        assert!(request(json!({ "location": "   " })).validate(&()).is_err());
        assert!(request(json!({ "description": "          x" })).validate(&()).is_err());

        let req = request(json!({ "title": "  Rust Meetup  " }));
        assert!(req.validate(&()).is_ok());
        assert_eq!(req.title, "Rust Meetup");
    }

    #[test]
    fn update_rejects_whitespace_padded_short_values() {
        let padded: UpdateEventRequest =
            serde_json::from_value(json!({ "title": " x " })).unwrap();
        assert!(padded.validate(&()).is_err());

        let blank: UpdateEventRequest =
            serde_json::from_value(json!({ "category": "  " })).unwrap();
        assert!(blank.validate(&()).is_err());

        let null: UpdateEventRequest = serde_json::from_value(json!({ "title": null })).unwrap();
        assert!(null.title.is_none());
        assert!(null.validate(&()).is_ok());
    }
}
