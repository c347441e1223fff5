//! Fixed in-memory repositories for handler and extractor tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use kernel::model::{
    auth::AccessToken,
    event::{
        command::{CreateEvent, UpdateEvent},
        Event, EventCursor, EventSearch,
    },
    id::{EventId, RegistrationId, UserId},
    list::RangeQuery,
    registration::{
        event::CreateRegistration, RegisteredEvent, Registration, RegistrationOutcome,
    },
    role::Role,
    user::{
        event::{CreateUser, UpdateUserRole},
        User, UserCursor,
    },
};
use kernel::repository::{
    event::EventRepository, registration::RegistrationRepository, user::UserRepository,
};
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;

pub(crate) fn signed_in(email: &str, role: Role) -> AuthorizedUser {
    AuthorizedUser {
        access_token: AccessToken::generate(),
        user: User {
            user_id: UserId::new(),
            email: email.into(),
            role,
            display_name: None,
        },
    }
}

pub(crate) fn sample_event() -> Event {
    let now = Utc::now();
    Event {
        event_id: EventId::new(),
        title: "Tech Summit".into(),
        description: "Explore the latest breakthroughs".into(),
        date: now,
        location: "Convention Center".into(),
        image: "https://example.com/e.png".into(),
        category: "AI".into(),
        price: "Free".into(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(derive_new::new)]
pub(crate) struct FixedUsers {
    users: Vec<User>,
}

#[async_trait]
impl UserRepository for FixedUsers {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.user_id == current_user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, _event: CreateUser) -> AppResult<User> {
        unreachable!("users are fixed")
    }

    async fn update_role(&self, _event: UpdateUserRole) -> AppResult<()> {
        unreachable!("users are fixed")
    }

    async fn find_range(&self, _query: RangeQuery<UserCursor>) -> AppResult<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn find_by_email_prefix(&self, prefix: &str, _limit: i64) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.email.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[derive(derive_new::new)]
pub(crate) struct FixedEvents {
    events: Vec<Event>,
}

#[async_trait]
impl EventRepository for FixedEvents {
    async fn create(&self, _event: CreateEvent) -> AppResult<EventId> {
        unreachable!("events are fixed")
    }

    async fn update(&self, _event: UpdateEvent) -> AppResult<()> {
        unreachable!("events are fixed")
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        Ok(self.events.iter().find(|e| e.event_id == event_id).cloned())
    }

    async fn find_all(&self, _search: EventSearch) -> AppResult<Vec<Event>> {
        Ok(self.events.clone())
    }

    async fn find_range(&self, _query: RangeQuery<EventCursor>) -> AppResult<Vec<Event>> {
        Ok(self.events.clone())
    }
}

#[derive(Default)]
pub(crate) struct MemoryRegistrations {
    pairs: Mutex<HashSet<(UserId, EventId)>>,
}

#[async_trait]
impl RegistrationRepository for MemoryRegistrations {
    async fn create_if_absent(&self, event: CreateRegistration) -> AppResult<RegistrationOutcome> {
        let inserted = self
            .pairs
            .lock()
            .unwrap()
            .insert((event.user_id, event.event_id));
        Ok(if inserted {
            RegistrationOutcome::Registered(RegistrationId::new())
        } else {
            RegistrationOutcome::AlreadyRegistered
        })
    }

    async fn find_by_user_and_event(
        &self,
        _user_id: UserId,
        _event_id: EventId,
    ) -> AppResult<Option<Registration>> {
        Ok(None)
    }

    async fn find_events_by_user_id(&self, _user_id: UserId) -> AppResult<Vec<RegisteredEvent>> {
        Ok(vec![])
    }
}
