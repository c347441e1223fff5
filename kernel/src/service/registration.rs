use std::sync::Arc;

use chrono::Utc;
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        id::{EventId, UserId},
        registration::{event::CreateRegistration, RegisteredEvent, RegistrationOutcome},
    },
    repository::{event::EventRepository, registration::RegistrationRepository},
};

#[derive(Clone, new)]
pub struct RegistrationWorkflow {
    event_repository: Arc<dyn EventRepository>,
    registration_repository: Arc<dyn RegistrationRepository>,
}

impl RegistrationWorkflow {
    /// Registers the user for the event unless already registered.
    ///
    /// The existence check and the insert are a single conditional write in
    /// the store, so repeated submissions never create a second record.
    pub async fn register(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> AppResult<RegistrationOutcome> {
        if self.event_repository.find_by_id(event_id).await?.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{event_id}）が見つかりませんでした。"
            )));
        }

        let outcome = self
            .registration_repository
            .create_if_absent(CreateRegistration::new(user_id, event_id, Utc::now()))
            .await?;

        match outcome {
            RegistrationOutcome::Registered(registration_id) => {
                tracing::info!(%user_id, %event_id, %registration_id, "registered for event")
            }
            RegistrationOutcome::AlreadyRegistered => {
                tracing::debug!(%user_id, %event_id, "already registered for event")
            }
        }
        Ok(outcome)
    }

    pub async fn is_registered(&self, user_id: UserId, event_id: EventId) -> AppResult<bool> {
        self.registration_repository
            .find_by_user_and_event(user_id, event_id)
            .await
            .map(|r| r.is_some())
    }

    pub async fn registered_events(&self, user_id: UserId) -> AppResult<Vec<RegisteredEvent>> {
        self.registration_repository
            .find_events_by_user_id(user_id)
            .await
    }
}
