use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    id::{EventId, UserId},
    registration::RegistrationOutcome,
};
use kernel::service::registration::RegistrationWorkflow;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::registration::{
        RegisteredEventsResponse, RegistrationResponse, RegistrationStatusResponse,
    },
};

pub async fn register_for_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    register_with_status(registry.registration_workflow(), user.id(), event_id).await
}

// 新規登録は 201、登録済みなら 200 を返す
async fn register_with_status(
    workflow: &RegistrationWorkflow,
    user_id: UserId,
    event_id: EventId,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    let outcome = workflow.register(user_id, event_id).await?;
    let status = match outcome {
        RegistrationOutcome::Registered(_) => StatusCode::CREATED,
        RegistrationOutcome::AlreadyRegistered => StatusCode::OK,
    };
    Ok((status, Json(outcome.into())))
}

pub async fn show_registration_status(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationStatusResponse>> {
    registry
        .registration_workflow()
        .is_registered(user.id(), event_id)
        .await
        .map(|registered| Json(RegistrationStatusResponse { registered }))
}

pub async fn show_my_registrations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegisteredEventsResponse>> {
    registry
        .registration_workflow()
        .registered_events(user.id())
        .await
        .map(RegisteredEventsResponse::from)
        .map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_event, FixedEvents, MemoryRegistrations};
    use shared::error::AppError;
    use std::sync::Arc;

    fn workflow_with(events: Vec<kernel::model::event::Event>) -> RegistrationWorkflow {
        RegistrationWorkflow::new(
            Arc::new(FixedEvents::new(events)),
            Arc::new(MemoryRegistrations::default()),
        )
    }

    #[tokio::test]
    async fn first_registration_is_created_then_repeat_is_ok() -> AppResult<()> {
        let event = sample_event();
        let event_id = event.event_id;
        let workflow = workflow_with(vec![event]);
        let user_id = UserId::new();

        let (status, Json(body)) = register_with_status(&workflow, user_id, event_id).await?;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.registration_id.is_some());
        assert!(!body.already_registered);

        let (status, Json(body)) = register_with_status(&workflow, user_id, event_id).await?;
        assert_eq!(status, StatusCode::OK);
        assert!(body.registration_id.is_none());
        assert!(body.already_registered);
        Ok(())
    }

    #[tokio::test]
    async fn another_user_gets_their_own_registration() -> AppResult<()> {
        let event = sample_event();
        let event_id = event.event_id;
        let workflow = workflow_with(vec![event]);

        let (first, _) = register_with_status(&workflow, UserId::new(), event_id).await?;
        let (second, _) = register_with_status(&workflow, UserId::new(), event_id).await?;
        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CREATED);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let workflow = workflow_with(vec![]);

        let result = register_with_status(&workflow, UserId::new(), EventId::new()).await;
        assert!(matches!(result, Err(AppError::EntityNotFound(_))));
    }
}
