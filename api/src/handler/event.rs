use axum::{
    extract::{Path, Query, State},
    Json,
};
use kernel::model::id::EventId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::event::{EventListQuery, EventResponse, EventsResponse};

pub async fn show_event_list(
    Query(query): Query<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_all(query.into())
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|e| match e {
            Some(e) => Ok(Json(e.into())),
            None => Err(AppError::EntityNotFound(format!(
                "イベント（{event_id}）が見つかりませんでした。"
            ))),
        })
}
