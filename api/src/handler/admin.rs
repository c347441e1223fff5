use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    event::EventCursor,
    id::{EventId, UserId},
    user::{event::UpdateUserRole, UserCursor},
};
use kernel::pagination::{fetch_page, search_page};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AdminUser,
    model::{
        event::{CreateEventRequest, EventResponse, UpdateEventRequest, UpdateEventRequestWithId},
        page::{PageQuery, PaginatedResponse},
        user::{UpdateUserRoleRequest, UpdateUserRoleRequestWithUserId, UserResponse},
    },
};

pub async fn show_admin_event_list(
    _admin: AdminUser,
    Query(query): Query<PageQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<EventResponse>>> {
    query.validate(&())?;

    let page_size = registry.pagination().resolve(query.limit);
    let navigation = query.navigation::<EventCursor>()?;
    let page = fetch_page(&registry.event_page_source(), navigation, query.page, page_size).await?;
    PaginatedResponse::browse(page).map(Json)
}

pub async fn create_event(
    admin: AdminUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    req.validate(&())?;

    let repository = registry.event_repository();
    let event_id = repository.create(req.into()).await?;
    tracing::info!(%event_id, created_by = %admin.id(), "event created");
    let event = repository.find_by_id(event_id).await?.ok_or_else(|| {
        AppError::EntityNotFound(format!("イベント（{event_id}）が見つかりませんでした。"))
    })?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn update_event(
    admin: AdminUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .event_repository()
        .update(UpdateEventRequestWithId::new(event_id, req).into())
        .await?;
    tracing::info!(%event_id, updated_by = %admin.id(), "event updated");
    Ok(StatusCode::OK)
}

pub async fn show_admin_user_list(
    _admin: AdminUser,
    Query(query): Query<PageQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<UserResponse>>> {
    query.validate(&())?;

    let page_size = registry.pagination().resolve(query.limit);
    let source = registry.user_page_source();
    // 検索中はカーソルによるページ送りを行わない
    if let Some(prefix) = query.search_prefix() {
        let page = search_page(&source, prefix, page_size).await?;
        return Ok(Json(PaginatedResponse::search(page)));
    }
    let navigation = query.navigation::<UserCursor>()?;
    let page = fetch_page(&source, navigation, query.page, page_size).await?;
    PaginatedResponse::browse(page).map(Json)
}

pub async fn change_role(
    _admin: AdminUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> AppResult<StatusCode> {
    let update = UpdateUserRole::from(UpdateUserRoleRequestWithUserId::new(user_id, req));
    registry
        .role_resolver()
        .set_role(update.user_id, update.role)
        .await
        .map(|_| StatusCode::OK)
}
