use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, SignInRequest},
        user::UserResponse,
    },
};

pub async fn sign_in(
    State(registry): State<AppRegistry>,
    Json(req): Json<SignInRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;

    registry
        .identity_service()
        .sign_in(&req.id_token)
        .await
        .map(AccessTokenResponse::from)
        .map(Json)
}

pub async fn sign_out(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .identity_service()
        .sign_out(&user.access_token)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn show_session(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}
