use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use kernel::service::role::{AccessGate, GateDecision, RoleResolver};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// リクエストの前処理として、アクセストークンに紐づくユーザーを取得する
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let user = registry
            .identity_service()
            .current_session(&access_token)
            .await
            .map_err(|e| match e {
                AppError::UnauthenticatedError => AppError::UnauthorizedError,
                other => other,
            })?;

        Ok(Self { access_token, user })
    }
}

// 管理者ロールを持つユーザーだけが通過できる
pub struct AdminUser(pub AuthorizedUser);

impl AdminUser {
    pub fn id(&self) -> UserId {
        self.0.id()
    }

    pub async fn admit(resolver: &RoleResolver, user: AuthorizedUser) -> AppResult<Self> {
        match resolver.check(AccessGate::admin_only(), user.id()).await? {
            GateDecision::Granted => Ok(Self(user)),
            GateDecision::Checking | GateDecision::Redirect => {
                tracing::info!(user_id = %user.id(), "admin capability denied");
                Err(AppError::ForbiddenOperation)
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthorizedUser::from_request_parts(parts, registry).await?;
        Self::admit(registry.role_resolver(), user).await
    }
}
