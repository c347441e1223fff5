use crate::model::{auth::AccessToken, id::UserId};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn fetch_user_id_from_token(&self, access_token: &AccessToken)
        -> AppResult<Option<UserId>>;
    async fn create_token(&self, user_id: UserId) -> AppResult<AccessToken>;
    // 削除したトークンに紐づいていたユーザー ID を返す
    async fn delete_token(&self, access_token: &AccessToken) -> AppResult<Option<UserId>>;
}
