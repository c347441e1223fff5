use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{auth::AccessToken, id::UserId},
    repository::auth::AuthRepository,
};
use shared::error::AppResult;

use crate::redis::{
    model::{SessionKey, SessionUserId},
    RedisClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: SessionKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(|SessionUserId(user_id)| user_id))
    }

    async fn create_token(&self, user_id: UserId) -> AppResult<AccessToken> {
        let access_token = AccessToken::generate();
        let key: SessionKey = (&access_token).into();
        self.kv
            .set_ex(&key, &SessionUserId(user_id), self.ttl)
            .await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: &AccessToken) -> AppResult<Option<UserId>> {
        let key: SessionKey = access_token.into();
        let user_id = self.kv.get(&key).await?.map(|SessionUserId(id)| id);
        self.kv.delete(&key).await?;
        Ok(user_id)
    }
}
