use crate::model::{
    id::UserId,
    list::RangeQuery,
    user::{
        event::{CreateUser, UpdateUserRole},
        User, UserCursor,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    // ロールを無条件に上書きする（後勝ち）
    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()>;
    // メールアドレスの昇順でカーソル範囲を取得する
    async fn find_range(&self, query: RangeQuery<UserCursor>) -> AppResult<Vec<User>>;
    // メールアドレスの前方一致検索
    async fn find_by_email_prefix(&self, prefix: &str, limit: i64) -> AppResult<Vec<User>>;
}
