use crate::model::{
    id::{EventId, UserId},
    registration::{event::CreateRegistration, RegisteredEvent, Registration, RegistrationOutcome},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // (user_id, event_id) の組がまだ無い場合だけ登録する。判定と登録は不可分に行う
    async fn create_if_absent(&self, event: CreateRegistration) -> AppResult<RegistrationOutcome>;
    async fn find_by_user_and_event(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> AppResult<Option<Registration>>;
    // ユーザーが登録したイベントを登録日時の新しい順に取得する
    async fn find_events_by_user_id(&self, user_id: UserId) -> AppResult<Vec<RegisteredEvent>>;
}
