use crate::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        Event, EventCursor, EventSearch,
    },
    id::EventId,
    list::RangeQuery,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    // イベントを登録する
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    // 指定されたフィールドだけを更新する
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    // 公開一覧。キーワードとカテゴリで絞り込む
    async fn find_all(&self, search: EventSearch) -> AppResult<Vec<Event>>;
    // 作成日時の降順でカーソル範囲を取得する
    async fn find_range(&self, query: RangeQuery<EventCursor>) -> AppResult<Vec<Event>>;
}
