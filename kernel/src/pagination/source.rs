use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use shared::error::AppResult;

use crate::{
    model::{
        event::Event,
        list::{Cursored, RangeQuery},
        user::User,
    },
    repository::{event::EventRepository, user::UserRepository},
};

/// An ordered collection that can be read in cursor ranges.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Cursored + Send;

    async fn fetch_range(
        &self,
        query: RangeQuery<<Self::Item as Cursored>::Cursor>,
    ) -> AppResult<Vec<Self::Item>>;
}

/// A collection whose sort key supports "starts with" lookups.
#[async_trait]
pub trait PrefixSearch: PageSource {
    async fn search_prefix(&self, prefix: &str, limit: i64) -> AppResult<Vec<Self::Item>>;
}

#[derive(new, Clone)]
pub struct EventPageSource {
    repository: Arc<dyn EventRepository>,
}

#[async_trait]
impl PageSource for EventPageSource {
    type Item = Event;

    async fn fetch_range(
        &self,
        query: RangeQuery<<Event as Cursored>::Cursor>,
    ) -> AppResult<Vec<Event>> {
        self.repository.find_range(query).await
    }
}

#[derive(new, Clone)]
pub struct UserPageSource {
    repository: Arc<dyn UserRepository>,
}

#[async_trait]
impl PageSource for UserPageSource {
    type Item = User;

    async fn fetch_range(
        &self,
        query: RangeQuery<<User as Cursored>::Cursor>,
    ) -> AppResult<Vec<User>> {
        self.repository.find_range(query).await
    }
}

#[async_trait]
impl PrefixSearch for UserPageSource {
    async fn search_prefix(&self, prefix: &str, limit: i64) -> AppResult<Vec<User>> {
        self.repository.find_by_email_prefix(prefix, limit).await
    }
}
