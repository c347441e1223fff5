//! In-memory ordered collections for exercising the paging code.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use shared::error::{AppError, AppResult};
use tokio::sync::oneshot;

use super::{PageSource, PrefixSearch};
use crate::model::{
    event::Event,
    id::{EventId, UserId},
    list::{Cursored, RangeQuery, SortOrder},
    role::Role,
    user::User,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Numbered(pub u32);

impl Cursored for Numbered {
    type Cursor = u32;

    const ORDER: SortOrder = SortOrder::Ascending;

    fn cursor(&self) -> u32 {
        self.0
    }
}

pub(crate) fn numbered(range: std::ops::RangeInclusive<u32>) -> Vec<Numbered> {
    range.map(Numbered).collect()
}

// e1 が最新。作成日時は 1 分ずつ古くなる
pub(crate) fn sample_events(count: u32) -> Vec<Event> {
    let newest = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
    (1..=count)
        .map(|i| {
            let created_at = newest - Duration::minutes(i as i64);
            Event {
                event_id: EventId::new(),
                title: format!("e{i}"),
                description: "Explore the latest breakthroughs".into(),
                date: created_at + Duration::days(30),
                location: "Convention Center".into(),
                image: "https://example.com/e.png".into(),
                category: "AI".into(),
                price: "Free".into(),
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

pub(crate) fn sample_users() -> Vec<User> {
    [
        "zed@example.com",
        "alice@example.com",
        "carol@example.com",
        "malice@example.com",
        "bob@example.com",
        "alice.b@example.com",
    ]
    .into_iter()
    .map(|email| User {
        user_id: UserId::new(),
        email: email.into(),
        role: Role::User,
        display_name: None,
    })
    .collect()
}

fn listed<T: Cursored>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|a| a.cursor());
    if T::ORDER == SortOrder::Descending {
        items.reverse();
    }
    items
}

// 並び順の上で cursor より後ろにあるか
fn comes_after<T: Cursored>(item: &T, cursor: &T::Cursor) -> bool {
    match T::ORDER {
        SortOrder::Ascending => item.cursor() > *cursor,
        SortOrder::Descending => item.cursor() < *cursor,
    }
}

fn comes_before<T: Cursored>(item: &T, cursor: &T::Cursor) -> bool {
    match T::ORDER {
        SortOrder::Ascending => item.cursor() < *cursor,
        SortOrder::Descending => item.cursor() > *cursor,
    }
}

fn select<T: Cursored + Clone>(items: &[T], query: &RangeQuery<T::Cursor>) -> Vec<T> {
    let limit = query.limit().max(0) as usize;
    match query {
        RangeQuery::First { .. } => items.iter().take(limit).cloned().collect(),
        RangeQuery::After { cursor, .. } => items
            .iter()
            .filter(|i| comes_after(*i, cursor))
            .take(limit)
            .cloned()
            .collect(),
        RangeQuery::Before { cursor, .. } => {
            let before: Vec<T> = items
                .iter()
                .filter(|i| comes_before(*i, cursor))
                .cloned()
                .collect();
            let skip = before.len().saturating_sub(limit);
            before.into_iter().skip(skip).collect()
        }
    }
}

pub(crate) struct MemorySource<T> {
    items: Mutex<Vec<T>>,
    pub calls: AtomicUsize,
    pub fail_next: AtomicBool,
}

impl<T: Cursored + Clone> MemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(listed(items)),
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn retain(&self, f: impl FnMut(&T) -> bool) {
        self.items.lock().unwrap().retain(f);
    }

    fn answer(&self, query: &RangeQuery<T::Cursor>) -> AppResult<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::SpecificOperationError(sqlx::Error::PoolTimedOut));
        }
        Ok(select(&self.items.lock().unwrap(), query))
    }
}

#[async_trait]
impl<T> PageSource for MemorySource<T>
where
    T: Cursored + Clone + Send + Sync,
{
    type Item = T;

    async fn fetch_range(&self, query: RangeQuery<T::Cursor>) -> AppResult<Vec<T>> {
        self.answer(&query)
    }
}

#[async_trait]
impl PrefixSearch for MemorySource<User> {
    async fn search_prefix(&self, prefix: &str, limit: i64) -> AppResult<Vec<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email.starts_with(prefix))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

/// Holds each response until the test releases it, so completions can be
/// delivered in any order.
pub(crate) struct GatedSource<T> {
    inner: MemorySource<T>,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    gated_calls: AtomicUsize,
    failing_call: Mutex<Option<usize>>,
}

impl<T: Cursored + Clone> GatedSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            inner: MemorySource::new(items),
            gates: Mutex::new(VecDeque::new()),
            gated_calls: AtomicUsize::new(0),
            failing_call: Mutex::new(None),
        }
    }

    /// Gates the next two fetches. Returns the releases in issue order.
    pub fn gate_pair(&self) -> (oneshot::Sender<()>, oneshot::Sender<()>) {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let mut gates = self.gates.lock().unwrap();
        gates.push_back(first_rx);
        gates.push_back(second_rx);
        (first_tx, second_tx)
    }

    pub fn fail_gated_call(&self, index: usize) {
        *self.failing_call.lock().unwrap() = Some(index);
    }
}

#[async_trait]
impl<T> PageSource for GatedSource<T>
where
    T: Cursored + Clone + Send + Sync,
{
    type Item = T;

    async fn fetch_range(&self, query: RangeQuery<T::Cursor>) -> AppResult<Vec<T>> {
        let gate = self.gates.lock().unwrap().pop_front();
        let Some(gate) = gate else {
            return self.inner.answer(&query);
        };
        let index = self.gated_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.inner.answer(&query);
        gate.await.ok();
        if *self.failing_call.lock().unwrap() == Some(index) {
            return Err(AppError::SpecificOperationError(sqlx::Error::PoolTimedOut));
        }
        result
    }
}
