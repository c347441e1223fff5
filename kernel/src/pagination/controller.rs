//! Client-side half of keyset pagination.
//!
//! [`ListController`] drives the stateless [`super::fetch_page`] contract from
//! the caller's side: it remembers the boundary cursors of the page on screen,
//! turns next/prev into range requests, and drops responses that were
//! overtaken by a newer request.

use shared::error::AppResult;
use tokio::sync::Mutex;

use super::{shape, shape_search, Direction, Navigation, Page, PageSource, PrefixSearch, Shaped};
use crate::model::list::Cursored;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode {
    Browse,
    Search(String),
}

/// What happened to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The response replaced the displayed page.
    Applied,
    /// The store had nothing further; the displayed page was kept.
    NoFurtherPage,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The move is not available from the current state. Nothing was fetched.
    Skipped,
}

/// Snapshot of what a list view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub loading: bool,
    pub mode: ListMode,
}

impl<T> ListView<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // 検索中と空の一覧ではページ送りを出さない
    pub fn controls_visible(&self) -> bool {
        !self.items.is_empty() && self.mode == ListMode::Browse
    }
}

struct ListState<T: Cursored> {
    page: Page<T>,
    first_cursor: Option<T::Cursor>,
    last_cursor: Option<T::Cursor>,
    mode: ListMode,
    // 最後に発行したリクエストの番号。これと一致する応答だけを反映する
    issued: u64,
    in_flight: Option<u64>,
}

impl<T: Cursored> ListState<T> {
    fn new() -> Self {
        Self {
            page: Page::empty(),
            first_cursor: None,
            last_cursor: None,
            mode: ListMode::Browse,
            issued: 0,
            in_flight: None,
        }
    }

    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        self.issued
    }

    fn show(&mut self, page: Page<T>, mode: ListMode) {
        // 検索結果のカーソルは一覧の位置を表さないので保持しない
        if mode == ListMode::Browse {
            self.first_cursor = page.first_cursor();
            self.last_cursor = page.last_cursor();
        } else {
            self.first_cursor = None;
            self.last_cursor = None;
        }
        self.page = page;
        self.mode = mode;
    }

    fn apply_browse(&mut self, direction: Direction, fetched: Vec<T>, page_size: i64) -> Settled {
        match shape(direction, fetched, page_size, self.page.page_number) {
            Shaped::Page(page) => {
                self.show(page, ListMode::Browse);
                Settled::Applied
            }
            Shaped::End => {
                // 前方向の終端は呼び出し側で先頭ページを読み直す
                if direction == Direction::Next {
                    self.page.has_next = false;
                }
                Settled::NoFurtherPage
            }
        }
    }
}

/// Client-side controller for one paginated list view.
///
/// Holds the cursor state of the last page that was fetched successfully.
/// Requests may overlap; each one is tagged and only the response to the
/// latest request is applied. A failed request leaves the displayed page
/// and cursors as they were.
pub struct ListController<S: PageSource> {
    source: S,
    page_size: i64,
    state: Mutex<ListState<S::Item>>,
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S, page_size: i64) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            state: Mutex::new(ListState::new()),
        }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub async fn view(&self) -> ListView<S::Item>
    where
        S::Item: Clone,
    {
        let state = self.state.lock().await;
        ListView {
            items: state.page.items.clone(),
            page_number: state.page.page_number,
            has_next: state.page.has_next,
            has_prev: state.page.has_prev,
            loading: state.in_flight.is_some(),
            mode: state.mode.clone(),
        }
    }

    pub async fn load_initial(&self) -> AppResult<Settled> {
        let ticket = self.state.lock().await.issue();
        self.browse(ticket, Navigation::Initial).await
    }

    /// Same as [`Self::load_initial`]; used after the collection was edited.
    pub async fn refresh(&self) -> AppResult<Settled> {
        self.load_initial().await
    }

    pub async fn load_next(&self) -> AppResult<Settled> {
        let (ticket, cursor) = {
            let mut state = self.state.lock().await;
            if state.mode != ListMode::Browse || !state.page.has_next {
                return Ok(Settled::Skipped);
            }
            let Some(cursor) = state.last_cursor.clone() else {
                return Ok(Settled::Skipped);
            };
            (state.issue(), cursor)
        };
        self.browse(ticket, Navigation::Next(cursor)).await
    }

    pub async fn load_prev(&self) -> AppResult<Settled> {
        let (ticket, cursor) = {
            let mut state = self.state.lock().await;
            if state.mode != ListMode::Browse || !state.page.has_prev {
                return Ok(Settled::Skipped);
            }
            let Some(cursor) = state.first_cursor.clone() else {
                return Ok(Settled::Skipped);
            };
            (state.issue(), cursor)
        };
        self.browse(ticket, Navigation::Prev(cursor)).await
    }

    /// Shows a single page of prefix matches. A blank prefix clears the search.
    pub async fn search(&self, prefix: &str) -> AppResult<Settled>
    where
        S: PrefixSearch,
    {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return self.clear_search().await;
        }

        let ticket = self.state.lock().await.issue();
        let result = self.source.search_prefix(prefix, self.page_size + 1).await;
        let page_size = self.page_size;
        let mode = ListMode::Search(prefix.to_string());
        self.settle(ticket, result, move |state, fetched| {
            state.show(shape_search(fetched, page_size), mode);
            Settled::Applied
        })
        .await
    }

    pub async fn clear_search(&self) -> AppResult<Settled> {
        self.load_initial().await
    }

    async fn browse(
        &self,
        ticket: u64,
        navigation: Navigation<<S::Item as Cursored>::Cursor>,
    ) -> AppResult<Settled> {
        let direction = navigation.direction();
        let page_size = self.page_size;
        let result = self
            .source
            .fetch_range(navigation.into_range(page_size))
            .await;
        let settled = self
            .settle(ticket, result, move |state, fetched| {
                state.apply_browse(direction, fetched, page_size)
            })
            .await?;
        if direction == Direction::Prev && settled == Settled::NoFurtherPage {
            self.load_initial().await?;
        }
        Ok(settled)
    }

    async fn settle<F>(
        &self,
        ticket: u64,
        result: AppResult<Vec<S::Item>>,
        apply: F,
    ) -> AppResult<Settled>
    where
        F: FnOnce(&mut ListState<S::Item>, Vec<S::Item>) -> Settled,
    {
        let mut state = self.state.lock().await;
        if state.issued != ticket {
            tracing::debug!(ticket, latest = state.issued, "discarding stale page response");
            return Ok(Settled::Stale);
        }
        // 成功・失敗どちらでも読み込み中の状態を解除する
        state.in_flight = None;

        match result {
            Ok(fetched) => Ok(apply(&mut *state, fetched)),
            Err(e) => {
                tracing::error!(
                    error.message = %e,
                    page = state.page.page_number,
                    "failed to load page; keeping the current one"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::User;
    use crate::pagination::testing::{
        numbered, sample_events, sample_users, GatedSource, MemorySource, Numbered,
    };
    use rstest::rstest;
    use std::sync::atomic::Ordering;

    fn keys(view: &ListView<Numbered>) -> Vec<u32> {
        view.items.iter().map(|n| n.0).collect()
    }

    fn titles(view: &ListView<crate::model::event::Event>) -> Vec<String> {
        view.items.iter().map(|e| e.title.clone()).collect()
    }

    fn event_names(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
        range.map(|i| format!("e{i}")).collect()
    }

    #[tokio::test]
    async fn twenty_five_events_in_pages_of_ten() -> AppResult<()> {
        let controller = ListController::new(MemorySource::new(sample_events(25)), 10);

        controller.load_initial().await?;
        let view = controller.view().await;
        assert_eq!(titles(&view), event_names(1..=10));
        assert!(view.has_next);
        assert!(!view.has_prev);

        controller.load_next().await?;
        let view = controller.view().await;
        assert_eq!(titles(&view), event_names(11..=20));
        assert!(view.has_next);
        assert!(view.has_prev);

        controller.load_next().await?;
        let view = controller.view().await;
        assert_eq!(titles(&view), event_names(21..=25));
        assert!(!view.has_next);
        assert!(view.has_prev);
        assert_eq!(view.page_number, 3);
        Ok(())
    }

    #[rstest]
    #[case(0, 3)]
    #[case(1, 3)]
    #[case(3, 3)]
    #[case(7, 3)]
    #[case(9, 3)]
    #[case(25, 10)]
    #[case(10, 1)]
    #[tokio::test]
    async fn walking_forward_and_back_matches_chunking(
        #[case] total: u32,
        #[case] page_size: i64,
    ) -> AppResult<()> {
        let all: Vec<u32> = (1..=total).collect();
        let chunks: Vec<Vec<u32>> = all.chunks(page_size as usize).map(|c| c.to_vec()).collect();
        let controller = ListController::new(MemorySource::new(numbered(1..=total)), page_size);

        controller.load_initial().await?;
        let mut seen = Vec::new();
        loop {
            let view = controller.view().await;
            seen.push(keys(&view));
            assert_eq!(view.has_prev, view.page_number > 1);
            if !view.has_next {
                break;
            }
            controller.load_next().await?;
        }
        if total == 0 {
            assert_eq!(seen, vec![Vec::<u32>::new()]);
            assert!(!controller.view().await.controls_visible());
            return Ok(());
        }
        assert_eq!(seen, chunks);

        // 末尾から先頭まで戻る
        let mut back = vec![keys(&controller.view().await)];
        while controller.view().await.has_prev {
            controller.load_prev().await?;
            back.push(keys(&controller.view().await));
        }
        back.reverse();
        assert_eq!(back, chunks);
        let view = controller.view().await;
        assert_eq!(view.page_number, 1);
        assert!(!view.has_prev);
        assert_eq!(view.has_next, chunks.len() > 1);
        Ok(())
    }

    #[tokio::test]
    async fn next_is_skipped_without_a_further_page() -> AppResult<()> {
        let source = MemorySource::new(numbered(1..=3));
        let controller = ListController::new(source, 5);
        controller.load_initial().await?;
        assert_eq!(controller.load_next().await?, Settled::Skipped);
        assert_eq!(controller.load_prev().await?, Settled::Skipped);
        assert_eq!(controller.source.calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn emptied_collection_reports_no_further_page() -> AppResult<()> {
        let source = MemorySource::new(numbered(1..=4));
        let controller = ListController::new(source, 2);
        controller.load_initial().await?;
        controller.source.retain(|n| n.0 <= 2);

        assert_eq!(controller.load_next().await?, Settled::NoFurtherPage);
        let view = controller.view().await;
        assert_eq!(keys(&view), vec![1, 2]);
        assert!(!view.has_next);
        assert!(!view.loading);
        Ok(())
    }

    #[tokio::test]
    async fn emptied_front_reloads_the_first_page() -> AppResult<()> {
        let source = MemorySource::new(numbered(1..=6));
        let controller = ListController::new(source, 2);
        controller.load_initial().await?;
        controller.load_next().await?;
        controller.load_next().await?;
        controller.source.retain(|n| n.0 >= 5);

        assert_eq!(controller.load_prev().await?, Settled::NoFurtherPage);
        let view = controller.view().await;
        assert_eq!(keys(&view), vec![5, 6]);
        assert_eq!(view.page_number, 1);
        assert!(!view.has_prev);
        assert!(!view.has_next);
        assert!(!view.loading);
        Ok(())
    }

    #[tokio::test]
    async fn failure_keeps_page_and_cursors() -> AppResult<()> {
        let source = MemorySource::new(numbered(1..=9));
        let controller = ListController::new(source, 3);
        controller.load_initial().await?;
        controller.load_next().await?;
        let before = controller.view().await;

        controller.source.fail_next.store(true, Ordering::SeqCst);
        assert!(controller.load_next().await.is_err());

        let after = controller.view().await;
        assert_eq!(after, before);
        assert!(!after.loading);

        // 失敗後も直前のカーソルから続けられる
        controller.load_next().await?;
        assert_eq!(keys(&controller.view().await), vec![7, 8, 9]);
        Ok(())
    }

    #[tokio::test]
    async fn only_the_latest_response_is_applied() -> AppResult<()> {
        let controller = ListController::new(GatedSource::new(numbered(1..=9)), 3);
        controller.load_initial().await?;
        let (release_first, release_second) = controller.source.gate_pair();

        let releaser = async {
            release_second.send(()).ok();
            tokio::task::yield_now().await;
            release_first.send(()).ok();
        };
        let (first, second, _) =
            tokio::join!(controller.load_next(), controller.load_next(), releaser);

        assert_eq!(second?, Settled::Applied);
        assert_eq!(first?, Settled::Stale);
        let view = controller.view().await;
        assert_eq!(keys(&view), vec![4, 5, 6]);
        assert_eq!(view.page_number, 2);
        assert!(!view.loading);
        Ok(())
    }

    #[tokio::test]
    async fn stale_failure_is_ignored() -> AppResult<()> {
        let controller = ListController::new(GatedSource::new(numbered(1..=9)), 3);
        controller.load_initial().await?;
        let (release_first, release_second) = controller.source.gate_pair();
        controller.source.fail_gated_call(0);

        let releaser = async {
            release_second.send(()).ok();
            tokio::task::yield_now().await;
            release_first.send(()).ok();
        };
        let (first, second, _) =
            tokio::join!(controller.load_next(), controller.load_next(), releaser);

        assert_eq!(first?, Settled::Stale);
        assert_eq!(second?, Settled::Applied);
        assert_eq!(keys(&controller.view().await), vec![4, 5, 6]);
        Ok(())
    }

    #[tokio::test]
    async fn search_disables_pagination_and_clear_returns_to_page_one() -> AppResult<()> {
        let controller = ListController::new(MemorySource::new(sample_users()), 2);
        controller.load_initial().await?;
        controller.load_next().await?;

        controller.search("  alice ").await?;
        let view = controller.view().await;
        let emails: Vec<&str> = view.items.iter().map(|u: &User| u.email.as_str()).collect();
        assert_eq!(emails, vec!["alice.b@example.com", "alice@example.com"]);
        assert_eq!(view.mode, ListMode::Search("alice".into()));
        assert!(!view.has_next && !view.has_prev);
        assert!(!view.controls_visible());
        assert_eq!(controller.load_next().await?, Settled::Skipped);

        controller.clear_search().await?;
        let view = controller.view().await;
        assert_eq!(view.mode, ListMode::Browse);
        assert_eq!(view.page_number, 1);
        assert!(view.has_next);
        assert!(!view.has_prev);
        Ok(())
    }

    #[tokio::test]
    async fn blank_search_is_the_same_as_clearing() -> AppResult<()> {
        let controller = ListController::new(MemorySource::new(sample_users()), 2);
        controller.search("bob").await?;
        controller.search("   ").await?;
        let view = controller.view().await;
        assert_eq!(view.mode, ListMode::Browse);
        assert_eq!(view.items.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_prefix_only() -> AppResult<()> {
        let controller = ListController::new(MemorySource::new(sample_users()), 10);
        controller.search("alice").await?;
        let view = controller.view().await;
        assert!(view.items.iter().all(|u| u.email.starts_with("alice")));
        assert!(!view.items.iter().any(|u| u.email == "malice@example.com"));
        Ok(())
    }
}
