//! Cursor pagination over ordered collections without a total count.
//!
//! Every range is fetched with one extra item (the over-fetch probe). The
//! probe only decides whether another page exists in the direction of
//! travel; it is never shown.

pub mod controller;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ListController, ListMode, ListView, Settled};
pub use source::{EventPageSource, PageSource, PrefixSearch, UserPageSource};

use crate::model::list::{Cursored, RangeQuery};
use shared::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Initial,
    Next,
    Prev,
}

/// Where to move from the current page. `Next` carries the cursor of the
/// last item shown, `Prev` the cursor of the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<C> {
    Initial,
    Next(C),
    Prev(C),
}

impl<C> Navigation<C> {
    pub fn direction(&self) -> Direction {
        match self {
            Navigation::Initial => Direction::Initial,
            Navigation::Next(_) => Direction::Next,
            Navigation::Prev(_) => Direction::Prev,
        }
    }

    pub fn into_range(self, page_size: i64) -> RangeQuery<C> {
        let limit = page_size.max(1) + 1;
        match self {
            Navigation::Initial => RangeQuery::First { limit },
            Navigation::Next(cursor) => RangeQuery::After { cursor, limit },
            Navigation::Prev(cursor) => RangeQuery::Before { cursor, limit },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page_number: 1,
            has_next: false,
            has_prev: false,
        }
    }

    // 空の一覧ではページ送りを表示しない
    pub fn controls_visible(&self) -> bool {
        !self.items.is_empty()
    }

    /// The page reported when the store has nothing further in `direction`.
    ///
    /// It carries no items. Callers keep showing the items they already have
    /// and only take the flags: `has_next == false` after `Next`, or a reset
    /// to page 1 after `Prev`, upon which the first page should be reloaded.
    fn end_of(direction: Direction, current_page: u32) -> Self {
        match direction {
            Direction::Next => Self {
                items: Vec::new(),
                page_number: current_page.max(1),
                has_next: false,
                has_prev: current_page > 1,
            },
            Direction::Prev => Self {
                items: Vec::new(),
                page_number: 1,
                has_next: true,
                has_prev: false,
            },
            Direction::Initial => Self::empty(),
        }
    }
}

impl<T: Cursored> Page<T> {
    pub fn first_cursor(&self) -> Option<T::Cursor> {
        self.items.first().map(Cursored::cursor)
    }

    pub fn last_cursor(&self) -> Option<T::Cursor> {
        self.items.last().map(Cursored::cursor)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Shaped<T> {
    Page(Page<T>),
    /// Nothing exists beyond the cursor in the requested direction.
    End,
}

/// Turns an over-fetched range into a page.
///
/// `fetched` is in listing order. For `Next` the probe item is the last one,
/// for `Prev` (last-N-before semantics) it is the first one.
pub fn shape<T>(
    direction: Direction,
    mut fetched: Vec<T>,
    page_size: i64,
    current_page: u32,
) -> Shaped<T> {
    let size = page_size.max(1) as usize;
    let probed = fetched.len() > size;

    match direction {
        Direction::Initial => {
            fetched.truncate(size);
            Shaped::Page(Page {
                items: fetched,
                page_number: 1,
                has_next: probed,
                has_prev: false,
            })
        }
        Direction::Next => {
            if fetched.is_empty() {
                return Shaped::End;
            }
            fetched.truncate(size);
            Shaped::Page(Page {
                items: fetched,
                page_number: current_page.saturating_add(1),
                has_next: probed,
                has_prev: true,
            })
        }
        Direction::Prev => {
            if fetched.is_empty() {
                return Shaped::End;
            }
            if probed {
                fetched.drain(..fetched.len() - size);
            }
            let page_number = current_page.saturating_sub(1).max(1);
            Shaped::Page(Page {
                items: fetched,
                page_number,
                has_next: true,
                has_prev: page_number > 1,
            })
        }
    }
}

/// Prefix matches are a single page; pagination is off in search mode.
pub fn shape_search<T>(mut fetched: Vec<T>, page_size: i64) -> Page<T> {
    fetched.truncate(page_size.max(1) as usize);
    Page {
        items: fetched,
        page_number: 1,
        has_next: false,
        has_prev: false,
    }
}

/// Fetches one page without keeping any state between calls.
///
/// `current_page` is the page number the caller is moving away from. When
/// nothing lies beyond the cursor the returned page is empty; see
/// [`Page::end_of`] for how callers treat it.
pub async fn fetch_page<S>(
    source: &S,
    navigation: Navigation<<S::Item as Cursored>::Cursor>,
    current_page: u32,
    page_size: i64,
) -> AppResult<Page<S::Item>>
where
    S: PageSource + ?Sized,
{
    let direction = navigation.direction();
    let fetched = source.fetch_range(navigation.into_range(page_size)).await?;
    Ok(match shape(direction, fetched, page_size, current_page) {
        Shaped::Page(page) => page,
        Shaped::End => Page::end_of(direction, current_page),
    })
}

pub async fn search_page<S>(source: &S, prefix: &str, page_size: i64) -> AppResult<Page<S::Item>>
where
    S: PrefixSearch + ?Sized,
{
    let fetched = source.search_prefix(prefix, page_size.max(1) + 1).await?;
    Ok(shape_search(fetched, page_size))
}
