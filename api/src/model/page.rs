use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use garde::Validate;
use kernel::model::list::Cursored;
use kernel::pagination::{Direction, Navigation, Page};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::error::{AppError, AppResult};

/// Cursors travel as URL-safe base64 of their JSON form.
pub fn encode_cursor<C: Serialize>(cursor: &C) -> AppResult<String> {
    let json = serde_json::to_vec(cursor)
        .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode_cursor<C: DeserializeOwned>(raw: &str) -> AppResult<C> {
    let json = URL_SAFE_NO_PAD
        .decode(raw)
        .map_err(|e| AppError::InvalidCursor(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| AppError::InvalidCursor(e.to_string()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionName {
    #[default]
    Initial,
    Next,
    Prev,
}

impl From<DirectionName> for Direction {
    fn from(value: DirectionName) -> Self {
        match value {
            DirectionName::Initial => Direction::Initial,
            DirectionName::Next => Direction::Next,
            DirectionName::Prev => Direction::Prev,
        }
    }
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[garde(skip)]
    #[serde(default)]
    pub direction: DirectionName,
    #[garde(skip)]
    pub cursor: Option<String>,
    // 移動前に表示していたページ番号
    #[garde(range(min = 1))]
    #[serde(default = "first_page")]
    pub page: u32,
    #[garde(range(min = 1))]
    pub limit: Option<i64>,
    #[garde(skip)]
    pub search: Option<String>,
}

impl PageQuery {
    pub fn navigation<C: DeserializeOwned>(&self) -> AppResult<Navigation<C>> {
        let cursor = || -> AppResult<C> {
            let raw = self
                .cursor
                .as_deref()
                .ok_or_else(|| AppError::InvalidCursor("cursor is required".into()))?;
            decode_cursor(raw)
        };
        Ok(match Direction::from(self.direction) {
            Direction::Initial => Navigation::Initial,
            Direction::Next => Navigation::Next(cursor()?),
            Direction::Prev => Navigation::Prev(cursor()?),
        })
    }

    // 空白だけの検索語は検索なしとして扱う
    pub fn search_prefix(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One page of a listing.
///
/// An empty `items` with `hasNext: false` after a `next` request means the
/// listing ended past the client's cursor. Clients keep the items they are
/// showing and only disable the next control. An empty `items` after a `prev`
/// request comes back as page 1; clients reload with `direction=initial`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_next: bool,
    pub has_prev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cursor: Option<String>,
    pub search_mode: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn browse<I>(page: Page<I>) -> AppResult<Self>
    where
        I: Cursored,
        I::Cursor: Serialize,
        T: From<I>,
    {
        let first_cursor = page.first_cursor().map(|c| encode_cursor(&c)).transpose()?;
        let last_cursor = page.last_cursor().map(|c| encode_cursor(&c)).transpose()?;
        let Page {
            items,
            page_number,
            has_next,
            has_prev,
        } = page;
        Ok(Self {
            items: items.into_iter().map(T::from).collect(),
            page: page_number,
            has_next,
            has_prev,
            first_cursor,
            last_cursor,
            search_mode: false,
        })
    }

    // 検索結果はページ送りしないのでカーソルを返さない
    pub fn search<I>(page: Page<I>) -> Self
    where
        T: From<I>,
    {
        let Page {
            items, page_number, ..
        } = page;
        Self {
            items: items.into_iter().map(T::from).collect(),
            page: page_number,
            has_next: false,
            has_prev: false,
            first_cursor: None,
            last_cursor: None,
            search_mode: true,
        }
    }
}
