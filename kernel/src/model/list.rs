//! Ordered range primitives shared by every paginated collection.

/// Direction of the sort key a collection is listed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// An item that can be addressed by the sort key of its collection.
///
/// The cursor ordering (`Ord`) is the natural order of the key. Whether the
/// collection is listed ascending or descending by that key is given by
/// [`Cursored::ORDER`].
pub trait Cursored {
    type Cursor: Clone + Ord + Send + Sync + std::fmt::Debug;

    const ORDER: SortOrder;

    fn cursor(&self) -> Self::Cursor;
}

/// A contiguous range of an ordered collection.
///
/// Results are always returned in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeQuery<C> {
    /// The first `limit` items.
    First { limit: i64 },
    /// The first `limit` items strictly after `cursor`.
    After { cursor: C, limit: i64 },
    /// The last `limit` items strictly before `cursor`.
    Before { cursor: C, limit: i64 },
}

impl<C> RangeQuery<C> {
    pub fn limit(&self) -> i64 {
        match self {
            RangeQuery::First { limit }
            | RangeQuery::After { limit, .. }
            | RangeQuery::Before { limit, .. } => *limit,
        }
    }
}
