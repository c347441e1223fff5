use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        Event, EventCursor, EventSearch,
    },
    id::EventId,
    list::RangeQuery,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::event::EventRow, ConnectionPool};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

const EVENT_COLUMNS: &str = r#"
    event_id, title, description, date, location, image, category, price,
    created_at, updated_at
"#;

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let event_id = EventId::new();
        sqlx::query(
            r#"
                INSERT INTO events
                    (event_id, title, description, date, location, image, category, price)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event_id)
        .bind(event.title)
        .bind(event.description)
        .bind(event.date)
        .bind(event.location)
        .bind(event.image)
        .bind(event.category)
        .bind(event.price)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(event_id)
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        // 指定のないフィールドは現在の値のまま残す
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    date = COALESCE($4, date),
                    location = COALESCE($5, location),
                    image = COALESCE($6, image),
                    category = COALESCE($7, category),
                    price = COALESCE($8, price)
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(event.title)
        .bind(event.description)
        .bind(event.date)
        .bind(event.location)
        .bind(event.image)
        .bind(event.category)
        .bind(event.price)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            )));
        }

        Ok(())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Event::from))
    }

    async fn find_all(&self, search: EventSearch) -> AppResult<Vec<Event>> {
        let EventSearch { keyword, category } = search;
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
                SELECT {EVENT_COLUMNS}
                FROM events
                WHERE ($1::TEXT IS NULL
                        OR title ILIKE '%' || $1 || '%'
                        OR category ILIKE '%' || $1 || '%')
                  AND ($2::TEXT IS NULL OR category = $2)
                ORDER BY created_at DESC, event_id DESC
            "#
        ))
        .bind(keyword.map(|k| escape_like(&k)))
        .bind(category)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_range(&self, query: RangeQuery<EventCursor>) -> AppResult<Vec<Event>> {
        let rows = match query {
            RangeQuery::First { limit } => {
                sqlx::query_as::<_, EventRow>(&format!(
                    r#"
                        SELECT {EVENT_COLUMNS}
                        FROM events
                        ORDER BY created_at DESC, event_id DESC
                        LIMIT $1
                    "#
                ))
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            RangeQuery::After { cursor, limit } => {
                sqlx::query_as::<_, EventRow>(&format!(
                    r#"
                        SELECT {EVENT_COLUMNS}
                        FROM events
                        WHERE (created_at, event_id) < ($1, $2)
                        ORDER BY created_at DESC, event_id DESC
                        LIMIT $3
                    "#
                ))
                .bind(cursor.created_at)
                .bind(cursor.event_id)
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            // カーソルより手前の末尾 limit 件を取り、表示順に並べ直す
            RangeQuery::Before { cursor, limit } => {
                sqlx::query_as::<_, EventRow>(&format!(
                    r#"
                        SELECT * FROM (
                            SELECT {EVENT_COLUMNS}
                            FROM events
                            WHERE (created_at, event_id) > ($1, $2)
                            ORDER BY created_at ASC, event_id ASC
                            LIMIT $3
                        ) AS preceding
                        ORDER BY created_at DESC, event_id DESC
                    "#
                ))
                .bind(cursor.created_at)
                .bind(cursor.event_id)
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
