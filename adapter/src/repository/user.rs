use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    list::RangeQuery,
    user::{
        event::{CreateUser, UpdateUserRole},
        User, UserCursor,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

fn into_users(rows: Vec<UserRow>) -> AppResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, email, display_name, role
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, email, display_name, role
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        // 同じメールアドレスで同時にサインインした場合は既存のレコード（とロール）を返す
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_id, email, display_name, role)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
                RETURNING user_id, email, display_name, role
            "#,
        )
        .bind(UserId::new())
        .bind(&event.email)
        .bind(&event.display_name)
        .bind(event.role.as_ref())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        User::try_from(row)
    }

    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users
                SET role = $2
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                event.user_id
            )));
        }

        Ok(())
    }

    async fn find_range(&self, query: RangeQuery<UserCursor>) -> AppResult<Vec<User>> {
        let rows = match query {
            RangeQuery::First { limit } => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                        SELECT user_id, email, display_name, role
                        FROM users
                        ORDER BY email ASC, user_id ASC
                        LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            RangeQuery::After { cursor, limit } => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                        SELECT user_id, email, display_name, role
                        FROM users
                        WHERE (email, user_id) > ($1, $2)
                        ORDER BY email ASC, user_id ASC
                        LIMIT $3
                    "#,
                )
                .bind(cursor.email)
                .bind(cursor.user_id)
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
            RangeQuery::Before { cursor, limit } => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                        SELECT * FROM (
                            SELECT user_id, email, display_name, role
                            FROM users
                            WHERE (email, user_id) < ($1, $2)
                            ORDER BY email DESC, user_id DESC
                            LIMIT $3
                        ) AS preceding
                        ORDER BY email ASC, user_id ASC
                    "#,
                )
                .bind(cursor.email)
                .bind(cursor.user_id)
                .bind(limit)
                .fetch_all(self.db.inner_ref())
                .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        into_users(rows)
    }

    async fn find_by_email_prefix(&self, prefix: &str, limit: i64) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, email, display_name, role
                FROM users
                WHERE starts_with(email, $1)
                ORDER BY email ASC, user_id ASC
                LIMIT $2
            "#,
        )
        .bind(prefix)
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        into_users(rows)
    }
}
