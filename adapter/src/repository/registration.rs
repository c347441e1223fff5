use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::{event::CreateRegistration, RegisteredEvent, Registration, RegistrationOutcome},
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::registration::{RegisteredEventRow, RegistrationRow},
    ConnectionPool,
};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create_if_absent(&self, event: CreateRegistration) -> AppResult<RegistrationOutcome> {
        // 一意制約に当たった場合は行が返らない
        let inserted: Option<RegistrationId> = sqlx::query_scalar(
            r#"
                INSERT INTO registrations (registration_id, user_id, event_id, registered_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id, event_id) DO NOTHING
                RETURNING registration_id
            "#,
        )
        .bind(RegistrationId::new())
        .bind(event.user_id)
        .bind(event.event_id)
        .bind(event.registered_at)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(match inserted {
            Some(registration_id) => RegistrationOutcome::Registered(registration_id),
            None => RegistrationOutcome::AlreadyRegistered,
        })
    }

    async fn find_by_user_and_event(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> AppResult<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT registration_id, user_id, event_id, registered_at
                FROM registrations
                WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Registration::from))
    }

    async fn find_events_by_user_id(&self, user_id: UserId) -> AppResult<Vec<RegisteredEvent>> {
        // 削除済みのイベントは INNER JOIN で除外される
        let rows = sqlx::query_as::<_, RegisteredEventRow>(
            r#"
                SELECT
                    e.event_id,
                    e.title,
                    e.date,
                    e.image,
                    e.location,
                    r.registered_at
                FROM registrations AS r
                INNER JOIN events AS e USING (event_id)
                WHERE r.user_id = $1
                ORDER BY r.registered_at DESC, r.registration_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(RegisteredEvent::from).collect())
    }
}
