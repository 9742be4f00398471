use super::{EventPage, IEventRepo};
use crate::system::ISys;
use chrono::{DateTime, Utc};
use event_scheduler_domain::{Event, Recurrence, ID};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
    sys: Arc<dyn ISys>,
    page_size: i64,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool, sys: Arc<dyn ISys>, page_size: i64) -> Self {
        Self {
            pool,
            sys,
            page_size: page_size.max(1),
        }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: String,
    title: String,
    description: String,
    start_time: String,
    end_time: String,
    recurrence: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRaw> for Event {
    type Error = anyhow::Error;

    fn try_from(e: EventRaw) -> anyhow::Result<Self> {
        let recurrence = match e.recurrence {
            Some(recurrence) => Recurrence::parse_optional(&recurrence)?,
            None => None,
        };
        Ok(Self {
            id: e.event_uid.into(),
            title: e.title,
            description: e.description,
            start_time: e.start_time,
            end_time: e.end_time,
            recurrence,
            email: e.email,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn put(&self, e: &Event) -> anyhow::Result<Event> {
        let now = self.sys.now();
        let raw: EventRaw = sqlx::query_as(
            r#"
            INSERT INTO events(
                event_uid,
                title,
                description,
                start_time,
                end_time,
                recurrence,
                email,
                created_at,
                updated_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ON CONFLICT (event_uid) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                recurrence = EXCLUDED.recurrence,
                email = EXCLUDED.email,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(e.id.as_str())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.start_time)
        .bind(&e.end_time)
        .bind(e.recurrence.map(|r| r.as_str()))
        .bind(&e.email)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            error!("Unable to store event {}: {:?}", e.id, err);
            err
        })?;

        raw.try_into()
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let raw: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Event::try_from).transpose()
    }

    async fn scan(&self, after: Option<&ID>) -> anyhow::Result<EventPage> {
        let rows: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events
            WHERE $1::TEXT IS NULL OR event_uid > $1
            ORDER BY event_uid
            LIMIT $2
            "#,
        )
        .bind(after.map(|id| id.as_str()))
        .bind(self.page_size)
        .fetch_all(&self.pool)
        .await?;

        let next = if rows.len() as i64 == self.page_size {
            rows.last().map(|e| ID::from(e.event_uid.clone()))
        } else {
            None
        };
        let events = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(EventPage { events, next })
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let raw: Option<EventRaw> = sqlx::query_as(
            r#"
            DELETE FROM events
            WHERE event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Event::try_from).transpose()
    }
}
