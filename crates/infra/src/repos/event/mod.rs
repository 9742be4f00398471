mod inmemory;
mod postgres;

use event_scheduler_domain::{Event, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

/// One page of a full scan over the event store
#[derive(Debug, Default)]
pub struct EventPage {
    pub events: Vec<Event>,
    /// Where the next page starts. `None` when the scan is complete.
    pub next: Option<ID>,
}

/// Key-value store of `Event`s keyed by id.
///
/// `created_at` and `updated_at` are owned by the store: `put` stamps
/// `updated_at` with the current time and keeps the `created_at` of an
/// already stored record.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Inserts or overwrites the event with the same id
    async fn put(&self, e: &Event) -> anyhow::Result<Event>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
    /// Reads the page of events following `after`, in id order
    async fn scan(&self, after: Option<&ID>) -> anyhow::Result<EventPage>;
    /// Removes the event and returns it, or `None` if there was no such event
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;

    /// Every stored event, sorted by `start_time`
    async fn find_all(&self) -> anyhow::Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut after: Option<ID> = None;
        loop {
            let page = self.scan(after.as_ref()).await?;
            events.extend(page.events);
            match page.next {
                Some(next) => after = Some(next),
                None => break,
            }
        }
        events.sort_by(|e1, e2| e1.start_time.cmp(&e2.start_time));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{ISys, StaticTimeSys};
    use std::sync::Arc;

    fn create_repo(page_size: i64, ts: i64) -> InMemoryEventRepo {
        let sys: Arc<dyn ISys> = Arc::new(StaticTimeSys(ts));
        InMemoryEventRepo::new(sys, page_size)
    }

    fn generate_event(start_time: &str) -> Event {
        Event::new(
            None,
            "Test Meeting".into(),
            "A test meeting".into(),
            start_time.into(),
            "2024-01-15T11:00:00".into(),
        )
    }

    #[tokio::test]
    async fn put_find_and_delete() {
        let repo = create_repo(10, 1000);
        let event = generate_event("2024-01-15T10:00:00");

        let stored = repo.put(&event).await.expect("To insert event");
        assert_eq!(stored.id, event.id);
        assert_eq!(stored.created_at.timestamp_millis(), 1000);
        assert_eq!(stored.updated_at.timestamp_millis(), 1000);

        let found = repo.find(&event.id).await.unwrap().expect("To find event");
        assert_eq!(found, stored);

        let deleted = repo.delete(&event.id).await.unwrap();
        assert_eq!(deleted, Some(stored));
        assert!(repo.find(&event.id).await.unwrap().is_none());
        assert!(repo.delete(&event.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_and_keeps_created_at() {
        let event = generate_event("2024-01-15T10:00:00");
        let repo = create_repo(10, 1000);
        repo.put(&event).await.unwrap();

        let repo = InMemoryEventRepo {
            sys: Arc::new(StaticTimeSys(2000)),
            ..repo
        };
        let mut changed = event.clone();
        changed.title = "Changed".into();
        let stored = repo.put(&changed).await.unwrap();

        assert_eq!(stored.title, "Changed");
        assert_eq!(stored.created_at.timestamp_millis(), 1000);
        assert_eq!(stored.updated_at.timestamp_millis(), 2000);
    }

    #[tokio::test]
    async fn find_all_reads_every_page_sorted_by_start_time() {
        let repo = create_repo(2, 0);
        let starts = vec![
            "2024-01-15T13:00:00",
            "2024-01-15T09:00:00",
            "2024-01-15T11:00:00",
            "2024-01-15T10:00:00",
            "2024-01-15T12:00:00",
        ];
        for start in &starts {
            repo.put(&generate_event(start)).await.unwrap();
        }

        let first_page = repo.scan(None).await.unwrap();
        assert_eq!(first_page.events.len(), 2);
        assert!(first_page.next.is_some());

        let events = repo.find_all().await.unwrap();
        let mut expected = starts.clone();
        expected.sort();
        assert_eq!(
            events.iter().map(|e| e.start_time.as_str()).collect::<Vec<_>>(),
            expected
        );
    }

    #[tokio::test]
    async fn find_all_on_empty_store() {
        let repo = create_repo(2, 0);
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
