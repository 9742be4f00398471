use super::{EventPage, IEventRepo};
use crate::repos::shared::inmemory_repo::*;
use crate::system::ISys;
use event_scheduler_domain::{Event, ID};
use std::sync::Arc;

pub struct InMemoryEventRepo {
    pub(super) events: Collection<Event>,
    pub(super) sys: Arc<dyn ISys>,
    pub(super) page_size: usize,
}

impl InMemoryEventRepo {
    pub fn new(sys: Arc<dyn ISys>, page_size: i64) -> Self {
        Self {
            events: Default::default(),
            sys,
            page_size: page_size.max(1) as usize,
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn put(&self, e: &Event) -> anyhow::Result<Event> {
        let now = self.sys.now();
        upsert_with(&e.id, &self.events, |existing| {
            let mut e = e.clone();
            e.created_at = existing.map(|prev| prev.created_at).unwrap_or(now);
            e.updated_at = now;
            e
        })
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        find(event_id, &self.events)
    }

    async fn scan(&self, after: Option<&ID>) -> anyhow::Result<EventPage> {
        let (events, next) = scan_page(after, self.page_size, &self.events)?;
        Ok(EventPage { events, next })
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        delete(event_id, &self.events)
    }
}
