//! In-process event store.

use std::collections::HashMap;

use anyhow::{bail, Result};
use futures::future::{BoxFuture, FutureExt};
use tokio::sync::RwLock;
use tracing::debug;

use super::EventStore;
use crate::models::Event;

/// Event store backed by a map, keyed by event ID
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<String, Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl EventStore for MemoryEventStore {
    fn fetch_event<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Event>>> {
        async move { Ok(self.events.read().await.get(id).cloned()) }.boxed()
    }

    fn update_event<'a>(&'a self, event: &'a Event) -> BoxFuture<'a, Result<()>> {
        async move {
            if event.id.is_empty() {
                bail!("Cannot store event '{}' without an ID", event.name);
            }

            debug!(
                "Storing event {} with {} points",
                event.id,
                event.spaced_points.len()
            );
            self.events
                .write()
                .await
                .insert(event.id.clone(), event.clone());
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn sample(id: &str) -> Event {
        Event::new(
            id,
            "Spring fair",
            Coordinate::new(1.0, -1.0),
            Coordinate::new(0.0, 0.0),
            28000.0,
        )
    }

    #[tokio::test]
    async fn test_update_then_fetch() {
        let store = MemoryEventStore::new();
        assert!(store.is_empty().await);
        assert!(store.fetch_event("abc").await.unwrap().is_none());

        store.update_event(&sample("abc")).await.unwrap();
        let mut event = sample("abc");
        event.name = "Renamed".to_string();
        store.update_event(&event).await.unwrap();

        assert_eq!(store.len().await, 1);
        let fetched = store.fetch_event("abc").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Renamed");
    }

    #[tokio::test]
    async fn test_rejects_missing_id() {
        let store = MemoryEventStore::new();
        assert!(store.update_event(&sample("")).await.is_err());
        assert!(store.is_empty().await);
    }
}
