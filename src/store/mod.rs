//! Event store collaborator.

mod memory;

pub use memory::MemoryEventStore;

use anyhow::Result;
use futures::future::BoxFuture;

use crate::models::Event;

/// Document store holding event records.
///
/// Methods return boxed futures so the store can be shared as
/// `Arc<dyn EventStore>`.
pub trait EventStore: Send + Sync {
    /// Fetch an event by document ID
    fn fetch_event<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Event>>>;

    /// Write the event, replacing any stored version with the same ID
    fn update_event<'a>(&'a self, event: &'a Event) -> BoxFuture<'a, Result<()>>;
}
