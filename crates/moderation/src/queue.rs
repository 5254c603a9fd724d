//! Engine handle for the media moderation queue.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use heavyhire_client::service::{ContextLookupService, ModerationService};
use heavyhire_core::types::MediaId;

use crate::events::{ModerationEvent, EVENT_CHANNEL_CAPACITY};
use crate::state::{QueueSnapshot, QueueState};

/// Default number of items requested per queue page.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// The media moderation queue engine.
///
/// Owns the reviewer's queue view and applies every mutation to it: page
/// fetches, single and bulk moderation actions, preview navigation, and
/// context detail resolution. Cheap to share as an `Arc` between the
/// dashboard shell and the scroll sentinel.
///
/// State lives behind a [`tokio::sync::Mutex`]; critical sections never
/// span a service call, so concurrent operations interleave at the await
/// points and the in-state guards (single-flight flag, in-flight id set)
/// stay authoritative.
pub struct ModerationQueue {
    pub(crate) state: Mutex<QueueState>,
    pub(crate) service: Arc<dyn ModerationService>,
    pub(crate) lookup: Arc<dyn ContextLookupService>,
    pub(crate) events: broadcast::Sender<ModerationEvent>,
    pub(crate) page_size: u32,
}

impl ModerationQueue {
    /// Create an engine over the given service handles.
    pub fn new(
        service: Arc<dyn ModerationService>,
        lookup: Arc<dyn ContextLookupService>,
    ) -> Arc<Self> {
        Self::with_page_size(service, lookup, DEFAULT_PAGE_SIZE)
    }

    /// Create an engine with a specific page size.
    pub fn with_page_size(
        service: Arc<dyn ModerationService>,
        lookup: Arc<dyn ContextLookupService>,
        page_size: u32,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            state: Mutex::new(QueueState::default()),
            service,
            lookup,
            events,
            page_size,
        })
    }

    /// Subscribe to reviewer-facing queue events.
    pub fn subscribe(&self) -> broadcast::Receiver<ModerationEvent> {
        self.events.subscribe()
    }

    /// Read-only snapshot of the current queue view.
    pub async fn snapshot(&self) -> QueueSnapshot {
        let state = self.state.lock().await;
        QueueSnapshot::of(&state)
    }

    /// Whether another page can be appended.
    pub async fn has_more(&self) -> bool {
        self.state.lock().await.has_more
    }

    /// Whether a page fetch is currently in flight.
    pub async fn is_fetching(&self) -> bool {
        self.state.lock().await.fetch_in_flight
    }

    /// Currently previewed media id, if any.
    pub async fn previewed(&self) -> Option<MediaId> {
        self.state.lock().await.preview.clone()
    }

    pub(crate) fn publish(&self, event: ModerationEvent) {
        // Zero receivers is fine; the shell may not have subscribed yet.
        let _ = self.events.send(event);
    }
}
