//! Incremental loading driven by the reviewer's scroll position.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::QueueError;
use crate::fetch::FetchOutcome;
use crate::queue::ModerationQueue;

/// How close (in pixels) the trailing sentinel must be to the viewport edge
/// before the next page is prefetched.
pub const PREFETCH_MARGIN_PX: f64 = 400.0;

/// Watches the trailing scroll sentinel and appends the next page when the
/// reviewer nears the end of the loaded list.
///
/// The sentinel shares the queue's single-flight guard, so at most one
/// append fetch runs no matter how often the reviewer scrolls. Release it
/// when the queue view goes inactive; a released sentinel never fetches
/// against a stale filter set.
pub struct ScrollSentinel {
    queue: Arc<ModerationQueue>,
    released: CancellationToken,
}

impl ScrollSentinel {
    /// Attach a sentinel to the queue.
    pub fn new(queue: Arc<ModerationQueue>) -> Self {
        Self {
            queue,
            released: CancellationToken::new(),
        }
    }

    /// Report the sentinel's distance from the viewport edge.
    ///
    /// Returns `Ok(None)` when nothing was triggered (sentinel released or
    /// still outside the prefetch margin); otherwise forwards the queue's
    /// fetch outcome.
    pub async fn on_scroll(&self, distance_px: f64) -> Result<Option<FetchOutcome>, QueueError> {
        if self.released.is_cancelled() {
            return Ok(None);
        }
        if distance_px > PREFETCH_MARGIN_PX {
            return Ok(None);
        }
        self.queue.load_more().await.map(Some)
    }

    /// Detach from the queue view. Idempotent.
    pub fn release(&self) {
        if !self.released.is_cancelled() {
            tracing::debug!("Scroll sentinel released");
            self.released.cancel();
        }
    }

    /// Whether the sentinel has been released.
    pub fn is_released(&self) -> bool {
        self.released.is_cancelled()
    }
}
