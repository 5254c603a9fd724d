//! Reviewer-facing event stream for the moderation queue.
//!
//! The engine publishes every outcome the dashboard shell should reflect
//! over a [`tokio::sync::broadcast`] channel; subscribe via
//! [`crate::queue::ModerationQueue::subscribe`]. Failures are reported
//! here, never retried.

use serde::Serialize;

use heavyhire_core::media::MediaStatus;
use heavyhire_core::types::MediaId;

/// Buffer capacity for the event broadcast channel.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Something the reviewer interface should reflect.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModerationEvent {
    /// The queue view was replaced (filter change or first load).
    QueueReplaced { count: usize },
    /// An incremental load appended more items.
    QueueAppended { count: usize },
    /// A queue page could not be fetched.
    FetchFailed { page: u32, message: String },
    /// A single moderation action was applied to the store.
    ActionApplied { id: MediaId, status: MediaStatus },
    /// A single moderation action failed; the item is unchanged.
    ActionFailed { id: MediaId, message: String },
    /// A bulk action settled. `failed_ids` is empty iff `success`.
    BulkCompleted {
        requested: usize,
        succeeded: usize,
        failed_ids: Vec<MediaId>,
        success: bool,
    },
    /// The preview opened on (or advanced to) an item.
    PreviewOpened { id: MediaId },
    /// The preview closed, explicitly or because nothing actionable remained.
    PreviewClosed,
    /// Context detail resolved for the previewed item.
    ContextResolved { id: MediaId },
    /// Context detail lookup failed for the previewed item.
    ContextFailed { id: MediaId, message: String },
}
