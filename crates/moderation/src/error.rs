//! Error taxonomy for the moderation queue engine.

use heavyhire_client::error::ServiceError;
use heavyhire_core::error::CoreError;
use heavyhire_core::media::ContextKind;
use heavyhire_core::types::{ContextId, MediaId};

use crate::actions::ModerationAction;

/// Errors surfaced by the queue engine.
///
/// Every variant maps to a reviewer-visible message; none of them abort the
/// interface, and none trigger automatic retries.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// A queue page could not be retrieved.
    #[error("Failed to fetch moderation queue page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: ServiceError,
    },

    /// A single approve/reject call failed; the store entry is unchanged.
    #[error("Failed to {action} media {id}: {source}")]
    Action {
        id: MediaId,
        action: ModerationAction,
        #[source]
        source: ServiceError,
    },

    /// The id already has an action in flight (double-submit gate).
    #[error("Media {0} already has an action in flight")]
    ActionInFlight(MediaId),

    /// A reviewer-supplied input failed validation; no service call was made.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A context detail lookup failed for the current preview target.
    #[error("Context lookup failed for {kind} {id}: {message}")]
    ContextLookup {
        kind: ContextKind,
        id: ContextId,
        message: String,
    },
}
