//! Context detail resolution for the previewed item.
//!
//! Every resolution run is tagged with the preview epoch captured when it
//! started. A run whose epoch no longer matches at completion time belongs
//! to a superseded target and is discarded: relevance, not arrival order,
//! decides which result lands.

use serde::Serialize;

use heavyhire_client::service::ContextLookupService;
use heavyhire_client::types::ContextPayload;
use heavyhire_core::media::ContextKind;
use heavyhire_core::types::{ContextId, MediaId};

use crate::error::QueueError;
use crate::events::ModerationEvent;
use crate::queue::ModerationQueue;

/// Lazily-resolved context detail for the previewed item.
///
/// Ephemeral and request-scoped: replaced whenever the previewed item
/// changes, cleared when the preview closes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDetail {
    pub kind: ContextKind,
    pub context_id: ContextId,
    pub payload: Option<ContextPayload>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ModerationQueue {
    /// Resolve the context detail for the item previewed at `epoch`.
    ///
    /// Kinds without a dedicated lookup resolve locally to
    /// [`ContextPayload::Other`]. A lookup failure is recorded in the
    /// detail state of the current target only; it never propagates as the
    /// preview operation's error.
    pub(crate) async fn resolve_context(
        &self,
        media_id: MediaId,
        kind: ContextKind,
        context_id: ContextId,
        epoch: u64,
    ) {
        let result = match kind {
            ContextKind::RentalRequest => self
                .lookup
                .rental_request(&context_id)
                .await
                .map(ContextPayload::RentalRequest),
            ContextKind::Equipment => self
                .lookup
                .equipment(&context_id)
                .await
                .map(ContextPayload::Equipment),
            ContextKind::EquipmentType => self
                .lookup
                .equipment_type(&context_id)
                .await
                .map(ContextPayload::EquipmentType),
            _ => Ok(ContextPayload::Other),
        };

        let mut state = self.state.lock().await;
        if state.preview_epoch != epoch {
            tracing::debug!(
                media_id = %media_id,
                context_id = %context_id,
                "Discarding stale context lookup result"
            );
            return;
        }
        let Some(detail) = state.context.as_mut() else {
            return;
        };

        match result {
            Ok(payload) => {
                detail.loading = false;
                detail.payload = Some(payload);
                detail.error = None;
                drop(state);

                self.publish(ModerationEvent::ContextResolved { id: media_id });
            }
            Err(e) => {
                let error = QueueError::ContextLookup {
                    kind,
                    id: context_id.clone(),
                    message: e.to_string(),
                };
                let message = error.to_string();
                detail.loading = false;
                detail.error = Some(message.clone());
                drop(state);

                tracing::warn!(media_id = %media_id, context_id = %context_id, error = %message, "Context lookup failed");
                self.publish(ModerationEvent::ContextFailed {
                    id: media_id,
                    message,
                });
            }
        }
    }
}
