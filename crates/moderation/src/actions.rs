//! Single-item moderation actions.

use std::fmt;

use serde::Serialize;

use heavyhire_client::service::ModerationService;
use heavyhire_client::types::ModerationDecision;
use heavyhire_core::media::{validate_rejection_reason, MediaStatus};
use heavyhire_core::types::MediaId;

use crate::error::QueueError;
use crate::events::ModerationEvent;
use crate::queue::ModerationQueue;
use crate::state::QueueState;

/// A moderation decision the reviewer can apply to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ModerationQueue {
    /// Apply a single approve/reject decision to `id`.
    ///
    /// The id joins the in-flight set for the whole lifetime of the call
    /// and leaves it whether the remote operation succeeds or fails, so a
    /// failed action can be retried. On success the store entry is updated
    /// in place; on failure it is left untouched and the error is
    /// published. A blank rejection reason is refused before any service
    /// call.
    pub async fn act(
        &self,
        id: &MediaId,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<(), QueueError> {
        if action == ModerationAction::Reject {
            validate_rejection_reason(reason)?;
        }
        {
            let mut state = self.state.lock().await;
            if !state.actions_in_flight.insert(id.clone()) {
                return Err(QueueError::ActionInFlight(id.clone()));
            }
        }

        let result = match action {
            ModerationAction::Approve => self.service.approve_media(id).await,
            ModerationAction::Reject => self.service.reject_media(id, reason).await,
        };

        let mut state = self.state.lock().await;
        state.actions_in_flight.remove(id);
        match result {
            Ok(decision) => {
                Self::apply_decision(&mut state, &decision);
                drop(state);

                tracing::info!(media_id = %id, decision = action.as_str(), "Moderation action applied");
                self.publish(ModerationEvent::ActionApplied {
                    id: id.clone(),
                    status: decision.status,
                });
                Ok(())
            }
            Err(e) => {
                drop(state);

                tracing::warn!(media_id = %id, decision = action.as_str(), error = %e, "Moderation action failed");
                self.publish(ModerationEvent::ActionFailed {
                    id: id.clone(),
                    message: e.to_string(),
                });
                Err(QueueError::Action {
                    id: id.clone(),
                    action,
                    source: e,
                })
            }
        }
    }

    /// Approve a single media file.
    pub async fn approve(&self, id: &MediaId) -> Result<(), QueueError> {
        self.act(id, ModerationAction::Approve, None).await
    }

    /// Reject a single media file with an optional reason.
    pub async fn reject(&self, id: &MediaId, reason: Option<&str>) -> Result<(), QueueError> {
        self.act(id, ModerationAction::Reject, reason).await
    }

    /// Fold a decision response into the store, keyed by id.
    ///
    /// The item may have left the view since the call started (concurrent
    /// filter change); that is not an error. A decided item also leaves the
    /// bulk selection, since it is no longer actionable.
    pub(crate) fn apply_decision(state: &mut QueueState, decision: &ModerationDecision) {
        state.selection.remove(&decision.id);
        let Some(item) = state.item_mut(&decision.id) else {
            return;
        };
        item.status = decision.status;
        if let Some(url) = &decision.url {
            item.url = url.clone();
        }
        if decision.status == MediaStatus::Rejected {
            item.rejection_reason = decision.rejection_reason.clone();
        }
    }
}
